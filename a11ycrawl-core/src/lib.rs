pub mod config;
pub mod crawl;
pub mod error;
pub mod report;
pub mod score;

pub use config::CrawlSettings;
pub use crawl::{CrawlOptions, CrawlProgressCallback, execute_crawl, extract_url_path};
pub use error::{CoreError, Result};
pub use report::{AccessibilityReport, CrawlSummary, PageReport, ReportFormat};
pub use score::{Suggestion, Summary, score, summarize};

const BANNER: &str = r#"
         _ _                           _
   __ _/ / |_   _  ___ _ __ __ ___      _| |
  / _` | | | | | |/ __| '__/ _` \ \ /\ / / |
 | (_| | | | |_| | (__| | | (_| |\ V  V /| |
  \__,_|_|_|\__, |\___|_|  \__,_| \_/\_/ |_|
            |___/
"#;

pub fn print_banner() {
    println!("{}", BANNER);
    println!(
        "  a11ycrawl v{} - crawl a site, score every page\n",
        env!("CARGO_PKG_VERSION")
    );
}
