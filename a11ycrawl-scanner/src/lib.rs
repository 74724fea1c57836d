pub mod audit;
pub mod browser;
pub mod budget;
pub mod crawler;
pub mod error;
pub mod normalize;
pub mod renderer;
pub mod result;

pub use audit::{AuditResult, Impact, Violation};
pub use browser::{AxeScript, AxeSource, ChromiumLauncher};
pub use budget::CrawlBudget;
pub use crawler::{Crawler, ProgressCallback};
pub use error::ScanError;
pub use normalize::ScopePolicy;
pub use renderer::{Renderer, RendererLauncher};
pub use result::{CrawlEvent, CrawlRun, PageResult};
