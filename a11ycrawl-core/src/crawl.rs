use crate::config::CrawlSettings;
use crate::error::Result;
use crate::report::{AccessibilityReport, CrawlSummary};
use a11ycrawl_scanner::{CrawlEvent, RendererLauncher};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;
use url::Url;

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub url: String,
    pub settings: CrawlSettings,
    pub show_progress_bars: bool,
}

/// Callback for reporting crawl progress
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Launch a fresh renderer, crawl `options.url`, and score every page.
///
/// A launch or teardown failure aborts the whole run and no partial report
/// is returned.
pub async fn execute_crawl(
    launcher: &dyn RendererLauncher,
    options: CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<CrawlSummary> {
    let CrawlOptions {
        url,
        settings,
        show_progress_bars,
    } = options;

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Launching browser...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let audited_count = Arc::new(AtomicUsize::new(0));
    let max_pages = settings.budget.max_pages;

    let pb_clone = progress_bar.clone();
    let count_clone = audited_count.clone();
    let user_callback = progress_callback.clone();
    let event_callback = Arc::new(move |event: CrawlEvent| {
        let message = match event {
            CrawlEvent::Visiting { url, depth } => {
                format!("Auditing [depth {}] {}", depth, extract_url_path(&url))
            }
            CrawlEvent::Audited { url, violations } => {
                let count = count_clone.fetch_add(1, Ordering::Relaxed) + 1;
                format!(
                    "Audited {}/{} pages ({} violation(s) on {})",
                    count,
                    max_pages,
                    violations,
                    extract_url_path(&url)
                )
            }
            CrawlEvent::Failed { url, reason } => {
                format!("[!] Skipped {}: {}", url, reason)
            }
        };
        if let Some(ref pb) = pb_clone {
            pb.set_message(message.clone());
        }
        if let Some(ref callback) = user_callback {
            callback(message);
        }
    });

    let started_at = Utc::now();
    let outcome = async {
        let renderer = launcher.launch().await?;
        settings
            .crawler()
            .with_progress_callback(event_callback)
            .crawl(renderer, &url)
            .await
    }
    .await;

    let run = match outcome {
        Ok(run) => run,
        Err(e) => {
            if let Some(ref pb) = progress_bar {
                pb.finish_and_clear();
            }
            return Err(e.into());
        }
    };
    let finished_at = Utc::now();

    let report = AccessibilityReport::from_pages(&run.pages);
    info!(
        "Scored {} page(s) for {} ({} violation(s))",
        report.aggregated_results.len(),
        url,
        report.total_violations()
    );

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!(
            "Crawl complete! {} page(s) audited",
            audited_count.load(Ordering::Relaxed)
        ));
    }

    Ok(CrawlSummary {
        seed_url: url,
        started_at,
        finished_at,
        pages_visited: run.visited.len(),
        failed_urls: run.failed,
        report,
    })
}
