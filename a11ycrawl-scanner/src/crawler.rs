use crate::audit::AuditResult;
use crate::budget::CrawlBudget;
use crate::error::{Result, ScanError};
use crate::normalize::{ScopePolicy, resolve};
use crate::renderer::Renderer;
use crate::result::{CrawlEvent, CrawlRun, PageResult};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub type ProgressCallback = Arc<dyn Fn(CrawlEvent) + Send + Sync>;

pub const DEFAULT_PAGE_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
struct FrontierEntry {
    url: String,
    depth: usize,
}

/// Sequential, depth-first crawl scheduler.
///
/// The frontier is a stack: the most recently discovered link is audited
/// next. Pages are processed one at a time with a fixed pause between them.
pub struct Crawler {
    budget: CrawlBudget,
    page_timeout: Duration,
    page_delay: Duration,
    scope: ScopePolicy,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new(budget: CrawlBudget) -> Self {
        Self {
            budget,
            page_timeout: DEFAULT_PAGE_TIMEOUT,
            page_delay: DEFAULT_PAGE_DELAY,
            scope: ScopePolicy::Prefix,
            progress_callback: None,
        }
    }

    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = timeout;
        self
    }

    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    pub fn with_scope(mut self, scope: ScopePolicy) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn budget(&self) -> CrawlBudget {
        self.budget
    }

    /// Crawl from `base_url` and release the renderer afterwards.
    ///
    /// Per-page failures never surface here; only a failure to close the
    /// rendering context does.
    pub async fn crawl<R: Renderer>(&self, mut renderer: R, base_url: &str) -> Result<CrawlRun> {
        info!(
            "Starting crawl of {} (max depth {}, max pages {})",
            base_url, self.budget.max_depth, self.budget.max_pages
        );

        let run = self.traverse(&mut renderer, base_url).await;
        renderer.close().await?;

        info!(
            "Crawl complete. Audited {} of {} visited pages ({} failed)",
            run.pages.len(),
            run.visited.len(),
            run.failed.len()
        );
        Ok(run)
    }

    async fn traverse<R: Renderer>(&self, renderer: &mut R, base_url: &str) -> CrawlRun {
        let mut visited: HashSet<String> = HashSet::new();
        let mut pages: Vec<PageResult> = Vec::new();
        let mut failed: Vec<String> = Vec::new();
        let mut frontier = vec![FrontierEntry {
            url: base_url.to_string(),
            depth: 0,
        }];

        while pages.len() < self.budget.max_pages {
            let Some(FrontierEntry { url, depth }) = frontier.pop() else {
                break;
            };

            if visited.contains(&url) {
                continue;
            }
            visited.insert(url.clone());

            debug!("Visiting [depth {}]: {}", depth, url);
            self.emit(CrawlEvent::Visiting {
                url: url.clone(),
                depth,
            });

            let rendered = match self.audit_page(renderer, &url).await {
                Ok(audit) => {
                    self.emit(CrawlEvent::Audited {
                        url: url.clone(),
                        violations: audit.violations.len(),
                    });
                    pages.push(PageResult::new(url.clone(), audit));
                    true
                }
                Err(e) => {
                    warn!("Accessibility check failed for {}: {}", url, e);
                    self.emit(CrawlEvent::Failed {
                        url: url.clone(),
                        reason: e.to_string(),
                    });
                    failed.push(url.clone());
                    false
                }
            };

            if rendered && depth < self.budget.max_depth {
                match renderer.extract_links().await {
                    Ok(links) => {
                        for href in links {
                            let Some(resolved) = resolve(&url, &href) else {
                                debug!("  -> Unresolvable href {:?}, skipping", href);
                                continue;
                            };
                            if visited.contains(&resolved) {
                                continue;
                            }
                            if !self.scope.in_scope(&resolved, base_url) {
                                debug!("  -> Out of scope: {}", resolved);
                                continue;
                            }
                            frontier.push(FrontierEntry {
                                url: resolved,
                                depth: depth + 1,
                            });
                        }
                    }
                    Err(e) => {
                        warn!("Could not extract links from {}: {}", url, e);
                    }
                }
            }

            tokio::time::sleep(self.page_delay).await;
        }

        CrawlRun {
            pages,
            visited,
            failed,
            frontier_remaining: frontier.len(),
        }
    }

    async fn audit_page<R: Renderer>(&self, renderer: &mut R, url: &str) -> Result<AuditResult> {
        tokio::time::timeout(self.page_timeout, renderer.render_and_audit(url))
            .await
            .map_err(|_| ScanError::Timeout {
                url: url.to_string(),
                timeout: self.page_timeout,
            })?
    }

    fn emit(&self, event: CrawlEvent) {
        if let Some(ref callback) = self.progress_callback {
            callback(event);
        }
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new(CrawlBudget::default())
    }
}
