//! Crawl settings.
//!
//! Defaults reproduce the fixed constants the service has always used
//! (depth 3, 50 pages, 60 s per page, 200 ms between pages). Environment
//! variables override the defaults and command-line flags override both.

use crate::error::{CoreError, Result};
use a11ycrawl_scanner::crawler::{DEFAULT_PAGE_DELAY, DEFAULT_PAGE_TIMEOUT};
use a11ycrawl_scanner::{CrawlBudget, Crawler, ScopePolicy};
use std::time::Duration;
use tracing::debug;

pub const ENV_MAX_DEPTH: &str = "A11YCRAWL_MAX_DEPTH";
pub const ENV_MAX_PAGES: &str = "A11YCRAWL_MAX_PAGES";
pub const ENV_PAGE_TIMEOUT_SECS: &str = "A11YCRAWL_PAGE_TIMEOUT_SECS";
pub const ENV_PAGE_DELAY_MS: &str = "A11YCRAWL_PAGE_DELAY_MS";
pub const ENV_SCOPE: &str = "A11YCRAWL_SCOPE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSettings {
    pub budget: CrawlBudget,
    pub page_timeout: Duration,
    pub page_delay: Duration,
    pub scope: ScopePolicy,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            budget: CrawlBudget::default(),
            page_timeout: DEFAULT_PAGE_TIMEOUT,
            page_delay: DEFAULT_PAGE_DELAY,
            scope: ScopePolicy::Prefix,
        }
    }
}

impl CrawlSettings {
    /// Defaults with process environment overrides applied.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    ///
    /// Values that do not parse are ignored; the resulting settings are
    /// validated.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(depth) = parse_var::<usize>(&lookup, ENV_MAX_DEPTH) {
            self.budget.max_depth = depth;
        }
        if let Some(pages) = parse_var::<usize>(&lookup, ENV_MAX_PAGES) {
            self.budget.max_pages = pages;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, ENV_PAGE_TIMEOUT_SECS) {
            self.page_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, ENV_PAGE_DELAY_MS) {
            self.page_delay = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup(ENV_SCOPE) {
            match ScopePolicy::from_str(&raw) {
                Some(scope) => self.scope = scope,
                None => debug!("Ignoring {}={:?}: expected prefix or host", ENV_SCOPE, raw),
            }
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        CrawlBudget::new(self.budget.max_depth, self.budget.max_pages)
            .map_err(|e| CoreError::config("max_pages", e.to_string()))?;
        if self.page_timeout.is_zero() {
            return Err(CoreError::config("page_timeout", "must be greater than zero"));
        }
        Ok(())
    }

    /// A scheduler configured with these settings.
    pub fn crawler(&self) -> Crawler {
        Crawler::new(self.budget)
            .with_page_timeout(self.page_timeout)
            .with_page_delay(self.page_delay)
            .with_scope(self.scope)
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => {
            debug!("Override {} from env: {}", key, raw);
            Some(value)
        }
        Err(_) => {
            debug!("Ignoring unparseable {}={:?}", key, raw);
            None
        }
    }
}
