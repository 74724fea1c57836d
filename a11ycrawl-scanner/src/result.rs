use crate::audit::AuditResult;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One successfully audited page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    pub url: String,
    pub audit: AuditResult,
}

impl PageResult {
    pub fn new(url: String, audit: AuditResult) -> Self {
        Self { url, audit }
    }
}

/// Everything a single crawl invocation produced.
#[derive(Debug, Clone, Default)]
pub struct CrawlRun {
    /// Audited pages in the order they were collected.
    pub pages: Vec<PageResult>,
    /// Every URL that was dequeued, including the ones that failed.
    pub visited: HashSet<String>,
    /// URLs whose render or audit failed, in visit order.
    pub failed: Vec<String>,
    /// Frontier entries left unprocessed when the page budget ran out.
    pub frontier_remaining: usize,
}

/// Progress notifications emitted while crawling.
#[derive(Debug, Clone, PartialEq)]
pub enum CrawlEvent {
    Visiting { url: String, depth: usize },
    Audited { url: String, violations: usize },
    Failed { url: String, reason: String },
}
