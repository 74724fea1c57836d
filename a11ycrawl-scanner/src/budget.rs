use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const DEFAULT_MAX_PAGES: usize = 50;

/// Limits applied to one crawl.
///
/// `max_depth` is the number of link hops from the seed that may still be
/// rendered; pages at exactly `max_depth` are audited but not expanded.
/// `max_pages` caps successfully audited pages only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlBudget {
    pub max_depth: usize,
    pub max_pages: usize,
}

impl CrawlBudget {
    pub fn new(max_depth: usize, max_pages: usize) -> Result<Self> {
        if max_pages == 0 {
            return Err(ScanError::InvalidBudget(
                "max_pages must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            max_depth,
            max_pages,
        })
    }
}

impl Default for CrawlBudget {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}
