use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Script evaluation failed: {0}")]
    Evaluation(String),

    #[error("Page {url} did not finish within {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("Could not decode audit result: {0}")]
    AuditDecode(#[from] serde_json::Error),

    #[error("Invalid crawl budget: {0}")]
    InvalidBudget(String),

    #[error("Could not load axe-core script: {0}")]
    AxeScript(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<chromiumoxide::error::CdpError> for ScanError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        ScanError::Browser(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
