use a11ycrawl_scanner::ScanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid value for {field}: {reason}")]
    Config { field: String, reason: String },

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Could not serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub fn config(field: &str, reason: impl Into<String>) -> Self {
        CoreError::Config {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
