//! Error types shared across the audiobook workspace

use thiserror::Error;

/// Result type alias for audiobook operations
pub type Result<T> = std::result::Result<T, AudiobookError>;

/// Errors that are not tied to a single HTTP feature
#[derive(Error, Debug)]
pub enum AudiobookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidSetting { key: String, value: String },

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl AudiobookError {
    /// Create an error for an environment setting that failed to parse
    pub fn invalid_setting(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            value: value.into(),
        }
    }
}
