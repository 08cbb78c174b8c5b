//! Centralized error types for VIZZIO.

use thiserror::Error;

/// Main error type for relay operations.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Vocabulary error: {0}")]
    Vocabulary(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Relay request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Relay responded with status {0}")]
    UnexpectedStatus(u16),

    #[error("Relay did not acknowledge the notification")]
    NotAcknowledged,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

impl RelayError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
