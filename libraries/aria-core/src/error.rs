//! Core error types for Aria Player

use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Aria Player
#[derive(Error, Debug)]
pub enum CoreError {
    /// Stream resolution failed (network, parse, missing source)
    #[error("Stream resolution failed: {0}")]
    Resolution(String),

    /// Persistence load/save errors
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Caller passed malformed input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a resolution error
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}
