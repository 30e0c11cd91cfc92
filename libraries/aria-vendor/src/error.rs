//! Error types for stream fetching

use thiserror::Error;

/// Errors that can occur while resolving or fetching streams.
#[derive(Error, Debug)]
pub enum VendorError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Remote host returned an error response
    #[error("Stream host error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid stream URL
    #[error("Invalid stream URL: {0}")]
    InvalidUrl(String),

    /// No playable source available for the track
    #[error("No playable source for track {0}")]
    NoSource(String),

    /// Remote host is offline or unreachable
    #[error("Stream host unreachable: {0}")]
    Unreachable(String),

    /// IO error while reading the response body
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<VendorError> for aria_core::CoreError {
    fn from(err: VendorError) -> Self {
        aria_core::CoreError::resolution(err.to_string())
    }
}

/// Result type for vendor operations.
pub type Result<T> = std::result::Result<T, VendorError>;
