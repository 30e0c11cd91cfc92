//! Error types for the playback core

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Stream URL fetch/conversion failed
    #[error("Stream resolution failed: {0}")]
    Resolution(String),

    /// Engine rejected the source
    #[error("Engine failed to load source: {0}")]
    EngineLoad(String),

    /// Engine rejected playback start
    #[error("Engine failed to start playback: {0}")]
    EnginePlay(String),

    /// No live playback session
    #[error("No live playback session")]
    NoSession,

    /// Core error passthrough
    #[error(transparent)]
    Core(#[from] aria_core::CoreError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
