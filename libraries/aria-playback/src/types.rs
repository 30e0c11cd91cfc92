//! Core types for the playback core

use serde::{Deserialize, Serialize};

/// Playback state published to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayState {
    /// No live session
    Stopped,

    /// Resolving/loading a track
    Loading,

    /// Audio is playing
    Playing,

    /// Paused mid-track
    Paused,

    /// Current track reached its end
    Ended,
}

/// Configuration for the playback core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume in `[0.0, 1.0]` (default: 0.5)
    pub volume: f32,

    /// Extra play attempts before an error becomes final (default: 1)
    pub retry_limit: u32,

    /// Stream blob cache capacity (default: 20)
    pub cache_capacity: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 0.5,
            retry_limit: 1,
            cache_capacity: 20,
        }
    }
}
