//! Play mode domain type

use serde::{Deserialize, Serialize};

/// Policy governing next/prev index advancement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayMode {
    /// Wrap-around through the whole queue
    #[default]
    RepeatAll,

    /// Stay on the current track
    RepeatOne,

    /// Uniformly random next index
    Shuffle,
}

impl PlayMode {
    /// Advance to the next mode, cycling through all three
    pub fn cycle(self) -> Self {
        match self {
            PlayMode::RepeatAll => PlayMode::RepeatOne,
            PlayMode::RepeatOne => PlayMode::Shuffle,
            PlayMode::Shuffle => PlayMode::RepeatAll,
        }
    }
}
