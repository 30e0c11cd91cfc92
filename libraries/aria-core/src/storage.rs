//! Persisted player state and the JSON-file persistence implementation

use crate::error::{CoreError, Result};
use crate::traits::PlayerStatePersistence;
use crate::types::{PlayMode, Track};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Serialized snapshot of the queue/state store
///
/// Tracks serialize without their transient `url`/`lyric` fields, so a restored
/// queue always goes through resolution again before playing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedPlayerState {
    /// Index of the current track; `None` when nothing was current
    pub playing_index: Option<usize>,

    /// Play mode at shutdown
    pub play_mode: PlayMode,

    /// Queue contents, in order
    pub queue_tracks: Vec<Track>,

    /// Volume in `[0.0, 1.0]`
    pub volume: f32,
}

impl Default for PersistedPlayerState {
    fn default() -> Self {
        Self {
            playing_index: None,
            play_mode: PlayMode::default(),
            queue_tracks: Vec::new(),
            volume: 0.5,
        }
    }
}

/// File-backed persistence using a single JSON document
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-save leaves the previous snapshot intact.
pub struct JsonStatePersistence {
    path: PathBuf,
}

impl JsonStatePersistence {
    /// Create persistence backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl PlayerStatePersistence for JsonStatePersistence {
    fn load(&self) -> Result<Option<PersistedPlayerState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&self.path)?;
        let state: PersistedPlayerState = serde_json::from_str(&data)?;
        debug!(
            path = %self.path.display(),
            tracks = state.queue_tracks.len(),
            "Loaded persisted player state"
        );
        Ok(Some(state))
    }

    fn save(&self, state: &PersistedPlayerState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            CoreError::persistence(format!(
                "failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(())
    }
}
