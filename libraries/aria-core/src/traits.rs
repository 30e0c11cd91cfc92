//! Collaborator traits for Aria Player

use crate::error::Result;
use crate::storage::PersistedPlayerState;
use crate::types::{Lyric, Track};
use async_trait::async_trait;

/// Result of resolving a track into a playable stream source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStream {
    /// Playable stream URL
    pub url: String,

    /// Cover image URL, when the vendor returns a better one than cached
    pub cover: Option<String>,

    /// Timed lyrics, when the vendor returns them alongside the stream
    pub lyric: Option<Lyric>,
}

impl ResolvedStream {
    /// Create a resolved stream carrying only a URL
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cover: None,
            lyric: None,
        }
    }
}

/// Vendor collaborator that turns a track reference into playable audio
///
/// Implementations wrap the per-platform API clients. The playback core treats
/// every failure identically (it feeds the retry policy), so implementations
/// should map vendor-specific failures into `CoreError::Resolution`.
#[async_trait]
pub trait StreamResolver: Send + Sync {
    /// Resolve a playable stream URL (plus optional cover/lyric) for a track
    async fn resolve(&self, track: &Track) -> Result<ResolvedStream>;

    /// Fetch the raw audio bytes behind a resolved URL
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// Persistence collaborator for the player state
///
/// Opaque load/save of the serialized queue snapshot. The store writes through
/// on every mutation of persisted fields; save failures are logged by the
/// caller, never propagated.
pub trait PlayerStatePersistence: Send {
    /// Load the previously saved state, if any
    fn load(&self) -> Result<Option<PersistedPlayerState>>;

    /// Save the current state, replacing any previous snapshot
    fn save(&self, state: &PersistedPlayerState) -> Result<()>;
}
