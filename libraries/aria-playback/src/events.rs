//! Typed events for cross-component signaling
//!
//! The store and the controller never call each other directly. The store
//! emits [`PlayerIntent`]s that the host forwards to the controller; the
//! controller emits [`PlaybackEvent`]s that the host forwards to the UI (and
//! back into the store for `StateChanged`/`TrackResolved`).

use crate::types::PlayState;
use aria_core::types::Track;

/// Intents emitted by the queue/state store, consumed by the playback controller
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerIntent {
    /// Play this track; it already carries a stream URL
    Play(Track),

    /// The current track changed but has no stream URL yet; the controller
    /// must resolve one before playing
    Resolve(Track),

    /// Prime a session for this track without starting playback
    /// (startup restore of the persisted queue)
    Restore(Track),

    /// Flip play/pause on the live session
    TogglePlay,

    /// Queue drained; release the live session
    Stop,

    /// Volume changed; apply to the engine
    SetVolume(f32),
}

/// Events republished by the playback controller
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// Playback state changed (from engine lifecycle callbacks)
    StateChanged {
        /// The new playback state
        state: PlayState,
    },

    /// Position update from the sampling tick
    Position {
        /// Current playback position
        position_ms: u64,
        /// Total track duration
        duration_ms: u64,
    },

    /// Frequency-domain snapshot for visualization
    FrequencySnapshot {
        /// One byte per analyser bin
        bins: Vec<u8>,
    },

    /// Resolution attached a stream URL (and possibly cover/lyric) to a track;
    /// the host should feed this back into `PlayerStore::attach_resolution`
    TrackResolved {
        /// The track with resolved fields attached
        track: Track,
    },

    /// A resolution or engine failure surfaced through the retry policy
    PlaybackError {
        /// The track that failed, when one was current
        track: Option<Track>,
        /// Whether attempts remain (`true`) or the error is final (`false`)
        retryable: bool,
    },

    /// Volume was applied to the engine
    VolumeChanged {
        /// New volume in `[0.0, 1.0]`
        volume: f32,
    },
}
