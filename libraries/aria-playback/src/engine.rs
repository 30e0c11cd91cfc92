//! Audio engine abstraction
//!
//! Platform audio output sits behind [`AudioEngine`]. The controller opens at
//! most one [`AudioSession`] at a time and drives it through this trait, so
//! the playback core stays testable without a sound device.

use crate::error::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// A playable source handed to the engine
#[derive(Debug, Clone)]
pub enum StreamSource {
    /// Local file path
    File(PathBuf),

    /// In-memory audio bytes (fetched remote stream)
    Memory(Arc<Vec<u8>>),
}

/// Lifecycle events reported by the engine for the live session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Audio output started
    Started,

    /// Audio output paused
    Paused,

    /// The source played to its end
    Ended,

    /// The engine could not decode or load the source
    LoadError(String),

    /// The engine could not start output
    PlayError(String),
}

/// A live handle to one loaded source
pub trait AudioSession {
    /// Start or resume output
    fn play(&mut self) -> Result<()>;

    /// Pause output, keeping the position
    fn pause(&mut self);

    /// Stop output and rewind
    fn stop(&mut self);

    /// Jump to an absolute position
    fn seek(&mut self, position: Duration);

    /// Total duration of the loaded source
    fn duration(&self) -> Duration;

    /// Current output position
    fn position(&self) -> Duration;

    /// Whether audio is currently being produced
    fn is_playing(&self) -> bool;

    /// Release decoder and device resources
    fn unload(&mut self);
}

/// Platform audio backend
pub trait AudioEngine {
    /// Session type produced by this engine
    type Session: AudioSession;

    /// Load a source and return a session for it
    fn open(&mut self, source: StreamSource) -> Result<Self::Session>;

    /// Apply a global output volume in `[0.0, 1.0]`
    fn set_volume(&mut self, volume: f32);

    /// Apply equalizer band gains, in dB per band
    fn update_eq(&mut self, gains: &[f32]);

    /// Latest frequency-domain snapshot, one byte per bin
    ///
    /// `None` when the backend has no analyser.
    fn frequency_snapshot(&mut self) -> Option<Vec<u8>>;
}
