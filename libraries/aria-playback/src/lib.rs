//! Aria Player - Playback Core
//!
//! Queue/state synchronization and playback control for Aria Player.
//!
//! This crate provides:
//! - Persistent play queue with current-track pointer (dedup by track identity)
//! - Play modes (repeat-all, repeat-one, shuffle)
//! - Typed intents from the store and typed events from the controller
//! - Single live audio session with teardown-before-construct ordering
//! - Retry-on-failure policy for resolution and engine errors
//! - FIFO blob cache for recently fetched remote streams
//! - Explicit position/frequency sampling tick for visualization
//!
//! # Architecture
//!
//! Two cooperating components:
//! - [`PlayerStore`] owns the queue, play mode, volume, and progress. It never
//!   talks to the audio engine; it emits [`PlayerIntent`]s.
//! - [`PlaybackController`] owns at most one live [`AudioSession`], resolves
//!   tracks into playable sources via `aria_core::StreamResolver`, and
//!   republishes engine lifecycle events as [`PlaybackEvent`]s.
//!
//! Platform-specific audio output is provided via the [`AudioEngine`] trait.
//!
//! # Example: Queue Mutations
//!
//! ```rust
//! use aria_playback::{PlayerIntent, PlayerStore, PlaybackConfig};
//! use aria_core::types::{Platform, Track};
//!
//! let mut store = PlayerStore::new(PlaybackConfig::default());
//!
//! let mut track = Track::new("t1", Platform::NetEase, "My Song");
//! track.url = Some("https://example.com/t1.mp3".to_string());
//!
//! store.play_track(track.clone());
//! assert_eq!(store.queue_len(), 1);
//! assert_eq!(store.playing_index(), Some(0));
//!
//! // The controller consumes the emitted intent
//! let intents = store.drain_intents();
//! assert_eq!(intents, vec![PlayerIntent::Play(track)]);
//! ```
//!
//! # Example: Driving the Controller
//!
//! ```rust,ignore
//! // Host event loop: forward intents, drain events, tick while playing.
//! for intent in store.drain_intents() {
//!     controller.handle_intent(intent).await;
//! }
//! for event in controller.drain_events() {
//!     match event {
//!         PlaybackEvent::StateChanged { state } => ui.show_state(state),
//!         PlaybackEvent::Position { position_ms, .. } => ui.show_position(position_ms),
//!         _ => {}
//!     }
//! }
//! while controller.tick() {
//!     next_frame().await;
//! }
//! ```

mod cache;
mod controller;
pub mod engine;
mod error;
pub mod events;
mod queue;
mod store;
pub mod types;

// Public exports
pub use cache::StreamCache;
pub use controller::PlaybackController;
pub use engine::{AudioEngine, AudioSession, EngineEvent, StreamSource};
pub use error::{PlaybackError, Result};
pub use events::{PlaybackEvent, PlayerIntent};
pub use queue::{PlayQueue, RemovedTrack};
pub use store::PlayerStore;
pub use types::{PlayState, PlaybackConfig};

pub use aria_core::types::PlayMode;
