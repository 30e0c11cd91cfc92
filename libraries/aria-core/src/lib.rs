//! Aria Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Aria Player.
//!
//! This crate provides the foundational building blocks shared by the playback
//! core and the vendor integrations:
//! - **Domain Types**: `Track`, `Platform`, `Artist`, `Album`, `Lyric`, `PlayMode`
//! - **Collaborator Traits**: `StreamResolver`, `PlayerStatePersistence`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//! - **Persistence**: serialized player state + JSON-file implementation
//!
//! # Example
//!
//! ```rust
//! use aria_core::types::{Platform, Track};
//!
//! let mut track = Track::new("003OUlho2HcRHC", Platform::Qq, "晴天");
//! track.duration_ms = 269_000;
//!
//! // Identity is (id, platform); metadata does not participate in equality.
//! let same = Track::new("003OUlho2HcRHC", Platform::Qq, "晴天 (Live)");
//! assert_eq!(track, same);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod time;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use storage::{JsonStatePersistence, PersistedPlayerState};
pub use traits::{PlayerStatePersistence, ResolvedStream, StreamResolver};
pub use types::{Album, Artist, Lyric, LyricLine, PlayMode, Platform, Track};
