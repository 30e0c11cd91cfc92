//! Domain types for Aria Player

mod player;
mod track;

pub use player::PlayMode;
pub use track::{Album, Artist, Lyric, LyricLine, Platform, Track};
