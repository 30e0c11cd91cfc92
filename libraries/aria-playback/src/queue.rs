//! Play queue with current-track pointer
//!
//! Ordered sequence of tracks, duplicates disallowed by track identity.
//! Invariant: `playing_index` is either `None` (no current track yet, always
//! the case on an empty queue) or `Some(i)` with `i < len`. Out-of-range
//! computed indices are repaired by clamping, never surfaced as errors.

use aria_core::types::{PlayMode, Track};
use rand::Rng;
use tracing::warn;

/// Outcome of removing a track from the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedTrack {
    /// Position the track occupied before removal
    pub index: usize,

    /// Whether the removed track was the current one
    pub was_current: bool,
}

/// Ordered play queue plus the pointer to the current track
#[derive(Debug, Clone, Default)]
pub struct PlayQueue {
    tracks: Vec<Track>,
    playing_index: Option<usize>,
}

impl PlayQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a queue from persisted parts, repairing any invalid index
    pub fn from_parts(tracks: Vec<Track>, playing_index: Option<usize>) -> Self {
        let mut queue = Self {
            tracks,
            playing_index,
        };
        queue.repair_index();
        queue
    }

    /// Number of tracks in the queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// All tracks, in queue order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Track at the given index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Index of the current track; `None` while nothing has been made current
    pub fn playing_index(&self) -> Option<usize> {
        self.playing_index
    }

    /// The current track
    pub fn current(&self) -> Option<&Track> {
        self.playing_index.and_then(|i| self.tracks.get(i))
    }

    /// Find a track by identity
    pub fn index_of(&self, track: &Track) -> Option<usize> {
        self.tracks.iter().position(|t| t == track)
    }

    /// Check whether a track is queued
    pub fn contains(&self, track: &Track) -> bool {
        self.index_of(track).is_some()
    }

    /// Append a track unless it is already queued
    ///
    /// Returns `true` if the track was added. Never moves `playing_index`.
    pub fn push_unique(&mut self, track: Track) -> bool {
        if self.contains(&track) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Insert a track immediately after the current one
    ///
    /// Returns the index it landed at (0 for an empty queue).
    pub fn insert_after_current(&mut self, track: Track) -> usize {
        let index = match self.playing_index {
            Some(i) => i + 1,
            None => 0,
        };
        let index = index.min(self.tracks.len());
        self.tracks.insert(index, track);
        index
    }

    /// Point the queue at the given index, repairing out-of-range values
    pub fn set_playing_index(&mut self, index: usize) {
        self.playing_index = Some(index);
        self.repair_index();
    }

    /// Advance the pointer according to the play mode
    ///
    /// RepeatAll wraps, RepeatOne stays put, Shuffle picks a uniformly random
    /// index in `[0, len)`. Returns the resulting current track.
    pub fn advance(&mut self, mode: PlayMode) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        let len = self.tracks.len();
        let next = match mode {
            PlayMode::RepeatAll => match self.playing_index {
                Some(i) => (i + 1) % len,
                None => 0,
            },
            PlayMode::RepeatOne => self.playing_index.unwrap_or(0),
            PlayMode::Shuffle => rand::thread_rng().gen_range(0..len),
        };
        self.playing_index = Some(next);
        self.repair_index();
        self.current()
    }

    /// Retreat the pointer according to the play mode
    ///
    /// RepeatAll wraps backwards, RepeatOne stays put, Shuffle picks a new
    /// random index (same policy as advancing).
    pub fn retreat(&mut self, mode: PlayMode) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        let len = self.tracks.len();
        let prev = match mode {
            PlayMode::RepeatAll => match self.playing_index {
                Some(i) if i > 0 => i - 1,
                _ => len - 1,
            },
            PlayMode::RepeatOne => self.playing_index.unwrap_or(0),
            PlayMode::Shuffle => rand::thread_rng().gen_range(0..len),
        };
        self.playing_index = Some(prev);
        self.repair_index();
        self.current()
    }

    /// Remove a track by identity, fixing up the pointer
    ///
    /// Removing a track at or before the current one shifts the pointer down
    /// with it, clamped at the queue start, so removing the current track
    /// leaves the pointer on its predecessor. Returns `None` if the track was
    /// not queued.
    pub fn remove(&mut self, track: &Track) -> Option<RemovedTrack> {
        let index = self.index_of(track)?;
        let was_current = self.playing_index == Some(index);
        self.tracks.remove(index);

        if self.tracks.is_empty() {
            self.playing_index = None;
        } else if let Some(current) = self.playing_index {
            if index <= current {
                self.playing_index = Some(current.saturating_sub(1));
            }
        }

        Some(RemovedTrack { index, was_current })
    }

    /// Drop all tracks and reset the pointer
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.playing_index = None;
    }

    /// Mutable access to a queued track (for attaching resolved fields)
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Track> {
        self.tracks.get_mut(index)
    }

    /// Clamp the pointer back into range
    ///
    /// Defensive invariant repair: a computed index outside `[0, len)` is a
    /// bug upstream, not a caller-visible fault, so it is logged and clamped.
    /// `None` is a legitimate state (nothing made current yet) and is left
    /// alone on a non-empty queue.
    fn repair_index(&mut self) {
        if self.tracks.is_empty() {
            if self.playing_index.is_some() {
                warn!("playing_index set on empty queue, resetting");
                self.playing_index = None;
            }
            return;
        }

        if let Some(i) = self.playing_index {
            if i >= self.tracks.len() {
                warn!(
                    index = i,
                    len = self.tracks.len(),
                    "playing_index out of bounds, clamping"
                );
                self.playing_index = Some(self.tracks.len() - 1);
            }
        }
    }
}
