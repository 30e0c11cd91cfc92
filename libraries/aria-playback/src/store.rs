//! Player state store
//!
//! Single owner of queue, play mode, volume, and progress. Mutations that
//! should start or change playback emit [`PlayerIntent`]s for the host to
//! forward to the controller; the store itself never touches the engine.
//!
//! Persisted fields (queue, pointer, mode, volume) are written through to the
//! configured persistence backend after every mutation that changes them.
//! Transient fields (playing flag, position, progress) are not persisted.

use crate::events::PlayerIntent;
use crate::queue::PlayQueue;
use crate::types::PlaybackConfig;
use aria_core::storage::PersistedPlayerState;
use aria_core::time::to_mmss;
use aria_core::traits::{PlayerStatePersistence, ResolvedStream};
use aria_core::types::{PlayMode, Track};
use tracing::{debug, warn};

/// Queue and playback state, decoupled from the audio engine
pub struct PlayerStore {
    queue: PlayQueue,
    play_mode: PlayMode,
    playing: bool,
    current_time_ms: u64,
    progress: f64,
    volume: f32,
    persistence: Option<Box<dyn PlayerStatePersistence>>,
    pending: Vec<PlayerIntent>,
}

impl PlayerStore {
    /// Create a store with an empty queue
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            queue: PlayQueue::new(),
            play_mode: PlayMode::default(),
            playing: false,
            current_time_ms: 0,
            progress: 0.0,
            volume: config.volume.clamp(0.0, 1.0),
            persistence: None,
            pending: Vec::new(),
        }
    }

    /// Attach a persistence backend; later mutations write through to it
    pub fn set_persistence(&mut self, persistence: Box<dyn PlayerStatePersistence>) {
        self.persistence = Some(persistence);
    }

    /// Restore queue, pointer, mode, and volume from the persistence backend
    ///
    /// Emits `SetVolume` plus a `Restore` intent for the current track so the
    /// controller can prime a session without starting playback. Returns
    /// `true` if a snapshot was found and applied.
    pub fn restore_persisted(&mut self) -> bool {
        let snapshot = match self.persistence.as_ref().map(|p| p.load()) {
            Some(Ok(Some(snapshot))) => snapshot,
            Some(Ok(None)) | None => return false,
            Some(Err(err)) => {
                warn!(error = %err, "failed to load persisted player state");
                return false;
            }
        };

        self.queue = PlayQueue::from_parts(snapshot.queue_tracks, snapshot.playing_index);
        self.play_mode = snapshot.play_mode;
        self.volume = snapshot.volume.clamp(0.0, 1.0);
        self.pending.push(PlayerIntent::SetVolume(self.volume));
        if let Some(track) = self.queue.current() {
            debug!(track = %track.title, "restored persisted queue");
            self.pending.push(PlayerIntent::Restore(track.clone()));
        }
        true
    }

    /// Append a track without changing what is playing
    ///
    /// Returns `false` if the track was already queued.
    pub fn add_track(&mut self, track: Track) -> bool {
        let added = self.queue.push_unique(track);
        if added {
            self.persist();
        }
        added
    }

    /// Append several tracks, skipping duplicates
    pub fn add_tracks(&mut self, tracks: Vec<Track>) {
        let mut changed = false;
        for track in tracks {
            changed |= self.queue.push_unique(track);
        }
        if changed {
            self.persist();
        }
    }

    /// Play a track now
    ///
    /// If it is already queued, the pointer jumps to it and any fresher
    /// transient fields carried by `track` are written onto the queued copy;
    /// otherwise it is inserted right after the current track and played from
    /// there.
    pub fn play_track(&mut self, track: Track) {
        let index = match self.queue.index_of(&track) {
            Some(index) => {
                if let Some(queued) = self.queue.get_mut(index) {
                    if track.url.is_some() {
                        queued.url = track.url;
                    }
                    if track.cover.is_some() {
                        queued.cover = track.cover;
                    }
                    if track.lyric.is_some() {
                        queued.lyric = track.lyric;
                    }
                }
                index
            }
            None => self.queue.insert_after_current(track),
        };
        self.queue.set_playing_index(index);
        self.play_current();
        self.persist();
    }

    /// Skip to the next track per the play mode
    pub fn play_next_track(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        self.queue.advance(self.play_mode);
        self.play_current();
        self.persist();
    }

    /// Skip to the previous track per the play mode
    pub fn play_prev_track(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        self.queue.retreat(self.play_mode);
        self.play_current();
        self.persist();
    }

    /// Remove a track from the queue
    ///
    /// The pointer shifts down with the removal, so it lands on the removed
    /// track's predecessor; if playback was active it then advances per the
    /// play mode and plays from there. Draining the queue stops playback.
    /// Returns `false` if the track was not queued.
    pub fn remove_track(&mut self, track: &Track) -> bool {
        let Some(removed) = self.queue.remove(track) else {
            return false;
        };

        if self.queue.is_empty() {
            self.reset_queue();
            return true;
        }

        if removed.was_current && self.playing {
            // A removed queue head has no predecessor to advance from; the
            // pointer is already on the new head, which the repeat modes play
            // as-is.
            if removed.index > 0 || self.play_mode == PlayMode::Shuffle {
                self.queue.advance(self.play_mode);
            }
            self.play_current();
        }
        self.persist();
        true
    }

    /// Drop the whole queue and stop playback
    pub fn reset_queue(&mut self) {
        self.queue.clear();
        self.playing = false;
        self.current_time_ms = 0;
        self.progress = 0.0;
        self.pending.push(PlayerIntent::Stop);
        self.persist();
    }

    /// Flip play/pause
    ///
    /// No-op on an empty queue. If the current track has no stream URL yet,
    /// skips forward instead of toggling a session that cannot exist.
    pub fn toggle_play(&mut self) {
        let Some(current) = self.queue.current() else {
            return;
        };
        if !current.has_url() {
            self.play_next_track();
            return;
        }
        self.pending.push(PlayerIntent::TogglePlay);
    }

    /// Cycle repeat-all -> repeat-one -> shuffle
    pub fn switch_play_mode(&mut self) -> PlayMode {
        self.play_mode = self.play_mode.cycle();
        self.persist();
        self.play_mode
    }

    /// Update position from a controller tick
    ///
    /// # Panics
    ///
    /// Panics if `seconds` is not a finite non-negative number.
    pub fn update_current_time(&mut self, seconds: f64) {
        assert!(
            seconds.is_finite() && seconds >= 0.0,
            "current time must be a finite non-negative number of seconds"
        );
        self.current_time_ms = (seconds * 1000.0) as u64;
        let duration_ms = self.queue.current().map_or(0, |t| t.duration_ms);
        self.progress = if duration_ms == 0 {
            0.0
        } else {
            (self.current_time_ms as f64 / duration_ms as f64).min(1.0)
        };
    }

    /// Set the volume, clamped to `[0.0, 1.0]`
    ///
    /// # Panics
    ///
    /// Panics if `volume` is not finite.
    pub fn update_volume(&mut self, volume: f32) {
        assert!(volume.is_finite(), "volume must be finite");
        self.volume = volume.clamp(0.0, 1.0);
        self.pending.push(PlayerIntent::SetVolume(self.volume));
        self.persist();
    }

    /// Nudge the volume by a signed offset, clamped to `[0.0, 1.0]`
    pub fn update_volume_by_offset(&mut self, offset: f32) {
        assert!(offset.is_finite(), "volume offset must be finite");
        self.update_volume(self.volume + offset);
    }

    /// Write resolved stream fields back onto the queued track
    pub fn attach_resolution(&mut self, track: &Track, resolved: &ResolvedStream) {
        let Some(index) = self.queue.index_of(track) else {
            return;
        };
        if let Some(queued) = self.queue.get_mut(index) {
            queued.url = Some(resolved.url.clone());
            if resolved.cover.is_some() {
                queued.cover = resolved.cover.clone();
            }
            if resolved.lyric.is_some() {
                queued.lyric = resolved.lyric.clone();
            }
        }
        self.persist();
    }

    /// Record whether audio is actually playing (fed back from controller events)
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Whether audio is currently playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The current track
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current()
    }

    /// Active play mode
    pub fn play_mode(&self) -> PlayMode {
        self.play_mode
    }

    /// Current volume in `[0.0, 1.0]`
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Progress through the current track in `[0.0, 1.0]`
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Position within the current track
    pub fn current_time_ms(&self) -> u64 {
        self.current_time_ms
    }

    /// Position within the current track as `mm:ss`
    pub fn mmss_current_time(&self) -> String {
        to_mmss(self.current_time_ms)
    }

    /// Number of queued tracks
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Current queue pointer
    pub fn playing_index(&self) -> Option<usize> {
        self.queue.playing_index()
    }

    /// All queued tracks in order
    pub fn tracks(&self) -> &[Track] {
        self.queue.tracks()
    }

    /// Take all pending intents, oldest first
    pub fn drain_intents(&mut self) -> Vec<PlayerIntent> {
        std::mem::take(&mut self.pending)
    }

    /// Emit the intent that starts playback of the current track
    fn play_current(&mut self) {
        self.current_time_ms = 0;
        self.progress = 0.0;
        let Some(track) = self.queue.current() else {
            return;
        };
        if track.has_url() {
            self.pending.push(PlayerIntent::Play(track.clone()));
        } else {
            self.pending.push(PlayerIntent::Resolve(track.clone()));
        }
    }

    /// Write persisted fields through to the backend, logging failures
    fn persist(&mut self) {
        let Some(persistence) = self.persistence.as_ref() else {
            return;
        };
        let state = PersistedPlayerState {
            playing_index: self.queue.playing_index(),
            play_mode: self.play_mode,
            queue_tracks: self.queue.tracks().to_vec(),
            volume: self.volume,
        };
        if let Err(err) = persistence.save(&state) {
            warn!(error = %err, "failed to persist player state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aria_core::types::Platform;

    fn track(id: &str) -> Track {
        Track::new(id, Platform::NetEase, format!("Track {}", id))
    }

    fn track_with_url(id: &str) -> Track {
        let mut t = track(id);
        t.url = Some(format!("https://example.com/{}.mp3", id));
        t
    }

    fn store() -> PlayerStore {
        PlayerStore::new(PlaybackConfig::default())
    }

    #[test]
    fn add_track_does_not_start_playback() {
        let mut store = store();
        assert!(store.add_track(track_with_url("1")));
        assert!(store.drain_intents().is_empty());
        assert_eq!(store.queue_len(), 1);
    }

    #[test]
    fn add_track_dedups() {
        let mut store = store();
        assert!(store.add_track(track("1")));
        assert!(!store.add_track(track("1")));
        assert_eq!(store.queue_len(), 1);
    }

    #[test]
    fn play_track_with_url_emits_play() {
        let mut store = store();
        let t = track_with_url("1");
        store.play_track(t.clone());

        assert_eq!(store.playing_index(), Some(0));
        assert_eq!(store.drain_intents(), vec![PlayerIntent::Play(t)]);
    }

    #[test]
    fn play_track_without_url_emits_resolve() {
        let mut store = store();
        let t = track("1");
        store.play_track(t.clone());

        assert_eq!(store.drain_intents(), vec![PlayerIntent::Resolve(t)]);
    }

    #[test]
    fn play_track_inserts_after_current() {
        let mut store = store();
        store.add_track(track_with_url("1"));
        store.add_track(track_with_url("2"));
        store.play_track(track_with_url("1"));
        store.drain_intents();

        store.play_track(track_with_url("3"));
        let ids: Vec<&str> = store.tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "2"]);
        assert_eq!(store.playing_index(), Some(1));
    }

    #[test]
    fn play_track_already_queued_jumps_to_it() {
        let mut store = store();
        store.add_track(track_with_url("1"));
        store.add_track(track_with_url("2"));

        store.play_track(track_with_url("2"));
        assert_eq!(store.queue_len(), 2);
        assert_eq!(store.playing_index(), Some(1));
    }

    #[test]
    fn play_track_refreshes_queued_transients() {
        let mut store = store();
        store.add_track(track("1"));

        // The caller's copy carries a freshly resolved URL the queued copy
        // does not have yet
        store.play_track(track_with_url("1"));

        assert!(store.current_track().unwrap().has_url());
        assert_eq!(
            store.drain_intents(),
            vec![PlayerIntent::Play(track_with_url("1"))]
        );
    }

    #[test]
    fn play_track_keeps_resolved_fields_on_bare_replay() {
        let mut store = store();
        store.add_track(track_with_url("1"));

        // Replaying with a bare identity copy must not wipe the resolved URL
        store.play_track(track("1"));

        assert!(store.current_track().unwrap().has_url());
        assert_eq!(
            store.drain_intents(),
            vec![PlayerIntent::Play(track_with_url("1"))]
        );
    }

    #[test]
    fn play_track_resets_position() {
        let mut store = store();
        store.play_track(track_with_url("1"));
        store.update_current_time(42.0);
        assert!(store.current_time_ms() > 0);

        store.play_track(track_with_url("2"));
        assert_eq!(store.current_time_ms(), 0);
        assert!(store.progress().abs() < f64::EPSILON);
    }

    #[test]
    fn next_and_prev_wrap_in_repeat_all() {
        let mut store = store();
        for id in ["1", "2", "3"] {
            store.add_track(track_with_url(id));
        }
        store.play_track(track_with_url("3"));
        store.drain_intents();

        store.play_next_track();
        assert_eq!(store.current_track().unwrap().id, "1");

        store.play_prev_track();
        assert_eq!(store.current_track().unwrap().id, "3");
    }

    #[test]
    fn next_on_empty_queue_is_noop() {
        let mut store = store();
        store.play_next_track();
        store.play_prev_track();
        assert!(store.drain_intents().is_empty());
    }

    #[test]
    fn remove_playing_current_plays_successor() {
        let mut store = store();
        store.add_track(track_with_url("1"));
        store.add_track(track_with_url("2"));
        store.play_track(track_with_url("1"));
        store.set_playing(true);
        store.drain_intents();

        store.remove_track(&track("1"));
        assert_eq!(store.current_track().unwrap().id, "2");
        let intents = store.drain_intents();
        assert_eq!(intents, vec![PlayerIntent::Play(track_with_url("2"))]);
    }

    #[test]
    fn remove_current_repeat_one_plays_predecessor() {
        let mut store = store();
        for id in ["1", "2", "3"] {
            store.add_track(track_with_url(id));
        }
        store.switch_play_mode();
        assert_eq!(store.play_mode(), PlayMode::RepeatOne);
        store.play_track(track_with_url("2"));
        store.set_playing(true);
        store.drain_intents();

        store.remove_track(&track("2"));
        assert_eq!(store.current_track().unwrap().id, "1");
        assert_eq!(
            store.drain_intents(),
            vec![PlayerIntent::Play(track_with_url("1"))]
        );
    }

    #[test]
    fn remove_current_mid_queue_plays_successor_in_repeat_all() {
        let mut store = store();
        for id in ["1", "2", "3"] {
            store.add_track(track_with_url(id));
        }
        store.play_track(track_with_url("2"));
        store.set_playing(true);
        store.drain_intents();

        store.remove_track(&track("2"));
        assert_eq!(store.current_track().unwrap().id, "3");
        assert_eq!(
            store.drain_intents(),
            vec![PlayerIntent::Play(track_with_url("3"))]
        );
    }

    #[test]
    fn remove_current_while_paused_points_at_predecessor() {
        let mut store = store();
        for id in ["1", "2", "3"] {
            store.add_track(track_with_url(id));
        }
        store.play_track(track_with_url("2"));
        store.drain_intents();

        store.remove_track(&track("2"));
        assert_eq!(store.current_track().unwrap().id, "1");
        assert!(store.drain_intents().is_empty());
    }

    #[test]
    fn remove_non_current_keeps_playback() {
        let mut store = store();
        store.add_track(track_with_url("1"));
        store.add_track(track_with_url("2"));
        store.play_track(track_with_url("1"));
        store.set_playing(true);
        store.drain_intents();

        store.remove_track(&track("2"));
        assert!(store.drain_intents().is_empty());
        assert_eq!(store.current_track().unwrap().id, "1");
    }

    #[test]
    fn remove_last_track_stops() {
        let mut store = store();
        store.play_track(track_with_url("1"));
        store.set_playing(true);
        store.drain_intents();

        store.remove_track(&track("1"));
        assert!(store.current_track().is_none());
        assert!(!store.is_playing());
        assert_eq!(store.drain_intents(), vec![PlayerIntent::Stop]);
    }

    #[test]
    fn toggle_play_on_empty_queue_is_noop() {
        let mut store = store();
        store.toggle_play();
        assert!(store.drain_intents().is_empty());
    }

    #[test]
    fn toggle_play_emits_toggle_when_url_present() {
        let mut store = store();
        store.play_track(track_with_url("1"));
        store.drain_intents();

        store.toggle_play();
        assert_eq!(store.drain_intents(), vec![PlayerIntent::TogglePlay]);
    }

    #[test]
    fn toggle_play_without_url_skips_forward() {
        let mut store = store();
        store.add_track(track("1"));
        store.add_track(track_with_url("2"));
        store.play_track(track("1"));
        store.drain_intents();

        store.toggle_play();
        assert_eq!(store.current_track().unwrap().id, "2");
        assert_eq!(
            store.drain_intents(),
            vec![PlayerIntent::Play(track_with_url("2"))]
        );
    }

    #[test]
    fn switch_play_mode_cycles() {
        let mut store = store();
        assert_eq!(store.play_mode(), PlayMode::RepeatAll);
        assert_eq!(store.switch_play_mode(), PlayMode::RepeatOne);
        assert_eq!(store.switch_play_mode(), PlayMode::Shuffle);
        assert_eq!(store.switch_play_mode(), PlayMode::RepeatAll);
    }

    #[test]
    fn update_current_time_tracks_progress() {
        let mut store = store();
        let mut t = track_with_url("1");
        t.duration_ms = 200_000;
        store.play_track(t);

        store.update_current_time(100.0);
        assert_eq!(store.current_time_ms(), 100_000);
        assert!((store.progress() - 0.5).abs() < 1e-9);
        assert_eq!(store.mmss_current_time(), "01:40");
    }

    #[test]
    fn progress_is_zero_for_unknown_duration() {
        let mut store = store();
        store.play_track(track_with_url("1"));
        store.update_current_time(30.0);
        assert!(store.progress().abs() < f64::EPSILON);
    }

    #[test]
    #[should_panic(expected = "finite")]
    fn update_current_time_rejects_nan() {
        let mut store = store();
        store.update_current_time(f64::NAN);
    }

    #[test]
    fn update_volume_clamps_and_emits() {
        let mut store = store();
        store.update_volume(1.5);
        assert!((store.volume() - 1.0).abs() < f32::EPSILON);
        assert_eq!(store.drain_intents(), vec![PlayerIntent::SetVolume(1.0)]);

        store.update_volume_by_offset(-0.3);
        assert!((store.volume() - 0.7).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "finite")]
    fn update_volume_rejects_nan() {
        let mut store = store();
        store.update_volume(f32::NAN);
    }

    #[test]
    fn attach_resolution_fills_track_fields() {
        let mut store = store();
        store.play_track(track("1"));
        store.drain_intents();

        let mut resolved = ResolvedStream::from_url("https://example.com/1.mp3");
        resolved.cover = Some("https://example.com/1.jpg".to_string());
        store.attach_resolution(&track("1"), &resolved);

        let current = store.current_track().unwrap();
        assert_eq!(current.url.as_deref(), Some("https://example.com/1.mp3"));
        assert_eq!(current.cover.as_deref(), Some("https://example.com/1.jpg"));
    }

    #[test]
    fn attach_resolution_ignores_unqueued_track() {
        let mut store = store();
        store.play_track(track("1"));
        store.drain_intents();

        let resolved = ResolvedStream::from_url("https://example.com/404.mp3");
        store.attach_resolution(&track("404"), &resolved);
        assert!(store.current_track().unwrap().url.is_none());
    }
}
