//! Playback controller
//!
//! Owns at most one live audio session. Consumes [`PlayerIntent`]s from the
//! store, resolves tracks into playable sources, drives the engine, and
//! republishes engine lifecycle as [`PlaybackEvent`]s. Session changes always
//! tear down the previous session before constructing the next one.

use crate::cache::StreamCache;
use crate::engine::{AudioEngine, AudioSession, EngineEvent, StreamSource};
use crate::error::{PlaybackError, Result};
use crate::events::{PlaybackEvent, PlayerIntent};
use crate::types::{PlayState, PlaybackConfig};
use aria_core::traits::StreamResolver;
use aria_core::types::Track;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Position/frequency sampling gate
///
/// Armed while the engine reports output, disarmed on pause, end, or error.
/// `tick` only samples while armed, so the host can stop its frame loop the
/// first time `tick` returns `false`.
#[derive(Debug, Default)]
struct Sampler {
    armed: bool,
}

impl Sampler {
    fn arm(&mut self) {
        self.armed = true;
    }

    fn disarm(&mut self) {
        self.armed = false;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Single-session playback controller
pub struct PlaybackController<E: AudioEngine> {
    engine: E,
    resolver: Arc<dyn StreamResolver>,
    session: Option<E::Session>,
    current: Option<Track>,
    cache: StreamCache,
    retry: u32,
    retry_limit: u32,
    sampler: Sampler,
    context_ready: bool,
    pending: Vec<PlaybackEvent>,
}

impl<E: AudioEngine> PlaybackController<E> {
    /// Create a controller around an engine and a stream resolver
    pub fn new(engine: E, resolver: Arc<dyn StreamResolver>, config: &PlaybackConfig) -> Self {
        Self {
            engine,
            resolver,
            session: None,
            current: None,
            cache: StreamCache::new(config.cache_capacity),
            retry: 0,
            retry_limit: config.retry_limit,
            sampler: Sampler::default(),
            context_ready: false,
            pending: Vec::new(),
        }
    }

    /// Dispatch one intent from the store
    pub async fn handle_intent(&mut self, intent: PlayerIntent) {
        match intent {
            PlayerIntent::Play(track) => self.play_track(track).await,
            PlayerIntent::Resolve(track) => self.resolve_and_play(track).await,
            PlayerIntent::Restore(track) => self.restore(track).await,
            PlayerIntent::TogglePlay => self.toggle_play(),
            PlayerIntent::Stop => self.set_current(None).await,
            PlayerIntent::SetVolume(volume) => self.set_volume(volume),
        }
    }

    /// Swap the current track, tearing the old session down first
    ///
    /// With `Some(track)` carrying a stream URL this opens a fresh session but
    /// does not start output. With `None` or a URL-less track the controller
    /// goes idle.
    pub async fn set_current(&mut self, track: Option<Track>) {
        self.release_session();
        self.current = track;

        let Some(track) = self.current.clone() else {
            self.pending.push(PlaybackEvent::StateChanged {
                state: PlayState::Stopped,
            });
            return;
        };
        if !track.has_url() {
            return;
        }

        self.pending.push(PlaybackEvent::StateChanged {
            state: PlayState::Loading,
        });
        match self.open_session(&track).await {
            Ok(session) => self.session = Some(session),
            Err(err) => {
                warn!(track = %track.title, error = %err, "failed to open session");
                self.retry_play();
            }
        }
    }

    /// Load a track's source and start output
    pub async fn play_track(&mut self, track: Track) {
        self.set_current(Some(track)).await;
        self.play();
    }

    /// Prime a session without starting output (startup restore)
    pub async fn restore(&mut self, track: Track) {
        debug!(track = %track.title, "restoring session without playback");
        self.set_current(Some(track)).await;
    }

    /// Resolve a stream URL for the track, then play it
    pub async fn resolve_and_play(&mut self, track: Track) {
        self.release_session();
        self.current = Some(track.clone());
        self.pending.push(PlaybackEvent::StateChanged {
            state: PlayState::Loading,
        });

        match self.resolver.resolve(&track).await {
            Ok(resolved) => {
                let mut track = track;
                track.url = Some(resolved.url.clone());
                if resolved.cover.is_some() {
                    track.cover = resolved.cover.clone();
                }
                if resolved.lyric.is_some() {
                    track.lyric = resolved.lyric.clone();
                }
                self.pending.push(PlaybackEvent::TrackResolved {
                    track: track.clone(),
                });
                self.play_track(track).await;
            }
            Err(err) => {
                warn!(track = %track.title, error = %err, "stream resolution failed");
                self.retry_play();
            }
        }
    }

    /// Start or resume output on the live session
    pub fn play(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Err(err) = session.play() {
            warn!(error = %err, "engine refused to start playback");
            self.retry_play();
        }
    }

    /// Pause output, keeping the session and position
    pub fn pause(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.pause();
        }
    }

    /// Stop output and rewind, keeping the session
    pub fn stop(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.stop();
        }
    }

    /// Flip play/pause on the live session
    ///
    /// With no live session this reports an error through the retry policy
    /// instead of silently doing nothing.
    pub fn toggle_play(&mut self) {
        match self.session.as_mut() {
            None => self.retry_play(),
            Some(session) => {
                if session.is_playing() {
                    session.pause();
                } else {
                    self.play();
                }
            }
        }
    }

    /// Seek to a fraction of the track, only while output is live
    pub fn seek(&mut self, percent: f32) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.is_playing() {
            return;
        }
        let target = session.duration().mul_f32(percent.clamp(0.0, 1.0));
        session.seek(target);
    }

    /// Sample position and frequency data once
    ///
    /// Returns `true` while the sampler stays armed; `false` tells the host
    /// to stop its frame loop until the next `Started` event.
    pub fn tick(&mut self) -> bool {
        if !self.sampler.is_armed() {
            return false;
        }
        let Some(session) = self.session.as_ref() else {
            self.sampler.disarm();
            return false;
        };
        if !session.is_playing() {
            self.sampler.disarm();
            return false;
        }

        self.pending.push(PlaybackEvent::Position {
            position_ms: session.position().as_millis() as u64,
            duration_ms: session.duration().as_millis() as u64,
        });
        if let Some(bins) = self.engine.frequency_snapshot() {
            self.pending.push(PlaybackEvent::FrequencySnapshot { bins });
        }
        true
    }

    /// Fold an engine lifecycle event into controller state
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Started => {
                self.retry = 0;
                self.context_ready = true;
                self.sampler.arm();
                self.pending.push(PlaybackEvent::StateChanged {
                    state: PlayState::Playing,
                });
            }
            EngineEvent::Paused => {
                self.sampler.disarm();
                self.pending.push(PlaybackEvent::StateChanged {
                    state: PlayState::Paused,
                });
            }
            EngineEvent::Ended => {
                self.sampler.disarm();
                self.pending.push(PlaybackEvent::StateChanged {
                    state: PlayState::Ended,
                });
            }
            EngineEvent::LoadError(message) => {
                self.sampler.disarm();
                warn!(error = %message, "engine load error");
                self.retry_play();
            }
            EngineEvent::PlayError(message) => {
                self.sampler.disarm();
                warn!(error = %message, "engine play error");
                self.retry_play();
            }
        }
    }

    /// Apply equalizer band gains, once the audio context has produced output
    pub fn update_eq(&mut self, gains: &[f32]) {
        if !self.context_ready {
            return;
        }
        self.engine.update_eq(gains);
    }

    /// Apply a global output volume
    pub fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        self.engine.set_volume(volume);
        self.pending.push(PlaybackEvent::VolumeChanged { volume });
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Whether any events are waiting to be drained
    pub fn has_pending_events(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The track the controller is currently bound to
    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// Resolve the track URL into an engine source
    ///
    /// Local tracks map to file paths. Remote tracks are served from the blob
    /// cache when possible, otherwise fetched whole and cached.
    async fn open_session(&mut self, track: &Track) -> Result<E::Session> {
        let url = track
            .url
            .as_deref()
            .ok_or_else(|| PlaybackError::Resolution("track has no stream URL".into()))?;

        let source = if track.platform.is_local() {
            StreamSource::File(PathBuf::from(url))
        } else if let Some(blob) = self.cache.get(url) {
            debug!(url, "stream cache hit");
            StreamSource::Memory(blob)
        } else {
            let bytes = self.resolver.fetch_bytes(url).await?;
            let blob = Arc::new(bytes);
            self.cache.insert(url, Arc::clone(&blob));
            StreamSource::Memory(blob)
        };

        self.engine.open(source)
    }

    /// Tear down the live session and disarm sampling
    fn release_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.stop();
            session.unload();
        }
        self.sampler.disarm();
    }

    /// Surface a failure through the retry policy
    ///
    /// Emits one `PlaybackError` per attempt; `retryable` is `true` while
    /// attempts remain, and the host is expected to skip forward (or retry)
    /// on a retryable error and surface a final one to the user.
    fn retry_play(&mut self) {
        self.pending.push(PlaybackEvent::PlaybackError {
            track: self.current.clone(),
            retryable: self.retry < self.retry_limit,
        });
        self.retry += 1;
    }
}
