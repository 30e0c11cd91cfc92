//! Shared fakes for integration tests

#![allow(dead_code)]

use aria_core::traits::{ResolvedStream, StreamResolver};
use aria_core::types::{Platform, Track};
use aria_core::CoreError;
use aria_playback::engine::{AudioEngine, AudioSession, StreamSource};
use aria_playback::{PlaybackError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared operation log recording engine calls in order
#[derive(Clone, Default)]
pub struct OpLog(Arc<Mutex<Vec<String>>>);

impl OpLog {
    pub fn record(&self, op: impl Into<String>) {
        self.0.lock().unwrap().push(op.into());
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub struct FakeSession {
    log: OpLog,
    playing: bool,
    fail_play: bool,
    position: Duration,
    duration: Duration,
}

impl AudioSession for FakeSession {
    fn play(&mut self) -> Result<()> {
        if self.fail_play {
            self.log.record("play-error");
            return Err(PlaybackError::EnginePlay("device busy".into()));
        }
        self.playing = true;
        self.log.record("play");
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
        self.log.record("pause");
    }

    fn stop(&mut self) {
        self.playing = false;
        self.position = Duration::ZERO;
        self.log.record("stop");
    }

    fn seek(&mut self, position: Duration) {
        self.position = position;
        self.log.record(format!("seek:{}", position.as_millis()));
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn unload(&mut self) {
        self.log.record("unload");
    }
}

/// Engine fake that records every call and can be told to fail
pub struct FakeEngine {
    pub log: OpLog,
    pub fail_opens: u32,
    pub fail_play: bool,
    pub duration: Duration,
    pub snapshot: Option<Vec<u8>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            log: OpLog::default(),
            fail_opens: 0,
            fail_play: false,
            duration: Duration::from_secs(180),
            snapshot: None,
        }
    }
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEngine for FakeEngine {
    type Session = FakeSession;

    fn open(&mut self, source: StreamSource) -> Result<Self::Session> {
        let kind = match &source {
            StreamSource::File(_) => "file",
            StreamSource::Memory(_) => "memory",
        };
        if self.fail_opens > 0 {
            self.fail_opens -= 1;
            self.log.record(format!("open-error:{}", kind));
            return Err(PlaybackError::EngineLoad("decode failed".into()));
        }
        self.log.record(format!("open:{}", kind));
        Ok(FakeSession {
            log: self.log.clone(),
            playing: false,
            fail_play: self.fail_play,
            position: Duration::ZERO,
            duration: self.duration,
        })
    }

    fn set_volume(&mut self, volume: f32) {
        self.log.record(format!("volume:{:.2}", volume));
    }

    fn update_eq(&mut self, gains: &[f32]) {
        self.log.record(format!("eq:{}", gains.len()));
    }

    fn frequency_snapshot(&mut self) -> Option<Vec<u8>> {
        self.snapshot.clone()
    }
}

/// Resolver fake counting resolve/fetch calls
pub struct FakeResolver {
    pub resolve_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub fail_resolve: bool,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self {
            resolve_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            fail_resolve: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_resolve: true,
            ..Self::new()
        }
    }
}

impl Default for FakeResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StreamResolver for FakeResolver {
    async fn resolve(&self, track: &Track) -> aria_core::Result<ResolvedStream> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_resolve {
            return Err(CoreError::resolution("no playable source"));
        }
        Ok(ResolvedStream::from_url(format!(
            "https://streams.example.com/{}.mp3",
            track.id
        )))
    }

    async fn fetch_bytes(&self, url: &str) -> aria_core::Result<Vec<u8>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(url.as_bytes().to_vec())
    }
}

pub fn track(id: &str) -> Track {
    Track::new(id, Platform::NetEase, format!("Track {}", id))
}

pub fn track_with_url(id: &str) -> Track {
    let mut t = track(id);
    t.url = Some(format!("https://streams.example.com/{}.mp3", id));
    t
}

pub fn local_track(id: &str, path: &str) -> Track {
    let mut t = Track::new(id, Platform::Local, format!("Local {}", id));
    t.url = Some(path.to_string());
    t
}
