//! Track domain type

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::time::Duration;

/// Music platform a track belongs to
///
/// Track identifiers are only unique within a platform namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// QQ Music
    Qq,
    /// NetEase Cloud Music
    NetEase,
    /// KuGou Music
    KuGou,
    /// Local file on disk
    Local,
}

impl Platform {
    /// Whether tracks from this platform resolve to local files (no network)
    pub fn is_local(self) -> bool {
        matches!(self, Platform::Local)
    }
}

/// Track artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// Platform-scoped artist identifier
    pub id: String,
    /// Display name
    pub name: String,
}

/// Track album
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    /// Platform-scoped album identifier
    pub id: String,
    /// Display name
    pub name: String,
}

/// A single timed lyric line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Offset from track start in milliseconds
    pub time_ms: u64,
    /// Lyric text
    pub text: String,
}

/// Timed lyrics for a track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lyric {
    /// Lines ordered by offset
    pub lines: Vec<LyricLine>,
}

impl Lyric {
    /// Check whether any lines are present
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append a timed line
    pub fn add_line(&mut self, time_ms: u64, text: impl Into<String>) {
        self.lines.push(LyricLine {
            time_ms,
            text: text.into(),
        });
    }
}

/// A playable unit with platform-scoped identity and metadata
///
/// Equality, ordering into queues, and deduplication are all defined by the
/// `(id, platform)` pair - never by object identity or metadata. Metadata is
/// immutable once fetched, except for `url` and `lyric` which are attached
/// lazily by the resolution step and are deliberately not serialized (they are
/// transient, network-derived values that must not survive a restart).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Platform-scoped track identifier
    pub id: String,

    /// Owning platform namespace
    pub platform: Platform,

    /// Track title
    pub title: String,

    /// Artists, in credited order
    pub artists: Vec<Artist>,

    /// Album (optional)
    pub album: Option<Album>,

    /// Track duration in milliseconds (0 = unknown)
    pub duration_ms: u64,

    /// Cover image URL
    pub cover: Option<String>,

    /// Resolved stream URL, attached lazily; excluded from persistence
    #[serde(skip)]
    pub url: Option<String>,

    /// Timed lyrics, attached lazily; excluded from persistence
    #[serde(skip)]
    pub lyric: Option<Lyric>,

    /// Platform-specific content hash (KuGou)
    pub hash: Option<String>,

    /// Whether playback requires payment on the owning platform
    pub pay_play: bool,
}

impl Track {
    /// Create a track with minimal metadata
    pub fn new(id: impl Into<String>, platform: Platform, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            platform,
            title: title.into(),
            artists: Vec::new(),
            album: None,
            duration_ms: 0,
            cover: None,
            url: None,
            lyric: None,
            hash: None,
            pay_play: false,
        }
    }

    /// Whether a non-empty stream URL has been attached
    pub fn has_url(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Whether timed lyrics have been attached
    pub fn has_lyric(&self) -> bool {
        self.lyric.as_ref().is_some_and(|l| !l.is_empty())
    }

    /// Joined artist names for display
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join("、")
    }

    /// Track duration as a `Duration`
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.platform == other.platform
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.platform.hash(state);
    }
}
