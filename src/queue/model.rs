//! Queue item types: `QueueItem`, `TrackMetadata` and their identifiers.

use std::fmt;

use super::sources::SourceHandle;

/// Stable identifier of a queue item, unique within a session.
///
/// Positional indices are reused every time the queue is reloaded; ids are
/// not, which lets late asynchronous updates detect that their item is gone.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether an item is rendered as audio (artwork panel) or video.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Classify a MIME type; only `audio/*` and `video/*` are media.
    pub fn from_mime(mime: &str) -> Option<Self> {
        if mime.starts_with("audio/") {
            Some(Self::Audio)
        } else if mime.starts_with("video/") {
            Some(Self::Video)
        } else {
            None
        }
    }
}

/// Tag fields parsed from an audio file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
    pub composer: Option<String>,
    pub track_number: Option<u32>,
    pub track_total: Option<u32>,
}

impl TrackMetadata {
    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.album.is_none()
            && self.genre.is_none()
            && self.year.is_none()
            && self.composer.is_none()
            && self.track_number.is_none()
            && self.track_total.is_none()
    }

    /// Labelled text fields in display order, skipping absent ones.
    pub fn labelled_fields(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        let text = [
            ("Title", &self.title),
            ("Artist", &self.artist),
            ("Album", &self.album),
            ("Genre", &self.genre),
            ("Year", &self.year),
            ("Composer", &self.composer),
        ];
        for (label, value) in text {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                out.push((label, v.to_string()));
            }
        }
        if let Some(no) = self.track_number {
            let track = match self.track_total {
                Some(of) => format!("{no} / {of}"),
                None => no.to_string(),
            };
            out.push(("Track", track));
        }
        out
    }
}

/// One loaded media entry.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueItem {
    pub id: ItemId,
    /// Lowercase file extension, e.g. `"mp3"`.
    pub extension: String,
    /// File name without its extension.
    pub display_name: String,
    pub source: SourceHandle,
    pub kind: MediaKind,
    pub artwork_url: Option<String>,
    pub metadata: Option<TrackMetadata>,
}

impl QueueItem {
    pub fn new(
        id: ItemId,
        display_name: impl Into<String>,
        extension: impl Into<String>,
        source: SourceHandle,
        kind: MediaKind,
    ) -> Self {
        Self {
            id,
            extension: extension.into().to_ascii_lowercase(),
            display_name: display_name.into(),
            source,
            kind,
            artwork_url: None,
            metadata: None,
        }
    }

    /// The best available title: tagged title, else the file name.
    pub fn title(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.title.as_deref())
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.display_name)
    }
}
