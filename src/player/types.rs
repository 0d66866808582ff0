//! Media element commands and the status it publishes.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::queue::SourceHandle;

#[derive(Debug)]
pub enum MediaCmd {
    /// Replace the current source. The new source starts paused at 0.
    Load { source: SourceHandle, path: PathBuf },
    Play,
    Pause,
    /// Jump to an absolute position in seconds.
    Seek(f64),
    /// Output volume in `[0, 1]`.
    SetVolume(f32),
    SetMuted(bool),
    /// Drop the current source.
    Unload,
    Quit,
}

/// Playback status shared with the UI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaStatus {
    /// The source this status describes.
    pub source: Option<SourceHandle>,
    /// Position in seconds.
    pub position: f64,
    /// Length in seconds, `0.0` while unknown.
    pub duration: f64,
    /// Set once when the source plays to its end; cleared by `take_events`.
    pub ended: bool,
    /// Last load/decode failure; cleared by `take_events`.
    pub error: Option<String>,
}

impl MediaStatus {
    /// Copy the status and clear the one-shot `ended`/`error` fields.
    pub fn take_events(&mut self) -> MediaStatus {
        let snapshot = self.clone();
        self.ended = false;
        self.error = None;
        snapshot
    }
}

pub type StatusHandle = Arc<Mutex<MediaStatus>>;

/// Sink volume for the given volume and mute flag.
pub fn effective_volume(volume: f32, muted: bool) -> f32 {
    if muted { 0.0 } else { volume.clamp(0.0, 1.0) }
}
