//! Media element: a `rodio` playback thread driven over a command channel.
//!
//! The UI sends `MediaCmd`s and reads back a shared `MediaStatus`
//! (position, duration, end-of-source and load errors).

mod sink;
mod thread;
mod types;

pub use types::*;

use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thread::spawn_media_thread;

pub struct MediaPlayer {
    tx: Sender<MediaCmd>,
    status: StatusHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl MediaPlayer {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<MediaCmd>();
        let status: StatusHandle = Arc::new(Mutex::new(MediaStatus::default()));
        let handle = spawn_media_thread(rx, Arc::clone(&status));
        Self {
            tx,
            status,
            join: Mutex::new(Some(handle)),
        }
    }

    /// Current status, consuming the one-shot `ended` and `error` events.
    pub fn poll(&self) -> MediaStatus {
        self.status
            .lock()
            .map(|mut s| s.take_events())
            .unwrap_or_default()
    }

    pub fn send(&self, cmd: MediaCmd) {
        if self.tx.send(cmd).is_err() {
            tracing::debug!("media thread gone, dropping command");
        }
    }

    /// Seek to `secs`. The published position moves immediately so the next
    /// status read does not report the old position.
    pub fn seek(&self, secs: f64) {
        if let Ok(mut s) = self.status.lock() {
            s.position = secs;
            s.ended = false;
        }
        self.send(MediaCmd::Seek(secs));
    }

    /// Stop the media thread and wait for it to exit.
    pub fn quit(&self) {
        self.send(MediaCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Default for MediaPlayer {
    fn default() -> Self {
        Self::new()
    }
}
