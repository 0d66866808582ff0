use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::error::PlayerError;
use crate::queue::SourceHandle;

use super::sink::{create_sink_at, probe_duration};
use super::types::{MediaCmd, StatusHandle, effective_volume};

const TICK: Duration = Duration::from_millis(100);

/// State owned by the media thread.
struct Engine {
    stream: Option<OutputStream>,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    /// Position the current sink started at.
    offset: Duration,
    playing: bool,
    ended_reported: bool,
    volume: f32,
    muted: bool,
    status: StatusHandle,
}

impl Engine {
    fn new(status: StatusHandle) -> Self {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when the stream is dropped, which would
                // scribble over the TUI.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                let err = PlayerError::AudioOutput(e.to_string());
                tracing::error!(error = %err, "audio output unavailable");
                if let Ok(mut s) = status.lock() {
                    s.error = Some(err.to_string());
                }
                None
            }
        };
        Self {
            stream,
            sink: None,
            path: None,
            offset: Duration::ZERO,
            playing: false,
            ended_reported: false,
            volume: 1.0,
            muted: false,
            status,
        }
    }

    fn load(&mut self, source: SourceHandle, path: PathBuf) {
        self.stop_sink();
        self.playing = false;
        self.offset = Duration::ZERO;
        self.ended_reported = false;

        let duration = probe_duration(&path).map(|d| d.as_secs_f64()).unwrap_or(0.0);
        let error = match self.build_sink(&path, Duration::ZERO) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "failed to load media");
                Some(e.to_string())
            }
        };
        tracing::debug!(path = ?path, duration, "media loaded");
        self.path = Some(path);

        if let Ok(mut s) = self.status.lock() {
            s.source = Some(source);
            s.position = 0.0;
            s.duration = duration;
            s.ended = false;
            if error.is_some() {
                s.error = error;
            }
        }
    }

    fn build_sink(&mut self, path: &Path, start_at: Duration) -> crate::error::Result<()> {
        let Some(stream) = self.stream.as_ref() else {
            return Err(PlayerError::AudioOutput("no output stream".into()));
        };
        let sink = create_sink_at(stream, path, start_at)?;
        sink.set_volume(effective_volume(self.volume, self.muted));
        if self.playing {
            sink.play();
        }
        self.sink = Some(sink);
        self.offset = start_at;
        Ok(())
    }

    fn play(&mut self) {
        self.playing = true;
        if let Some(s) = self.sink.as_ref() {
            s.play();
        }
    }

    fn pause(&mut self) {
        self.playing = false;
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
    }

    fn seek(&mut self, secs: f64) {
        let Some(path) = self.path.clone() else {
            return;
        };
        let target = Duration::from_secs_f64(secs.max(0.0));
        self.stop_sink();
        self.ended_reported = false;
        if let Err(e) = self.build_sink(&path, target) {
            tracing::warn!(path = ?path, error = %e, "seek failed");
            if let Ok(mut s) = self.status.lock() {
                s.error = Some(e.to_string());
            }
            return;
        }
        if let Ok(mut s) = self.status.lock() {
            s.position = target.as_secs_f64();
            s.ended = false;
        }
    }

    fn apply_volume(&self) {
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(effective_volume(self.volume, self.muted));
        }
    }

    fn unload(&mut self) {
        self.stop_sink();
        self.path = None;
        self.playing = false;
        if let Ok(mut s) = self.status.lock() {
            *s = Default::default();
        }
    }

    fn stop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    /// Publish the position and latch the end of the source.
    fn tick(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        let position = (self.offset + sink.get_pos()).as_secs_f64();
        let ended = self.playing && sink.empty() && !self.ended_reported;
        if ended {
            self.ended_reported = true;
        }
        if let Ok(mut s) = self.status.lock() {
            s.position = position;
            if ended {
                s.ended = true;
            }
        }
    }
}

pub(super) fn spawn_media_thread(rx: Receiver<MediaCmd>, status: StatusHandle) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut engine = Engine::new(status);
        loop {
            match rx.recv_timeout(TICK) {
                Ok(cmd) => match cmd {
                    MediaCmd::Load { source, path } => engine.load(source, path),
                    MediaCmd::Play => engine.play(),
                    MediaCmd::Pause => engine.pause(),
                    MediaCmd::Seek(secs) => engine.seek(secs),
                    MediaCmd::SetVolume(v) => {
                        engine.volume = v.clamp(0.0, 1.0);
                        engine.apply_volume();
                    }
                    MediaCmd::SetMuted(m) => {
                        engine.muted = m;
                        engine.apply_volume();
                    }
                    MediaCmd::Unload => engine.unload(),
                    MediaCmd::Quit => {
                        engine.stop_sink();
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => engine.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::debug!("media thread stopped");
    })
}
