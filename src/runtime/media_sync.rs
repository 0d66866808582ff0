//! Keeps the media element in step with the queue state.
//!
//! The reducer only records what should happen (current item, playing,
//! muted); `MediaBridge` compares that with what the media thread was last
//! told and sends the difference. Status flowing the other way (duration,
//! position, end of source) is folded back into the queue by `sync_status`.

use crate::app::App;
use crate::player::{MediaCmd, MediaPlayer, MediaStatus};
use crate::queue::{QueueAction, SourceHandle, SourceRegistry};

/// Position changes smaller than this are not dispatched.
pub const POSITION_EPSILON: f64 = 0.25;

#[derive(Debug, Default)]
pub struct MediaBridge {
    source: Option<SourceHandle>,
    playing: bool,
    muted: bool,
    volume: Option<f32>,
}

impl MediaBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send whatever commands bring the media thread in line with `app`.
    pub fn sync(&mut self, app: &App, sources: &SourceRegistry, player: &MediaPlayer) {
        for cmd in self.diff(app, sources) {
            player.send(cmd);
        }
    }

    /// Commands needed to move from the last synced state to `app`.
    pub fn diff(&mut self, app: &App, sources: &SourceRegistry) -> Vec<MediaCmd> {
        let mut cmds = Vec::new();

        let wanted = app.current().map(|item| item.source);
        if wanted != self.source {
            match wanted.and_then(|h| sources.resolve(h).map(|p| (h, p.to_path_buf()))) {
                Some((source, path)) => cmds.push(MediaCmd::Load { source, path }),
                None => cmds.push(MediaCmd::Unload),
            }
            self.source = wanted;
            // A fresh source starts paused.
            self.playing = false;
        }

        let volume = app.volume as f32;
        if self.volume != Some(volume) {
            cmds.push(MediaCmd::SetVolume(volume));
            self.volume = Some(volume);
        }
        if app.state.muted != self.muted {
            cmds.push(MediaCmd::SetMuted(app.state.muted));
            self.muted = app.state.muted;
        }
        if app.state.is_playing != self.playing {
            cmds.push(if app.state.is_playing {
                MediaCmd::Play
            } else {
                MediaCmd::Pause
            });
            self.playing = app.state.is_playing;
        }
        cmds
    }
}

/// What the event loop must do after folding a status report into `app`.
#[derive(Debug, Default, PartialEq)]
pub struct StatusEffects {
    /// Restart the (possibly new) current item from 0.
    pub restart: bool,
    pub error: Option<String>,
}

/// Fold a media status report into the queue state.
///
/// Reports about a source other than the current item are ignored. At the
/// end of a source the queue advances when it holds more than one item, and
/// the item restarts from 0 either way.
pub fn sync_status(app: &mut App, status: &MediaStatus) -> StatusEffects {
    let mut effects = StatusEffects {
        error: status.error.clone(),
        ..Default::default()
    };
    if let Some(err) = effects.error.as_deref() {
        app.set_status(err);
        app.dispatch(QueueAction::SetIsPlaying(false));
    }

    let current = app.current().map(|item| item.source);
    if current.is_none() || status.source != current {
        return effects;
    }

    if status.duration != app.state.duration {
        app.dispatch(QueueAction::SetDuration(status.duration));
    }
    if (status.position - app.state.current_time).abs() > POSITION_EPSILON {
        app.dispatch(QueueAction::SetCurrentTime(status.position));
    }

    if status.ended {
        if app.state.len() > 1 {
            app.dispatch(QueueAction::Next);
        }
        app.dispatch(QueueAction::SetCurrentTime(0.0));
        app.dispatch(QueueAction::SetIsPlaying(true));
        effects.restart = true;
    }
    effects
}
