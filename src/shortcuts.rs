//! Keyboard shortcut dispatcher.
//!
//! `shortcut_for` maps a key event to a `Shortcut`; `plan` turns a shortcut
//! into the steps the event loop applies (reducer actions, a seek, a volume
//! change, UI toggles). Planning is pure so the transport rules can be
//! tested without a terminal or an audio device.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::{PlaybackSettings, PreviousPolicySetting};
use crate::queue::QueueAction;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Shortcut {
    TogglePlay,
    Stop,
    Previous,
    Next,
    SeekBack,
    SeekForward,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    ToggleFullscreen,
    OpenPicker,
    ToggleInfo,
    /// Seek to `digit * 10` percent of the duration.
    SeekPercent(u8),
    ToggleHelp,
    CloseHelp,
}

impl Shortcut {
    /// Shortcuts that drive the media element and need a loaded item.
    pub fn is_transport(self) -> bool {
        matches!(
            self,
            Self::TogglePlay
                | Self::Stop
                | Self::Previous
                | Self::Next
                | Self::SeekBack
                | Self::SeekForward
                | Self::SeekPercent(_)
        )
    }
}

/// Key legend shown by the help overlay.
pub const HELP_ROWS: [(&str, &str); 13] = [
    ("Space", "Play / Pause"),
    ("S", "Stop"),
    ("A", "Previous / restart"),
    ("D", "Next"),
    ("← / →", "Seek -5s / +5s"),
    ("↑ / ↓", "Volume up / down"),
    ("M", "Mute"),
    ("F", "Fullscreen"),
    ("O", "Open file"),
    ("I", "Track info"),
    ("0-9", "Seek to 0%-90%"),
    ("?", "Show / hide this help"),
    ("Esc", "Close help"),
];

/// Map a key press to a shortcut. Letters are case-insensitive; chords with
/// Ctrl or Alt never match (those belong to the menu). `Esc` only matches
/// while the help overlay is open.
pub fn shortcut_for(key: &KeyEvent, help_open: bool) -> Option<Shortcut> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    let shortcut = match key.code {
        KeyCode::Char(' ') => Shortcut::TogglePlay,
        KeyCode::Left => Shortcut::SeekBack,
        KeyCode::Right => Shortcut::SeekForward,
        KeyCode::Up => Shortcut::VolumeUp,
        KeyCode::Down => Shortcut::VolumeDown,
        KeyCode::Esc if help_open => Shortcut::CloseHelp,
        KeyCode::Char('?') => Shortcut::ToggleHelp,
        KeyCode::Char(c) if c.is_ascii_digit() => Shortcut::SeekPercent(c as u8 - b'0'),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            's' => Shortcut::Stop,
            'a' => Shortcut::Previous,
            'd' => Shortcut::Next,
            'm' => Shortcut::ToggleMute,
            'f' => Shortcut::ToggleFullscreen,
            'o' => Shortcut::OpenPicker,
            'i' => Shortcut::ToggleInfo,
            _ => return None,
        },
        _ => return None,
    };
    Some(shortcut)
}

/// What the "previous" key does.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PreviousPolicy {
    /// Leave the track when the position is below `threshold` seconds,
    /// otherwise restart it.
    RestartThenPrevious { threshold: f64 },
    AlwaysPrevious,
    AlwaysRestart,
}

impl PreviousPolicy {
    pub fn from_settings(settings: &PlaybackSettings) -> Self {
        match settings.previous_policy {
            PreviousPolicySetting::RestartThenPrevious => Self::RestartThenPrevious {
                threshold: settings.previous_threshold_secs,
            },
            PreviousPolicySetting::AlwaysPrevious => Self::AlwaysPrevious,
            PreviousPolicySetting::AlwaysRestart => Self::AlwaysRestart,
        }
    }

    /// True when the key should move to the previous item at `position`.
    pub fn goes_back(self, position: f64) -> bool {
        match self {
            Self::RestartThenPrevious { threshold } => position < threshold,
            Self::AlwaysPrevious => true,
            Self::AlwaysRestart => false,
        }
    }
}

impl Default for PreviousPolicy {
    fn default() -> Self {
        Self::RestartThenPrevious { threshold: 5.0 }
    }
}

/// UI-only effects of a shortcut.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UiEffect {
    ToggleFullscreen,
    OpenPicker,
    ToggleInfo,
    ToggleHelp,
    CloseHelp,
    CloseInfo,
    CloseAbout,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Dispatch(QueueAction),
    /// Move the media element (and `current_time`) to this position.
    Seek(f64),
    SetVolume(f64),
    Ui(UiEffect),
}

/// The transport facts a plan depends on.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PlanContext {
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
    /// Nothing is loaded; transport shortcuts do nothing.
    pub queue_empty: bool,
}

/// Ordered steps produced for one shortcut.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortcutPlan {
    pub steps: Vec<Step>,
}

impl ShortcutPlan {
    pub fn of(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[cfg(test)]
    pub fn actions(&self) -> Vec<&QueueAction> {
        self.steps
            .iter()
            .filter_map(|s| match s {
                Step::Dispatch(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    /// The last seek target in the plan.
    #[cfg(test)]
    pub fn seek_target(&self) -> Option<f64> {
        self.steps.iter().rev().find_map(|s| match s {
            Step::Seek(t) => Some(*t),
            _ => None,
        })
    }

    #[cfg(test)]
    pub fn volume(&self) -> Option<f64> {
        self.steps.iter().rev().find_map(|s| match s {
            Step::SetVolume(v) => Some(*v),
            _ => None,
        })
    }
}

/// Plan the effects of `shortcut`.
pub fn plan(shortcut: Shortcut, ctx: &PlanContext, settings: &PlaybackSettings) -> ShortcutPlan {
    if ctx.queue_empty && shortcut.is_transport() {
        return ShortcutPlan::default();
    }
    let resume = || {
        vec![
            Step::Seek(0.0),
            Step::Dispatch(QueueAction::SetIsPlaying(true)),
        ]
    };
    let steps = match shortcut {
        Shortcut::TogglePlay => vec![Step::Dispatch(QueueAction::TogglePlay)],
        Shortcut::Stop => vec![Step::Dispatch(QueueAction::Stop), Step::Seek(0.0)],
        Shortcut::Previous => {
            let mut steps = Vec::new();
            if PreviousPolicy::from_settings(settings).goes_back(ctx.current_time) {
                steps.push(Step::Dispatch(QueueAction::Previous));
            }
            steps.extend(resume());
            steps
        }
        Shortcut::Next => {
            let mut steps = vec![Step::Dispatch(QueueAction::Next)];
            steps.extend(resume());
            steps
        }
        Shortcut::SeekBack => vec![Step::Seek(clamp_position(
            ctx.current_time - settings.seek_step_secs,
            ctx.duration,
        ))],
        Shortcut::SeekForward => vec![Step::Seek(clamp_position(
            ctx.current_time + settings.seek_step_secs,
            ctx.duration,
        ))],
        Shortcut::VolumeUp => vec![Step::SetVolume(step_volume(
            ctx.volume + settings.volume_step,
        ))],
        Shortcut::VolumeDown => vec![Step::SetVolume(step_volume(
            ctx.volume - settings.volume_step,
        ))],
        Shortcut::ToggleMute => vec![Step::Dispatch(QueueAction::ToggleMuted)],
        Shortcut::SeekPercent(digit) => vec![Step::Seek(clamp_position(
            ctx.duration * f64::from(digit.min(9)) / 10.0,
            ctx.duration,
        ))],
        Shortcut::ToggleFullscreen => vec![Step::Ui(UiEffect::ToggleFullscreen)],
        Shortcut::OpenPicker => vec![Step::Ui(UiEffect::OpenPicker)],
        Shortcut::ToggleInfo => vec![Step::Ui(UiEffect::ToggleInfo)],
        Shortcut::ToggleHelp => vec![Step::Ui(UiEffect::ToggleHelp)],
        Shortcut::CloseHelp => vec![Step::Ui(UiEffect::CloseHelp)],
    };
    ShortcutPlan::of(steps)
}

/// Clamp a position to `[0, duration]`. An unknown duration clamps to 0.
pub fn clamp_position(t: f64, duration: f64) -> f64 {
    let upper = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
    if t.is_nan() { 0.0 } else { t.clamp(0.0, upper) }
}

/// Clamp to `[0, 1]` and round to two decimals.
pub fn step_volume(v: f64) -> f64 {
    (v.clamp(0.0, 1.0) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests;
