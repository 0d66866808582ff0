use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/classic-player/config.toml` or
/// `~/.config/classic-player/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CLASSIC_PLAYER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub artwork: ArtworkSettings,
    pub ui: UiSettings,
    pub startup: StartupSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Seconds skipped by the left/right arrow keys.
    pub seek_step_secs: f64,
    /// Volume change applied by the up/down arrow keys.
    pub volume_step: f64,
    /// What the "previous" key does relative to the playback position.
    pub previous_policy: PreviousPolicySetting,
    /// Below this position (seconds) the "previous" key leaves the track.
    pub previous_threshold_secs: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            seek_step_secs: 5.0,
            volume_step: 0.05,
            previous_policy: PreviousPolicySetting::RestartThenPrevious,
            previous_threshold_secs: 5.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreviousPolicySetting {
    /// Go to the previous track only near the start, otherwise restart.
    #[serde(alias = "restart_then_previous", alias = "classic")]
    RestartThenPrevious,
    /// Always go to the previous track.
    #[serde(alias = "always_previous")]
    AlwaysPrevious,
    /// Always restart the current track.
    #[serde(alias = "always_restart")]
    AlwaysRestart,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtworkSettings {
    /// Look up cover art and tags for audio items.
    pub enabled: bool,
    /// Number of items looked up concurrently.
    pub batch_size: usize,
    /// Catalog search endpoint.
    pub search_endpoint: String,
    /// Storefront countries to query, in order. Empty = derive from locale.
    pub countries: Vec<String>,
    /// Per-request timeout (milliseconds).
    pub request_timeout_ms: u64,
}

impl Default for ArtworkSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            batch_size: 3,
            search_endpoint: "https://itunes.apple.com/search".to_string(),
            countries: Vec::new(),
            request_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Show the queue list next to the now-playing panel.
    pub show_queue: bool,
    /// Directory the file picker starts in. Defaults to the working directory.
    pub picker_start_dir: Option<String>,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_queue: true,
            picker_start_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StartupSettings {
    /// Check for a newer release when the player starts.
    pub check_for_updates: bool,
    /// Restore the persisted window size at startup.
    pub restore_window_size: bool,
}

impl Default for StartupSettings {
    fn default() -> Self {
        Self {
            check_for_updates: true,
            restore_window_size: true,
        }
    }
}
