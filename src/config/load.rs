use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file and then applies
/// environment overrides (prefix `CLASSIC_PLAYER__`), falling back to
/// struct defaults for anything left unset.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("CLASSIC_PLAYER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.artwork.batch_size == 0 {
            return Err("artwork.batch_size must be >= 1".to_string());
        }
        if !(self.playback.seek_step_secs > 0.0) {
            return Err("playback.seek_step_secs must be > 0".to_string());
        }
        if !(self.playback.volume_step > 0.0 && self.playback.volume_step <= 1.0) {
            return Err("playback.volume_step must be in (0, 1]".to_string());
        }
        if self.playback.previous_threshold_secs < 0.0 {
            return Err("playback.previous_threshold_secs must be >= 0".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `CLASSIC_PLAYER_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("CLASSIC_PLAYER_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/classic-player/config.toml`
/// or `~/.config/classic-player/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("classic-player").join("config.toml"))
}
