//! Persisted window geometry and player preferences.
//!
//! Both files are small JSON documents in the player's state directory.
//! Loading never fails: a missing or malformed file yields defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::error::{PlayerError, Result};

/// Window size in terminal cells.
pub const DEFAULT_WINDOW_WIDTH: u16 = 100;
pub const DEFAULT_WINDOW_HEIGHT: u16 = 30;

pub const WINDOW_SETTINGS_FILE: &str = "settings.json";
pub const PLAYER_PREFS_FILE: &str = "player.json";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSettings {
    pub window_width: u16,
    pub window_height: u16,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerPrefs {
    /// Output volume in `[0, 1]`.
    pub volume: f64,
}

impl Default for PlayerPrefs {
    fn default() -> Self {
        Self { volume: 1.0 }
    }
}

impl PlayerPrefs {
    pub fn clamped(self) -> Self {
        let volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self { volume }
    }
}

/// Directory holding persisted state and the log file.
///
/// `CLASSIC_PLAYER_STATE_DIR` overrides the platform data directory.
pub fn state_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os("CLASSIC_PLAYER_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|d| d.join("classic-player"))
        .ok_or(PlayerError::NoDataDir)
}

/// Read a JSON document, returning `None` for a missing or unreadable file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::debug!(?path, error = %e, "no persisted state, using defaults");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(?path, error = %e, "ignoring malformed state file");
            None
        }
    }
}

/// Write a JSON document, creating the parent directory when needed.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PlayerError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|e| PlayerError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::write(path, json).map_err(|e| PlayerError::io(path, e))
}

impl WindowSettings {
    /// Load the persisted size, or `None` when nothing usable was stored.
    pub fn load(path: &Path) -> Option<Self> {
        load_json::<Self>(path).filter(|s| s.window_width > 0 && s.window_height > 0)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(path, self)
    }
}

impl PlayerPrefs {
    pub fn load_or_default(path: &Path) -> Self {
        load_json::<Self>(path).unwrap_or_default().clamped()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(path, self)
    }
}
