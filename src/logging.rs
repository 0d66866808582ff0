//! Log file setup.
//!
//! The terminal belongs to the UI, so logs go to
//! `<state dir>/classic-player.log`. The filter comes from
//! `CLASSIC_PLAYER_LOG` (same syntax as `RUST_LOG`) and defaults to `info`.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CLASSIC_PLAYER_LOG";
pub const LOG_FILE: &str = "classic-player.log";

fn open_log(dir: &Path) -> std::io::Result<(File, PathBuf)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Install the global subscriber. Without a usable log file, logging stays
/// disabled; the player itself still runs.
pub fn init(state_dir: Option<&Path>) -> Option<PathBuf> {
    let (file, path) = state_dir.and_then(|d| open_log(d).ok())?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();

    installed.then_some(path)
}
