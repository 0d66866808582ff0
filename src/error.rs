//! Error type shared by the fallible parts of the player.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to read tags from {path:?}: {source}")]
    Tags {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("no audio output device: {0}")]
    AudioOutput(String),

    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("no data directory available on this platform")]
    NoDataDir,
}

impl PlayerError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = PlayerError> = std::result::Result<T, E>;
