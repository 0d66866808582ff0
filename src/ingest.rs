//! Ingestion: turning picked, dropped or OS-opened paths into queue items.
//!
//! Every input path ends up in `load_paths`, which builds the items,
//! replaces the queue and schedules playback for the next loop turn.

mod drop;
mod files;

pub use drop::*;
pub use files::*;

use std::path::PathBuf;

use crate::app::App;
use crate::queue::{QueueAction, SourceHandle};
use crate::session::Session;

/// Replace the queue with the media files among `paths`.
///
/// Returns false, leaving the app untouched, when no path is playable. The
/// dispatch order is STOP, LOAD_FILES, SET_CURRENT_TIME(0), SET_DURATION(0);
/// SET_IS_PLAYING(true) is deferred so the media element sees the new source
/// before it is asked to play.
pub fn load_paths(app: &mut App, session: &mut Session, paths: &[PathBuf]) -> bool {
    let items = build_items(paths, session);
    let Some(first) = items.first() else {
        tracing::info!(inputs = paths.len(), "no playable media in selection");
        return false;
    };

    let keep: Vec<SourceHandle> = items.iter().map(|i| i.source).collect();
    let released = session.sources.release_except(&keep);
    tracing::info!(items = items.len(), released, "loading queue");

    app.set_title(first.display_name.clone());
    app.dispatch(QueueAction::Stop);
    app.dispatch(QueueAction::LoadFiles(items));
    app.dispatch(QueueAction::SetCurrentTime(0.0));
    app.dispatch(QueueAction::SetDuration(0.0));
    app.defer(QueueAction::SetIsPlaying(true));
    true
}

#[cfg(test)]
mod tests;
