use std::path::Path;

use lofty::prelude::*;

use crate::error::{PlayerError, Result};
use crate::queue::TrackMetadata;

fn non_empty(v: Option<impl AsRef<str>>) -> Option<String> {
    v.map(|s| s.as_ref().trim().to_string()).filter(|s| !s.is_empty())
}

/// Read the primary (or first) tag of the file at `path`.
///
/// Returns `Ok(None)` when the file carries no tag at all.
pub fn read_tags(path: &Path) -> Result<Option<TrackMetadata>> {
    let tagged = lofty::read_from_path(path).map_err(|source| PlayerError::Tags {
        path: path.to_path_buf(),
        source,
    })?;

    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return Ok(None);
    };

    let mut meta = TrackMetadata {
        title: non_empty(tag.title()),
        artist: non_empty(tag.artist()),
        album: non_empty(tag.album()),
        genre: non_empty(tag.genre()),
        track_number: tag.track(),
        track_total: tag.track_total(),
        ..TrackMetadata::default()
    };

    for item in tag.items() {
        let Some(text) = item.value().text() else {
            continue;
        };
        match item.key() {
            ItemKey::Year | ItemKey::RecordingDate if meta.year.is_none() => {
                meta.year = non_empty(Some(text));
            }
            ItemKey::Composer if meta.composer.is_none() => {
                meta.composer = non_empty(Some(text));
            }
            _ => {}
        }
    }

    Ok(Some(meta))
}
