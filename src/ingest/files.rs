use std::path::{Path, PathBuf};

use crate::queue::{MediaKind, QueueItem};
use crate::session::Session;

/// MIME type for a lowercase file extension, when it is a known media type.
pub fn mime_type_for(extension: &str) -> Option<&'static str> {
    let mime = match extension {
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "wav" => "audio/wav",
        "aac" => "audio/aac",
        "flac" => "audio/flac",
        "ogg" => "audio/ogg",
        "txt" => "text/plain",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => return None,
    };
    Some(mime)
}

/// Split a file name at its last dot into `(base, lowercase extension)`.
///
/// Names without a dot, or with nothing on one side of it, keep the whole
/// name as base and an empty extension.
pub fn split_file_name(name: &str) -> (String, String) {
    match name.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() && !ext.is_empty() => {
            (base.to_string(), ext.to_ascii_lowercase())
        }
        _ => (name.to_string(), String::new()),
    }
}

/// Classify a path by its extension. Non-media files return `None`.
pub fn classify(path: &Path) -> Option<(String, String, MediaKind)> {
    let name = path.file_name()?.to_str()?;
    let (base, ext) = split_file_name(name);
    let kind = mime_type_for(&ext).and_then(MediaKind::from_mime)?;
    Some((base, ext, kind))
}

/// Turn `paths` into queue items, in order, registering a source for each.
///
/// Paths that are not audio/video, or that do not name an existing file,
/// are skipped.
pub fn build_items(paths: &[PathBuf], session: &mut Session) -> Vec<QueueItem> {
    let mut items = Vec::with_capacity(paths.len());
    for path in paths {
        let Some((base, ext, kind)) = classify(path) else {
            tracing::debug!(?path, "skipping non-media input");
            continue;
        };
        if !path.is_file() {
            tracing::warn!(?path, "skipping missing file");
            continue;
        }
        let source = session.sources.register(path.clone());
        let id = session.next_item_id();
        items.push(QueueItem::new(id, base, ext, source, kind));
    }
    items
}
