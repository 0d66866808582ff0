//! Opening media files as `rodio` sinks.
//!
//! Seeking rebuilds the sink and skips into the decoded stream, so
//! `create_sink_at` is also the seek primitive.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::{PlayerError, Result};

/// Open and decode the file at `path`.
pub(super) fn decode(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(path).map_err(|e| PlayerError::io(path, e))?;
    Decoder::new(BufReader::new(file)).map_err(|e| PlayerError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<Sink> {
    let source = decode(path)?.skip_duration(start_at);
    let sink = Sink::connect_new(stream.mixer());
    sink.pause();
    sink.append(source);
    Ok(sink)
}

/// Length of the file at `path`: the decoder's answer when it has one,
/// else the container properties.
pub fn probe_duration(path: &Path) -> Option<Duration> {
    let from_decoder = decode(path).ok().and_then(|d| d.total_duration());
    from_decoder
        .or_else(|| {
            lofty::read_from_path(path)
                .ok()
                .map(|tagged| tagged.properties().duration())
        })
        .filter(|d| !d.is_zero())
}
