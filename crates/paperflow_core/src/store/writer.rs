//! Multi-track file writer.

use crate::repo::track::Track;
use crate::store::{StoreError, StoreResult, PAPER_MARKER, TRACK_MARKER};
use log::info;
use std::fmt::Write as _;
use std::path::Path;

/// Renders tracks in file format. Tracks without papers are omitted.
pub fn format_tracks<'a>(tracks: impl IntoIterator<Item = &'a Track>) -> String {
    let mut out = String::new();
    for track in tracks.into_iter().filter(|track| !track.is_empty()) {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{TRACK_MARKER} {}", track.header());
        for paper in track.papers() {
            let _ = writeln!(out, "{PAPER_MARKER} {}", paper.to_record());
        }
    }
    out
}

/// Writes tracks to `path`, replacing any existing file.
///
/// # Errors
/// - `StoreError::Io` when the file cannot be written.
pub fn write_tracks<'a>(
    path: impl AsRef<Path>,
    tracks: impl IntoIterator<Item = &'a Track>,
) -> StoreResult<()> {
    let path = path.as_ref();
    let text = format_tracks(tracks);
    std::fs::write(path, &text).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "event=tracks_saved module=store status=ok bytes={}",
        text.len()
    );
    Ok(())
}
