//! Multi-track file reader.
//!
//! Reading is lenient: a track whose header is invalid is skipped together
//! with its papers, and a paper line that fails to parse, violates a paper
//! invariant or repeats an id is skipped. Tracks left without papers are
//! dropped.

use crate::model::paper::{Paper, PaperRecord};
use crate::repo::track::{Track, TrackHeader};
use crate::store::{StoreError, StoreResult, PAPER_MARKER, TRACK_MARKER};
use log::{info, warn};
use std::path::Path;

/// Reads all valid tracks from the file at `path`.
///
/// # Errors
/// - `StoreError::Io` when the file cannot be read.
pub fn read_tracks(path: impl AsRef<Path>) -> StoreResult<Vec<Track>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tracks = parse_tracks(&text);
    info!(
        "event=tracks_loaded module=store status=ok tracks={} papers={}",
        tracks.len(),
        tracks.iter().map(Track::len).sum::<usize>()
    );
    Ok(tracks)
}

/// Parses track file text. Text that does not start with a track header
/// yields no tracks.
pub fn parse_tracks(text: &str) -> Vec<Track> {
    let text = text.trim();
    let mut tracks = Vec::new();
    if !text.starts_with(TRACK_MARKER) {
        return tracks;
    }

    // `None` while skipping the papers of a rejected header.
    let mut current: Option<Track> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if let Some(header) = line.strip_prefix(TRACK_MARKER) {
            finish_track(current.take(), &mut tracks);
            current = match header.trim().parse::<TrackHeader>().and_then(|h| Track::from_header(&h)) {
                Ok(track) => Some(track),
                Err(err) => {
                    warn!(
                        "event=track_skipped module=store status=invalid line={} reason={}",
                        line_no, err
                    );
                    None
                }
            };
            continue;
        }

        let (Some(track), Some(body)) = (current.as_mut(), line.strip_prefix(PAPER_MARKER)) else {
            continue;
        };
        let restored = body
            .trim()
            .parse::<PaperRecord>()
            .and_then(|record| Paper::restore(&record))
            .and_then(|paper| track.add_restored_paper(paper));
        if let Err(err) = restored {
            warn!(
                "event=paper_skipped module=store status=invalid track={} line={} reason={}",
                track.name(),
                line_no,
                err
            );
        }
    }
    finish_track(current, &mut tracks);

    tracks
}

fn finish_track(track: Option<Track>, tracks: &mut Vec<Track>) {
    match track {
        Some(track) if !track.is_empty() => tracks.push(track),
        Some(track) => warn!(
            "event=track_dropped module=store status=empty track={}",
            track.name()
        ),
        None => {}
    }
}
