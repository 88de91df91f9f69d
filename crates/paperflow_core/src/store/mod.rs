//! Flat-text persistence for tracks and papers.
//!
//! # Responsibility
//! - Encode/decode canonical track header and paper records.
//! - Read and write the multi-track file format.
//!
//! # Invariants
//! - A file is a sequence of `# <track header>` lines, each followed by
//!   zero or more `* <paper record>` lines.
//! - Tracks without papers are never written and are dropped on read.

use crate::error::ReviewError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod reader;
pub mod record;
pub mod writer;

pub use reader::{parse_tracks, read_tracks};
pub use writer::{format_tracks, write_tracks};

/// Line marker introducing a track header.
pub const TRACK_MARKER: char = '#';
/// Line marker introducing a paper record.
pub const PAPER_MARKER: char = '*';

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from loading or saving track files.
#[derive(Debug)]
pub enum StoreError {
    /// File could not be opened, read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The registry refused the operation (e.g. nothing to save).
    Review(ReviewError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "track file `{}` is unavailable: {source}", path.display())
            }
            Self::Review(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Review(err) => Some(err),
        }
    }
}

impl From<ReviewError> for StoreError {
    fn from(value: ReviewError) -> Self {
        Self::Review(value)
    }
}
