//! Review registry: all tracks plus the active-track pointer.
//!
//! # Responsibility
//! - Own every track and select the one that top-level calls are routed to.
//! - Load and save the multi-track file.
//!
//! # Invariants
//! - Track names are unique, compared case-insensitively.
//! - Activating a track always synchronizes its id sequence.
//! - Paper-level calls are no-ops (or return `None`) while no track is
//!   active; callers are expected to disable them in that case.

use crate::error::{ReviewError, ReviewResult};
use crate::model::command::Command;
use crate::model::paper::{Paper, PaperId, PaperState, PaperType};
use crate::repo::track::Track;
use crate::store::{read_tracks, write_tracks, StoreResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Filter value that lists papers in every state.
pub const ALL_STATES_FILTER: &str = "All";

/// List projection of one paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperSummary {
    pub id: PaperId,
    pub state: PaperState,
    pub author_names: String,
    pub paper_type: PaperType,
}

impl From<&Paper> for PaperSummary {
    fn from(paper: &Paper) -> Self {
        Self {
            id: paper.id(),
            state: paper.state(),
            author_names: paper.author_names().to_string(),
            paper_type: paper.paper_type(),
        }
    }
}

/// Process-level holder of tracks. Construct one per process or per test.
#[derive(Debug, Default)]
pub struct ReviewRegistry {
    tracks: Vec<Track>,
    active: Option<usize>,
}

impl ReviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every track and clears the active selection.
    pub fn reset(&mut self) {
        self.tracks.clear();
        self.active = None;
    }

    /// Creates a track and makes it active.
    ///
    /// # Errors
    /// - `InvalidArgument` on a blank or duplicate (case-insensitive) name,
    ///   or out-of-range limits.
    pub fn add_track(
        &mut self,
        name: &str,
        page_limit: u32,
        extra_pages_pay_rate: u32,
    ) -> ReviewResult<()> {
        let track = Track::new(name, page_limit, extra_pages_pay_rate)?;
        if self.contains_track(track.name()) {
            return Err(ReviewError::invalid_argument(format!(
                "track `{}` already exists",
                track.name()
            )));
        }

        info!(
            "event=track_added module=registry status=ok track={} page_limit={} pay_rate={}",
            track.name(),
            page_limit,
            extra_pages_pay_rate
        );
        self.tracks.push(track);
        self.activate(self.tracks.len() - 1);
        Ok(())
    }

    /// Makes the track named exactly `name` active.
    ///
    /// # Errors
    /// - `InvalidArgument` when no track has that name.
    pub fn set_active_track(&mut self, name: &str) -> ReviewResult<()> {
        let index = self
            .tracks
            .iter()
            .position(|track| track.name() == name)
            .ok_or_else(|| ReviewError::invalid_argument(format!("track `{name}` is not available")))?;
        self.activate(index);
        Ok(())
    }

    pub fn active_track(&self) -> Option<&Track> {
        self.active.and_then(|index| self.tracks.get(index))
    }

    pub fn active_track_name(&self) -> Option<&str> {
        self.active_track().map(Track::name)
    }

    /// Track names in insertion order.
    pub fn track_names(&self) -> Vec<&str> {
        self.tracks.iter().map(Track::name).collect()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Adds a paper to the active track. Returns `Ok(None)` when no track is
    /// active.
    ///
    /// # Errors
    /// - `InvalidArgument` when `author_names` is blank.
    pub fn add_paper_to_active_track(&mut self, author_names: &str) -> ReviewResult<Option<PaperId>> {
        match self.active_track_mut() {
            Some(track) => track.add_paper(author_names).map(Some),
            None => Ok(None),
        }
    }

    /// Routes `command` to paper `id` of the active track.
    ///
    /// # Errors
    /// - `InvalidTransition` from the paper state machine.
    pub fn execute_command(&mut self, id: PaperId, command: &Command) -> ReviewResult<()> {
        match self.active_track_mut() {
            Some(track) => track.execute_command(id, command),
            None => Ok(()),
        }
    }

    pub fn delete_paper_by_id(&mut self, id: PaperId) {
        if let Some(track) = self.active_track_mut() {
            track.delete_paper_by_id(id);
        }
    }

    pub fn paper_by_id(&self, id: PaperId) -> Option<&Paper> {
        self.active_track()?.paper_by_id(id)
    }

    /// Lists papers of the active track, optionally only those whose state
    /// name equals `state_filter`. `None` or `"All"` lists everything.
    ///
    /// Returns `None` when no track is active.
    pub fn list_papers(&self, state_filter: Option<&str>) -> Option<Vec<PaperSummary>> {
        let track = self.active_track()?;
        let filter = state_filter.filter(|name| *name != ALL_STATES_FILTER);
        Some(
            track
                .papers()
                .iter()
                .filter(|paper| filter.map_or(true, |name| paper.state().as_str() == name))
                .map(PaperSummary::from)
                .collect(),
        )
    }

    /// Fails unless there is an active track to save.
    pub fn ensure_saveable(&self) -> ReviewResult<()> {
        if self.active.is_none() {
            return Err(ReviewError::invalid_argument(
                "no active track; nothing to save",
            ));
        }
        Ok(())
    }

    /// Appends the tracks stored at `path` and activates the first one.
    ///
    /// Loaded tracks whose name already exists are skipped. Returns the
    /// number of tracks added.
    ///
    /// # Errors
    /// - `StoreError::Io` when the file cannot be read.
    pub fn load_tracks_from_file(&mut self, path: impl AsRef<Path>) -> StoreResult<usize> {
        let first_new = self.tracks.len();
        for track in read_tracks(path)? {
            if self.contains_track(track.name()) {
                warn!(
                    "event=track_skipped module=registry status=duplicate track={}",
                    track.name()
                );
                continue;
            }
            self.tracks.push(track);
        }

        let added = self.tracks.len() - first_new;
        if added > 0 {
            self.activate(first_new);
        }
        Ok(added)
    }

    /// Saves every track to `path`.
    ///
    /// # Errors
    /// - `StoreError::Review` when no track is active.
    /// - `StoreError::Io` when the file cannot be written.
    pub fn save_tracks_to_file(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        self.ensure_saveable()?;
        write_tracks(path, &self.tracks)
    }

    fn contains_track(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.tracks
            .iter()
            .any(|track| track.name().to_lowercase() == name)
    }

    fn active_track_mut(&mut self) -> Option<&mut Track> {
        let index = self.active?;
        self.tracks.get_mut(index)
    }

    fn activate(&mut self, index: usize) {
        let track = &mut self.tracks[index];
        track.synchronize_id_sequence();
        info!(
            "event=track_activated module=registry status=ok track={} next_id={}",
            track.name(),
            track.next_id()
        );
        self.active = Some(index);
    }
}
