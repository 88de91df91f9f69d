//! Track: an ordered paper collection with its own id allocation.
//!
//! # Responsibility
//! - Keep papers unique by id and sorted ascending by id.
//! - Own the id sequence used for new papers.
//! - Route commands to papers by id.
//!
//! # Invariants
//! - `name` is non-blank; `page_limit` is in `3..=20`;
//!   `extra_pages_pay_rate` is in `1..=50`.
//! - Ids handed out by `add_paper` never collide with stored ids.

use crate::error::{ReviewError, ReviewResult};
use crate::model::command::Command;
use crate::model::paper::{check_record_text, Paper, PaperId, MAX_PAPER_ID};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const PAGE_LIMIT_RANGE: RangeInclusive<u32> = 3..=20;
pub const EXTRA_PAGES_PAY_RATE_RANGE: RangeInclusive<u32> = 1..=50;

/// Monotonic id generator owned by one track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdSequence {
    next: PaperId,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next id and advances the sequence.
    ///
    /// # Errors
    /// - `InvalidArgument` once every id up to `MAX_PAPER_ID` is used.
    pub fn next_id(&mut self) -> ReviewResult<PaperId> {
        let id = self.next;
        if id > MAX_PAPER_ID {
            return Err(ReviewError::invalid_argument("paper id space is exhausted"));
        }
        self.next = id
            .checked_add(1)
            .ok_or_else(|| ReviewError::invalid_argument("paper id space is exhausted"))?;
        Ok(id)
    }

    /// Returns the id the next call to `next_id` will hand out.
    pub fn peek(&self) -> PaperId {
        self.next
    }

    pub fn reset_to(&mut self, next: PaperId) {
        self.next = next;
    }

    /// Moves the sequence past `id` when it would otherwise reuse it.
    pub fn advance_past(&mut self, id: PaperId) {
        if id >= self.next {
            self.next = id.saturating_add(1);
        }
    }
}

/// Track header record (`name,pageLimit,extraPagesPayRate`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackHeader {
    pub name: String,
    pub page_limit: u32,
    pub extra_pages_pay_rate: u32,
}

/// Named workflow bucket with page-limit policy and papers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    name: String,
    page_limit: u32,
    extra_pages_pay_rate: u32,
    papers: Vec<Paper>,
    ids: IdSequence,
}

impl Track {
    /// Creates an empty track.
    ///
    /// # Errors
    /// - `InvalidArgument` on a blank name or out-of-range limits.
    pub fn new(name: &str, page_limit: u32, extra_pages_pay_rate: u32) -> ReviewResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ReviewError::invalid_argument("track name must not be empty"));
        }
        check_record_text("track name", name)?;
        if !PAGE_LIMIT_RANGE.contains(&page_limit) {
            return Err(ReviewError::invalid_argument(format!(
                "page limit {page_limit} is outside {}..={}",
                PAGE_LIMIT_RANGE.start(),
                PAGE_LIMIT_RANGE.end()
            )));
        }
        if !EXTRA_PAGES_PAY_RATE_RANGE.contains(&extra_pages_pay_rate) {
            return Err(ReviewError::invalid_argument(format!(
                "extra pages pay rate {extra_pages_pay_rate} is outside {}..={}",
                EXTRA_PAGES_PAY_RATE_RANGE.start(),
                EXTRA_PAGES_PAY_RATE_RANGE.end()
            )));
        }

        Ok(Self {
            name: name.to_string(),
            page_limit,
            extra_pages_pay_rate,
            papers: Vec::new(),
            ids: IdSequence::new(),
        })
    }

    /// Creates an empty track from a parsed header record.
    pub fn from_header(header: &TrackHeader) -> ReviewResult<Self> {
        Self::new(&header.name, header.page_limit, header.extra_pages_pay_rate)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    pub fn extra_pages_pay_rate(&self) -> u32 {
        self.extra_pages_pay_rate
    }

    /// Papers in ascending id order.
    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// Id that the next `add_paper` call will use.
    pub fn next_id(&self) -> PaperId {
        self.ids.peek()
    }

    pub fn header(&self) -> TrackHeader {
        TrackHeader {
            name: self.name.clone(),
            page_limit: self.page_limit,
            extra_pages_pay_rate: self.extra_pages_pay_rate,
        }
    }

    /// Creates a new paper with the next sequence id.
    ///
    /// # Errors
    /// - `InvalidArgument` when `author_names` is blank, the next id is
    ///   already taken, or the id space is exhausted.
    pub fn add_paper(&mut self, author_names: &str) -> ReviewResult<PaperId> {
        let mut ids = self.ids;
        let paper = Paper::new(ids.next_id()?, author_names)?;
        let id = self.insert_sorted(paper)?;
        self.ids = ids;
        info!(
            "event=paper_added module=track status=ok track={} id={}",
            self.name, id
        );
        Ok(id)
    }

    /// Inserts an already-built paper, e.g. one restored from storage.
    ///
    /// # Errors
    /// - `InvalidArgument` when a paper with the same id already exists.
    pub fn add_restored_paper(&mut self, paper: Paper) -> ReviewResult<PaperId> {
        let id = self.insert_sorted(paper)?;
        self.ids.advance_past(id);
        Ok(id)
    }

    pub fn paper_by_id(&self, id: PaperId) -> Option<&Paper> {
        self.position(id).ok().map(|index| &self.papers[index])
    }

    /// Removes the paper with `id`; absent ids are ignored.
    pub fn delete_paper_by_id(&mut self, id: PaperId) {
        if let Ok(index) = self.position(id) {
            self.papers.remove(index);
            info!(
                "event=paper_deleted module=track status=ok track={} id={}",
                self.name, id
            );
        }
    }

    /// Applies `command` to the paper with `id`; absent ids are ignored.
    ///
    /// # Errors
    /// - `InvalidTransition` from the paper state machine.
    pub fn execute_command(&mut self, id: PaperId, command: &Command) -> ReviewResult<()> {
        let Ok(index) = self.position(id) else {
            debug!(
                "event=command_skipped module=track status=noop track={} id={} action={}",
                self.name,
                id,
                command.action().as_str()
            );
            return Ok(());
        };

        let paper = &mut self.papers[index];
        let from = paper.state();
        match paper.update(command) {
            Ok(()) => {
                info!(
                    "event=paper_transition module=track status=ok track={} id={} action={} from={} to={}",
                    self.name,
                    id,
                    command.action().as_str(),
                    from.as_str(),
                    paper.state().as_str()
                );
                Ok(())
            }
            Err(err) => {
                debug!(
                    "event=paper_transition module=track status=rejected track={} id={} action={} state={}",
                    self.name,
                    id,
                    command.action().as_str(),
                    from.as_str()
                );
                Err(err)
            }
        }
    }

    /// Resets the id sequence to one past the largest stored id.
    pub fn synchronize_id_sequence(&mut self) {
        let next = self
            .papers
            .last()
            .map_or(0, |paper| paper.id().saturating_add(1));
        self.ids.reset_to(next);
    }

    fn position(&self, id: PaperId) -> Result<usize, usize> {
        self.papers.binary_search_by_key(&id, Paper::id)
    }

    fn insert_sorted(&mut self, paper: Paper) -> ReviewResult<PaperId> {
        let id = paper.id();
        match self.position(id) {
            Ok(_) => Err(ReviewError::invalid_argument(format!(
                "paper id {id} already exists in track `{}`",
                self.name
            ))),
            Err(index) => {
                self.papers.insert(index, paper);
                Ok(id)
            }
        }
    }
}
