//! Paper entity and its lifecycle state.
//!
//! # Responsibility
//! - Hold the canonical per-paper record and its current lifecycle state.
//! - Apply commands atomically through the pure transition function.
//! - Rebuild papers from canonical records with full invariant checks.
//!
//! # Invariants
//! - `Reviewing`/`Revising` imply `author_names == ANONYMOUS`.
//! - `Closed` implies real author names and a closing-reason note.
//! - `Abstract` papers are never `Revising` or `Registering`.
//! - A rejected command never mutates any field.
//!
//! # See also
//! - `model::transition` for the transition table.

use crate::error::{ReviewError, ReviewResult};
use crate::model::command::{ClosingReason, Command, Recommendation};
use crate::model::transition::transition;
use serde::{Deserialize, Serialize};

/// Paper id, unique within one track.
pub type PaperId = u32;

/// Largest paper id. `PaperId::MAX` is kept free so the next id always fits.
pub const MAX_PAPER_ID: PaperId = PaperId::MAX - 1;

/// Sentinel author name shown while a paper is under review or revision.
pub const ANONYMOUS: &str = "anonymous";

/// Substitute identity used when the real author names were never recorded.
pub const PLACEHOLDER_AUTHOR_NAMES: &str = "C. Ross; M. Mendez";

/// Lifecycle state of a paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperState {
    Submitted,
    Reviewing,
    Revising,
    Registering,
    Closed,
}

impl PaperState {
    pub const ALL: [PaperState; 5] = [
        PaperState::Submitted,
        PaperState::Reviewing,
        PaperState::Revising,
        PaperState::Registering,
        PaperState::Closed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::Reviewing => "Reviewing",
            Self::Revising => "Revising",
            Self::Registering => "Registering",
            Self::Closed => "Closed",
        }
    }

    /// Parses the exact state name.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.as_str() == value)
    }

    /// `Closed` rejects every command.
    pub fn is_terminal(self) -> bool {
        self == Self::Closed
    }
}

/// Submission type of a paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperType {
    Abstract,
    FullPaper,
}

impl PaperType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Abstract => "Abstract",
            Self::FullPaper => "FullPaper",
        }
    }

    /// Parses a paper type token, ignoring ASCII case.
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("Abstract") {
            Some(Self::Abstract)
        } else if value.eq_ignore_ascii_case("FullPaper") {
            Some(Self::FullPaper)
        } else {
            None
        }
    }
}

/// Note attached to a paper: a review recommendation or a closing reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaperNote {
    Recommendation(Recommendation),
    Closing(ClosingReason),
}

impl PaperNote {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recommendation(code) => code.as_str(),
            Self::Closing(reason) => reason.as_str(),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Recommendation::parse(value)
            .map(Self::Recommendation)
            .or_else(|| ClosingReason::parse(value).map(Self::Closing))
    }

    pub fn recommendation(self) -> Option<Recommendation> {
        match self {
            Self::Recommendation(code) => Some(code),
            Self::Closing(_) => None,
        }
    }

    pub fn closing_reason(self) -> Option<ClosingReason> {
        match self {
            Self::Closing(reason) => Some(reason),
            Self::Recommendation(_) => None,
        }
    }
}

/// Mutable per-paper fields driven by the state machine.
///
/// `saved_author_names` is the hidden identity backup. It is written when
/// `ASSIGN` anonymizes a paper and when a record is restored in an
/// anonymous state; it is read by every transition that restores identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperFields {
    pub author_names: String,
    pub saved_author_names: Option<String>,
    pub paper_type: PaperType,
    pub processed: bool,
    pub reviewer: Option<String>,
    pub note: Option<PaperNote>,
}

/// Canonical flat record of a paper (`id,state,authorNames,paperType,processed,reviewer,note`).
///
/// `reviewer` and `note` use the empty string for "none".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub id: PaperId,
    pub state: PaperState,
    pub author_names: String,
    pub paper_type: PaperType,
    pub processed: bool,
    pub reviewer: String,
    pub note: String,
}

/// A submitted paper and its workflow state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paper {
    id: PaperId,
    state: PaperState,
    fields: PaperFields,
}

impl Paper {
    /// Creates a new `Submitted` abstract with the given id. Author names
    /// are stored trimmed.
    ///
    /// # Errors
    /// - `InvalidArgument` when `author_names` is blank or not representable
    ///   in a canonical record, or `id` exceeds `MAX_PAPER_ID`.
    pub fn new(id: PaperId, author_names: &str) -> ReviewResult<Self> {
        check_id(id)?;
        let author_names = author_names.trim();
        if author_names.is_empty() {
            return Err(ReviewError::invalid_argument(
                "author names must not be empty",
            ));
        }
        check_record_text("author names", author_names)?;

        Ok(Self {
            id,
            state: PaperState::Submitted,
            fields: PaperFields {
                author_names: author_names.to_string(),
                saved_author_names: None,
                paper_type: PaperType::Abstract,
                processed: false,
                reviewer: None,
                note: None,
            },
        })
    }

    /// Rebuilds a paper from its canonical record.
    ///
    /// When the record is in an anonymous state (`Reviewing`, `Revising`,
    /// or processed `Submitted`) the real names are not part of the record,
    /// so the hidden backup is seeded with `PLACEHOLDER_AUTHOR_NAMES`.
    ///
    /// # Errors
    /// - `InvalidArgument` when the record violates any paper invariant.
    pub fn restore(record: &PaperRecord) -> ReviewResult<Self> {
        check_id(record.id)?;
        let author_names = record.author_names.trim();
        if author_names.is_empty() {
            return Err(ReviewError::invalid_argument(
                "author names must not be empty",
            ));
        }
        let reviewer = Some(record.reviewer.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let note = match record.note.trim() {
            "" => None,
            value => Some(PaperNote::parse(value).ok_or_else(|| {
                ReviewError::invalid_argument(format!("unknown paper note `{value}`"))
            })?),
        };

        let anonymous_state = matches!(record.state, PaperState::Reviewing | PaperState::Revising)
            || (record.state == PaperState::Submitted && record.processed);

        let paper = Self {
            id: record.id,
            state: record.state,
            fields: PaperFields {
                author_names: author_names.to_string(),
                saved_author_names: anonymous_state
                    .then(|| PLACEHOLDER_AUTHOR_NAMES.to_string()),
                paper_type: record.paper_type,
                processed: record.processed,
                reviewer,
                note,
            },
        };
        paper.validate()?;
        Ok(paper)
    }

    /// Applies one command through the current state's handler.
    ///
    /// # Errors
    /// - `InvalidTransition` when the current state rejects the command; the
    ///   paper is left unchanged.
    pub fn update(&mut self, command: &Command) -> ReviewResult<()> {
        let (state, fields) = transition(self.state, &self.fields, command)?;
        self.state = state;
        self.fields = fields;
        Ok(())
    }

    /// Checks every cross-field invariant for the current state.
    pub fn validate(&self) -> ReviewResult<()> {
        let fields = &self.fields;
        let anonymous = fields.author_names == ANONYMOUS;
        let invalid = |message: &str| Err(ReviewError::invalid_argument(message.to_string()));

        check_record_text("author names", &fields.author_names)?;
        if let Some(reviewer) = fields.reviewer.as_deref() {
            check_record_text("reviewer", reviewer)?;
        }

        let closing = fields.note.and_then(PaperNote::closing_reason);
        if fields.processed && closing == Some(ClosingReason::Duplicate) {
            return invalid("a duplicate paper is never processed");
        }
        if !fields.processed && closing == Some(ClosingReason::Rejected) {
            return invalid("a rejected paper must be processed");
        }

        match self.state {
            PaperState::Submitted if fields.processed => {
                if fields.reviewer.is_none() {
                    return invalid("processed submitted paper requires a reviewer");
                }
                if fields.note.and_then(PaperNote::recommendation).is_none() {
                    return invalid("processed submitted paper requires a recommendation");
                }
                if !anonymous {
                    return invalid("processed submitted paper must be anonymous");
                }
            }
            PaperState::Submitted => {
                if fields.reviewer.is_some() {
                    return invalid("unprocessed submitted paper cannot have a reviewer");
                }
            }
            PaperState::Reviewing => {
                if fields.processed {
                    return invalid("reviewing paper cannot be processed");
                }
                if !anonymous {
                    return invalid("reviewing paper must be anonymous");
                }
                if fields.reviewer.is_none() {
                    return invalid("reviewing paper requires a reviewer");
                }
            }
            PaperState::Revising => {
                if fields.paper_type == PaperType::Abstract {
                    return invalid("an abstract cannot be revised");
                }
                if fields.processed {
                    return invalid("revising paper cannot be processed");
                }
                if !anonymous {
                    return invalid("revising paper must be anonymous");
                }
                if fields.reviewer.is_some() {
                    return invalid("revising paper cannot have a reviewer");
                }
            }
            PaperState::Registering => {
                if fields.paper_type == PaperType::Abstract {
                    return invalid("an abstract cannot be registered");
                }
                if anonymous {
                    return invalid("registering paper cannot be anonymous");
                }
                if fields.reviewer.is_some() {
                    return invalid("registering paper cannot have a reviewer");
                }
            }
            PaperState::Closed => {
                let Some(reason) = closing else {
                    return invalid("closed paper requires a closing reason");
                };
                if anonymous {
                    return invalid("closed paper cannot be anonymous");
                }
                if fields.reviewer.is_some() {
                    return invalid("closed paper cannot have a reviewer");
                }
                if reason == ClosingReason::Accepted {
                    if fields.paper_type == PaperType::Abstract {
                        return invalid("an abstract cannot be accepted");
                    }
                    if !fields.processed {
                        return invalid("an accepted paper must be processed");
                    }
                }
            }
        }

        Ok(())
    }

    pub fn id(&self) -> PaperId {
        self.id
    }

    pub fn state(&self) -> PaperState {
        self.state
    }

    pub fn author_names(&self) -> &str {
        &self.fields.author_names
    }

    /// Hidden identity backup used to undo anonymization.
    pub fn saved_author_names(&self) -> Option<&str> {
        self.fields.saved_author_names.as_deref()
    }

    pub fn paper_type(&self) -> PaperType {
        self.fields.paper_type
    }

    pub fn is_processed(&self) -> bool {
        self.fields.processed
    }

    pub fn reviewer(&self) -> Option<&str> {
        self.fields.reviewer.as_deref()
    }

    pub fn note(&self) -> Option<PaperNote> {
        self.fields.note
    }

    pub fn fields(&self) -> &PaperFields {
        &self.fields
    }

    /// Canonical record snapshot of this paper.
    pub fn to_record(&self) -> PaperRecord {
        PaperRecord {
            id: self.id,
            state: self.state,
            author_names: self.fields.author_names.clone(),
            paper_type: self.fields.paper_type,
            processed: self.fields.processed,
            reviewer: self.fields.reviewer.clone().unwrap_or_default(),
            note: self
                .fields
                .note
                .map(|note| note.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

fn check_id(id: PaperId) -> ReviewResult<()> {
    if id > MAX_PAPER_ID {
        return Err(ReviewError::invalid_argument(format!(
            "paper id {id} is out of range"
        )));
    }
    Ok(())
}

/// Rejects text that cannot survive the comma-separated record format.
pub(crate) fn check_record_text(field: &str, value: &str) -> ReviewResult<()> {
    if value.contains([',', '\n', '\r']) {
        return Err(ReviewError::invalid_argument(format!(
            "{field} must not contain commas or line breaks"
        )));
    }
    Ok(())
}
