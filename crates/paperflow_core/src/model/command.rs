//! Self-validating commands issued against a paper.
//!
//! # Responsibility
//! - Guarantee that only semantically valid `(action, payload)` pairs exist.
//! - Expose recommendation and closing-reason codes as typed values.
//!
//! # Invariants
//! - `ACCEPT`, `MODIFY`, `SUBMIT`, `PROPOSE` never carry a payload.
//! - `ASSIGN` always carries a trimmed, non-blank reviewer id without commas
//!   or line breaks.
//! - `RECOMMEND` carries one of the four recommendation codes.
//! - `CLOSE` carries `Withdrawn`, `Rejected` or `Duplicate`.
//! - `PROCESS` carries `Accepted`.
//! - A `Command` is immutable after construction.

use crate::error::{ReviewError, ReviewResult};
use crate::model::paper::check_record_text;
use serde::{Deserialize, Serialize};

/// Action requested by a command. Wire names are the uppercase tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Accept,
    Assign,
    Process,
    Propose,
    Submit,
    Modify,
    Recommend,
    Close,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Accept,
        Action::Assign,
        Action::Process,
        Action::Propose,
        Action::Submit,
        Action::Modify,
        Action::Recommend,
        Action::Close,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "ACCEPT",
            Self::Assign => "ASSIGN",
            Self::Process => "PROCESS",
            Self::Propose => "PROPOSE",
            Self::Submit => "SUBMIT",
            Self::Modify => "MODIFY",
            Self::Recommend => "RECOMMEND",
            Self::Close => "CLOSE",
        }
    }

    /// Parses the verbatim action token. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_str() == value)
    }
}

/// Review outcome recorded as a paper note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "StrongAcceptRecommendation")]
    StrongAccept,
    #[serde(rename = "WeakAcceptRecommendation")]
    WeakAccept,
    #[serde(rename = "WeakRejectRecommendation")]
    WeakReject,
    #[serde(rename = "StrongRejectRecommendation")]
    StrongReject,
}

impl Recommendation {
    pub const ALL: [Recommendation; 4] = [
        Recommendation::StrongAccept,
        Recommendation::WeakAccept,
        Recommendation::WeakReject,
        Recommendation::StrongReject,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::StrongAccept => "StrongAcceptRecommendation",
            Self::WeakAccept => "WeakAcceptRecommendation",
            Self::WeakReject => "WeakRejectRecommendation",
            Self::StrongReject => "StrongRejectRecommendation",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == value)
    }

    /// Reject recommendations block resubmission.
    pub fn is_reject(self) -> bool {
        matches!(self, Self::WeakReject | Self::StrongReject)
    }
}

/// Reason recorded as note when a paper enters `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClosingReason {
    Withdrawn,
    Rejected,
    Duplicate,
    Accepted,
}

impl ClosingReason {
    pub const ALL: [ClosingReason; 4] = [
        ClosingReason::Withdrawn,
        ClosingReason::Rejected,
        ClosingReason::Duplicate,
        ClosingReason::Accepted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Withdrawn => "Withdrawn",
            Self::Rejected => "Rejected",
            Self::Duplicate => "Duplicate",
            Self::Accepted => "Accepted",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|reason| reason.as_str() == value)
    }
}

/// Immutable `(action, payload)` pair validated at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    action: Action,
    payload: Option<String>,
}

impl Command {
    /// Builds a command, validating the payload against the action.
    ///
    /// An empty payload string is treated as absent. `ASSIGN` reviewer ids
    /// are stored trimmed.
    ///
    /// # Errors
    /// - `InvalidArgument` when the payload violates the rule for `action`.
    pub fn new(action: Action, payload: Option<&str>) -> ReviewResult<Self> {
        let mut payload = payload.filter(|value| !value.is_empty());

        match action {
            Action::Accept | Action::Modify | Action::Submit | Action::Propose => {
                if payload.is_some() {
                    return Err(ReviewError::invalid_argument(format!(
                        "{} does not take a payload",
                        action.as_str()
                    )));
                }
            }
            Action::Assign => {
                let reviewer = payload.map(str::trim).unwrap_or_default();
                if reviewer.is_empty() {
                    return Err(ReviewError::invalid_argument(
                        "ASSIGN requires a reviewer id",
                    ));
                }
                check_record_text("reviewer", reviewer)?;
                payload = Some(reviewer);
            }
            Action::Recommend => {
                if payload.and_then(Recommendation::parse).is_none() {
                    return Err(ReviewError::invalid_argument(format!(
                        "RECOMMEND requires a recommendation code, got `{}`",
                        payload.unwrap_or_default()
                    )));
                }
            }
            Action::Close => {
                let reason = payload.and_then(ClosingReason::parse);
                if !matches!(
                    reason,
                    Some(ClosingReason::Withdrawn | ClosingReason::Rejected | ClosingReason::Duplicate)
                ) {
                    return Err(ReviewError::invalid_argument(format!(
                        "CLOSE requires Withdrawn, Rejected or Duplicate, got `{}`",
                        payload.unwrap_or_default()
                    )));
                }
            }
            Action::Process => {
                if payload != Some(ClosingReason::Accepted.as_str()) {
                    return Err(ReviewError::invalid_argument(format!(
                        "PROCESS requires Accepted, got `{}`",
                        payload.unwrap_or_default()
                    )));
                }
            }
        }

        Ok(Self {
            action,
            payload: payload.map(str::to_string),
        })
    }

    /// Builds a command from the verbatim action token used by UI callers.
    ///
    /// # Errors
    /// - `InvalidArgument` when `action` is blank or unknown, or the payload
    ///   is invalid for it.
    pub fn parse(action: &str, payload: Option<&str>) -> ReviewResult<Self> {
        let token = action.trim();
        if token.is_empty() {
            return Err(ReviewError::invalid_argument("command action is required"));
        }
        let action = Action::parse(token).ok_or_else(|| {
            ReviewError::invalid_argument(format!("unknown command action `{token}`"))
        })?;
        Self::new(action, payload)
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Typed payload of a `RECOMMEND` command.
    pub fn recommendation(&self) -> Option<Recommendation> {
        match self.action {
            Action::Recommend => self.payload().and_then(Recommendation::parse),
            _ => None,
        }
    }

    /// Typed payload of a `CLOSE` or `PROCESS` command.
    pub fn closing_reason(&self) -> Option<ClosingReason> {
        match self.action {
            Action::Close | Action::Process => self.payload().and_then(ClosingReason::parse),
            _ => None,
        }
    }
}
