//! Core error kinds for command, paper, track and registry operations.
//!
//! # Responsibility
//! - Separate malformed input (`InvalidArgument`) from structurally valid
//!   commands rejected by the current paper state (`InvalidTransition`).
//!
//! # Invariants
//! - An operation that returns an error leaves every entity unchanged.

use crate::model::command::Action;
use crate::model::paper::PaperState;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ReviewResult<T> = Result<T, ReviewError>;

/// Error returned by core review workflow operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// Construction input is malformed (bad command shape, bad track or
    /// paper field values, duplicate names/ids).
    InvalidArgument(String),
    /// The command is well formed but the paper's current state rejects it.
    InvalidTransition { state: PaperState, action: Action },
}

impl ReviewError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Returns whether this is a state-machine rejection.
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }
}

impl Display for ReviewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::InvalidTransition { state, action } => write!(
                f,
                "invalid command: {} is not allowed in state {}",
                action.as_str(),
                state.as_str()
            ),
        }
    }
}

impl Error for ReviewError {}
