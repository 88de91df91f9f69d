//! Pure paper lifecycle transition function.
//!
//! The whole transition table lives in `transition`. It never mutates its
//! inputs: guards are evaluated against the current fields and the result is
//! a fresh `(state, fields)` pair, so a rejected command cannot leave a paper
//! half-updated.
//!
//! | State | Action | Next state |
//! |---|---|---|
//! | Submitted | ASSIGN | Reviewing |
//! | Submitted | SUBMIT | Submitted |
//! | Submitted | ACCEPT | Registering |
//! | Submitted | CLOSE (Withdrawn, Rejected, Duplicate) | Closed |
//! | Reviewing | RECOMMEND | Submitted |
//! | Reviewing | PROPOSE | Revising |
//! | Reviewing | CLOSE (Withdrawn) | Closed |
//! | Revising | MODIFY | Submitted |
//! | Revising | CLOSE (Withdrawn) | Closed |
//! | Registering | PROCESS (Accepted) | Closed |
//!
//! Every other pair is an `InvalidTransition`.

use crate::error::{ReviewError, ReviewResult};
use crate::model::command::{Action, ClosingReason, Command};
use crate::model::paper::{
    PaperFields, PaperNote, PaperState, PaperType, ANONYMOUS, PLACEHOLDER_AUTHOR_NAMES,
};

/// Computes the next state and fields for `command`.
///
/// # Errors
/// - `InvalidTransition` when `state` does not accept `command` or one of
///   the state's guards fails.
pub fn transition(
    state: PaperState,
    fields: &PaperFields,
    command: &Command,
) -> ReviewResult<(PaperState, PaperFields)> {
    let reject = || ReviewError::InvalidTransition {
        state,
        action: command.action(),
    };
    if state.is_terminal() {
        return Err(reject());
    }
    let mut next = fields.clone();

    match (state, command.action()) {
        (PaperState::Submitted, Action::Assign) => {
            if fields.processed {
                return Err(reject());
            }
            if fields.author_names != ANONYMOUS {
                next.saved_author_names = Some(fields.author_names.clone());
            }
            next.author_names = ANONYMOUS.to_string();
            next.reviewer = command.payload().map(str::to_string);
            next.processed = false;
            Ok((PaperState::Reviewing, next))
        }
        (PaperState::Submitted, Action::Submit) => {
            if fields.paper_type == PaperType::Abstract && !fields.processed {
                return Err(reject());
            }
            if fields
                .note
                .and_then(PaperNote::recommendation)
                .is_some_and(|code| code.is_reject())
            {
                return Err(reject());
            }
            next.processed = false;
            next.note = None;
            next.reviewer = None;
            next.paper_type = PaperType::FullPaper;
            next.author_names = restored_author_names(fields);
            Ok((PaperState::Submitted, next))
        }
        (PaperState::Submitted, Action::Accept) => {
            if fields.paper_type == PaperType::Abstract || !fields.processed {
                return Err(reject());
            }
            next.note = None;
            next.processed = true;
            next.author_names = restored_author_names(fields);
            next.reviewer = None;
            Ok((PaperState::Registering, next))
        }
        (PaperState::Submitted, Action::Close) => {
            let reason = command.closing_reason().ok_or_else(reject)?;
            match reason {
                ClosingReason::Withdrawn => {}
                ClosingReason::Rejected if fields.processed => next.processed = true,
                ClosingReason::Duplicate if !fields.processed => next.processed = false,
                _ => return Err(reject()),
            }
            close_with(&mut next, fields, reason);
            Ok((PaperState::Closed, next))
        }
        (PaperState::Reviewing, Action::Recommend) => {
            let code = command.recommendation().ok_or_else(reject)?;
            next.note = Some(PaperNote::Recommendation(code));
            next.processed = true;
            Ok((PaperState::Submitted, next))
        }
        (PaperState::Reviewing, Action::Propose) => {
            if fields.paper_type == PaperType::Abstract {
                return Err(reject());
            }
            next.processed = false;
            next.author_names = ANONYMOUS.to_string();
            next.reviewer = None;
            Ok((PaperState::Revising, next))
        }
        (PaperState::Reviewing | PaperState::Revising, Action::Close) => {
            if command.closing_reason() != Some(ClosingReason::Withdrawn) {
                return Err(reject());
            }
            next.processed = false;
            close_with(&mut next, fields, ClosingReason::Withdrawn);
            Ok((PaperState::Closed, next))
        }
        (PaperState::Revising, Action::Modify) => Ok((PaperState::Submitted, next)),
        (PaperState::Registering, Action::Process) => {
            if command.closing_reason() != Some(ClosingReason::Accepted) {
                return Err(reject());
            }
            next.note = Some(PaperNote::Closing(ClosingReason::Accepted));
            next.processed = true;
            Ok((PaperState::Closed, next))
        }
        _ => Err(reject()),
    }
}

/// Real author names to show once a paper leaves anonymous review.
///
/// Prefers the hidden backup, then the current name when it is not the
/// anonymous sentinel, then `PLACEHOLDER_AUTHOR_NAMES`.
pub fn restored_author_names(fields: &PaperFields) -> String {
    if let Some(saved) = fields
        .saved_author_names
        .as_deref()
        .filter(|saved| !saved.trim().is_empty())
    {
        return saved.to_string();
    }
    if !fields.author_names.trim().is_empty() && fields.author_names != ANONYMOUS {
        return fields.author_names.clone();
    }
    PLACEHOLDER_AUTHOR_NAMES.to_string()
}

fn close_with(next: &mut PaperFields, current: &PaperFields, reason: ClosingReason) {
    next.author_names = restored_author_names(current);
    next.reviewer = None;
    next.note = Some(PaperNote::Closing(reason));
}
