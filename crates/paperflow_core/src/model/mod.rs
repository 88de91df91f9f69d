//! Review workflow domain model.
//!
//! # Responsibility
//! - Define commands, papers and the paper lifecycle state machine.
//!
//! # Invariants
//! - Commands are validated once, at construction.
//! - Paper state only changes through `model::transition::transition`.

pub mod command;
pub mod paper;
pub mod transition;
