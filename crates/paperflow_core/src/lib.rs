//! Core domain logic for paper review tracks.
//! This crate is the single source of truth for workflow invariants.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::ReviewConfig;
pub use error::{ReviewError, ReviewResult};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::command::{Action, ClosingReason, Command, Recommendation};
pub use model::paper::{
    Paper, PaperFields, PaperId, PaperNote, PaperRecord, PaperState, PaperType, ANONYMOUS,
    MAX_PAPER_ID, PLACEHOLDER_AUTHOR_NAMES,
};
pub use model::transition::transition;
pub use repo::track::{IdSequence, Track, TrackHeader};
pub use service::registry::{PaperSummary, ReviewRegistry, ALL_STATES_FILTER};
pub use store::{StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
