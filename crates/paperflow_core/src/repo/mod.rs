//! In-memory paper collections.
//!
//! # Responsibility
//! - Group papers into tracks with per-track policy and id allocation.
//!
//! # Invariants
//! - Paper ids are unique within a track and kept in ascending order.

pub mod track;
