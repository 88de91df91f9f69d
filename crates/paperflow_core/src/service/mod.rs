//! Core use-case services.
//!
//! # Responsibility
//! - Route caller operations to the active track and its papers.
//! - Keep UI/CLI layers decoupled from track and storage details.

pub mod registry;
