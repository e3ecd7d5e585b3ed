//! # marksort-organizer
//!
//! Drives the user-visible side of an AI categorization run: a
//! deterministic two-phase progress simulation while the classification
//! call is outstanding, and a single-consumer event loop that applies the
//! result to the store exactly once.

pub mod estimator;
pub mod runner;

pub use estimator::{phase_label, Phase, ProgressEstimator};
pub use runner::{run_organize, OrganizeEvent, OrganizeOptions, OrganizeOutcome};
