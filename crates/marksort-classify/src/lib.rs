//! # marksort-classify
//!
//! AI-assisted bookmark categorization: compacts and sanitizes bookmark
//! identifiers before anything leaves the process, dispatches a
//! token-budgeted classification request to a Gemini or OpenAI-compatible
//! backend, and remaps the structured response back to bookmark ids with
//! partial-failure tolerance.

pub mod client;
pub mod error;
mod gemini;
mod openai;
mod prompt;
pub mod sanitize;

pub use client::{CategoryMapping, Classifier, ClassifierConfig};
pub use error::ClassifyError;
pub use sanitize::{compact, CompactBookmark};
