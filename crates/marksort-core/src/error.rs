//! Core errors.

use thiserror::Error;

/// Errors raised at the import boundary.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file could not be read.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The file does not look like a bookmark HTML export.
    #[error("Not an HTML bookmark file: {0}")]
    NotHtml(String),

    /// The document contained no recognizable bookmarks.
    #[error("No bookmarks recognized in the file")]
    NoBookmarks,
}

/// Persistence errors.
#[derive(Debug, Error)]
pub enum PersistError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}
