//! Categorization pipeline errors.

use thiserror::Error;

/// Failures of the categorization pipeline. None are retried internally;
/// the caller decides how to surface them.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// No API key configured; checked before any network I/O.
    #[error("No API key configured")]
    MissingCredential,

    /// The backend returned no usable text.
    #[error("Classifier returned an empty response")]
    EmptyResponse,

    /// The response text did not parse as the expected JSON shape.
    #[error("Classifier response is not valid categorization JSON: {0}")]
    MalformedResponse(String),

    /// Transport-level failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success status from the backend, with the response body.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}
