//! Error types for vino-viz crates.

use thiserror::Error;

/// Result type alias using VinoError.
pub type VinoResult<T> = Result<T, VinoError>;

/// Primary error type for visualization operations.
#[derive(Debug, Error)]
pub enum VinoError {
    // === Input Errors ===
    #[error("Invalid ppa value: {0}")]
    InvalidPpa(String),

    #[error("Invalid ppa cardinality: expected {expected} values, got {got}")]
    PpaCardinality { expected: usize, got: usize },

    #[error("Invalid section plane: {0}")]
    InvalidPlane(String),

    #[error("Invalid section coordinates: {0}")]
    InvalidSectionAt(String),

    #[error("Unknown data format: {0}")]
    UnknownFormat(String),

    #[error("Invalid deep link: {0}")]
    InvalidDeepLink(String),

    // === Data Errors ===
    #[error("Fetch failed: {0}")]
    FetchError(String),

    #[error("Failed to decode response: {0}")]
    DecodeError(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Malformed data chunk: {0}")]
    MalformedChunk(String),

    #[error("No dataset selected")]
    NoDataset,
}

impl From<serde_json::Error> for VinoError {
    fn from(err: serde_json::Error) -> Self {
        VinoError::DecodeError(format!("JSON error: {}", err))
    }
}
