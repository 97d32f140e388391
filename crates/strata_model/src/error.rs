//! Error types for the document model.

use thiserror::Error;

/// Result type alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while assembling or serializing a document.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("duplicate logical id: {0}")]
    DuplicateLogicalId(String),

    #[error("duplicate output name: {0}")]
    DuplicateOutput(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
