//! Error types for the composition engine.

use thiserror::Error;

use strata_model::ModelError;
use strata_settings::SettingsError;

/// Result type alias for composition operations.
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Errors that can occur while composing a stack document.
///
/// Any error aborts the whole run; there is no partial document output
/// and no retry.
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("document error: {0}")]
    Model(#[from] ModelError),

    #[error("missing stack output: {0}")]
    MissingOutput(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
