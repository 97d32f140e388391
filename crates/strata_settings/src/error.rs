//! Error types for the settings module.

use thiserror::Error;

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors that can occur while loading or reading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("missing configuration key: {0}")]
    MissingKey(String),

    #[error("malformed value for key {key}: {reason}")]
    MalformedValue { key: String, reason: String },

    #[error("settings section not found: {0}")]
    SectionNotFound(String),

    #[error("settings validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
