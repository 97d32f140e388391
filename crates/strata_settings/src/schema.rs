//! Recognized settings keys and up-front validation.
//!
//! Each topology declares the dotted keys it reads as a table of
//! [`KeySpec`] entries. Validation runs once, right after load, and
//! reports every missing or ill-typed key instead of failing lazily in
//! the middle of a builder sequence.

use crate::error::{SettingsError, SettingsResult};
use crate::settings::Settings;

/// Value shape expected for a settings key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Free-form string.
    String,
    /// Base-10 integer.
    Integer,
    /// Comma-separated list, elements trimmed, none empty.
    CommaList,
    /// Comma-separated list of integers.
    IntegerList,
}

/// One recognized dotted key with its requiredness and value shape.
#[derive(Debug, Clone, Copy)]
pub struct KeySpec {
    pub key: &'static str,
    pub kind: ValueKind,
    pub required: bool,
}

impl KeySpec {
    /// A key that must be present.
    pub const fn required(key: &'static str, kind: ValueKind) -> Self {
        Self {
            key,
            kind,
            required: true,
        }
    }

    /// A key that may be absent.
    pub const fn optional(key: &'static str, kind: ValueKind) -> Self {
        Self {
            key,
            kind,
            required: false,
        }
    }
}

/// Validation result with per-key details.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
    }

    /// Convert into a hard error joining every message.
    pub fn into_result(self) -> SettingsResult<()> {
        if self.valid {
            Ok(())
        } else {
            Err(SettingsError::ValidationFailed(self.errors.join("; ")))
        }
    }
}

/// Validator for settings against a key schema.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Check every key in `specs` against `settings`.
    pub fn validate(settings: &Settings, specs: &[KeySpec]) -> ValidationResult {
        let mut result = ValidationResult::new();

        for spec in specs {
            match settings.get(spec.key) {
                None if spec.required => {
                    result.add_error(format!("missing required key {}", spec.key));
                }
                None => {}
                Some(_) => {
                    if let Err(err) = Self::check_kind(settings, spec) {
                        result.add_error(err.to_string());
                    }
                }
            }
        }

        result
    }

    /// Validate and fail with a single joined error on any problem.
    pub fn validate_strict(settings: &Settings, specs: &[KeySpec]) -> SettingsResult<()> {
        Self::validate(settings, specs).into_result()
    }

    fn check_kind(settings: &Settings, spec: &KeySpec) -> SettingsResult<()> {
        match spec.kind {
            ValueKind::String => {
                settings.string(spec.key)?;
            }
            ValueKind::Integer => {
                settings.integer(spec.key)?;
            }
            ValueKind::CommaList => {
                settings.list(spec.key)?;
            }
            ValueKind::IntegerList => {
                for item in settings.list(spec.key)? {
                    item.parse::<i64>()
                        .map_err(|_| SettingsError::MalformedValue {
                            key: spec.key.to_string(),
                            reason: format!("expected integer list element, got {item:?}"),
                        })?;
                }
            }
        }
        Ok(())
    }
}
