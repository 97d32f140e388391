//! Logical identifiers for document resources.

use std::fmt;

use serde::Serialize;

/// Stable identifier the provisioning engine uses to match a resource
/// across document regenerations.
///
/// Logical identifiers are alphanumeric only; the constructor drops
/// every other character, so callers can concatenate display names that
/// contain separators without producing an invalid identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LogicalId(String);

impl LogicalId {
    /// Build an identifier from raw text, dropping punctuation.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(
            raw.as_ref()
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect(),
        )
    }

    /// The same identifier with a deterministic index suffix, for
    /// resources derived from positional list elements.
    pub fn indexed(&self, index: usize) -> Self {
        Self(format!("{}{}", self.0, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
