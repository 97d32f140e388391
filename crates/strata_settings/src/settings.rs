//! Environment settings map with typed accessors.

use std::collections::BTreeMap;

use crate::error::{SettingsError, SettingsResult};

/// Immutable settings for one environment.
///
/// Keys are dotted `<component>.<attribute>` strings; values are the raw
/// strings from the environment file, case preserved. Every accessor for
/// a required key fails with [`SettingsError::MissingKey`] naming the
/// full dotted key when it is absent.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Wrap an already-loaded key/value mapping.
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    /// Look up an optional value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Look up a required string value.
    pub fn string(&self, key: &str) -> SettingsResult<&str> {
        self.get(key)
            .ok_or_else(|| SettingsError::MissingKey(key.to_string()))
    }

    /// Look up a required integer value.
    pub fn integer(&self, key: &str) -> SettingsResult<i64> {
        let raw = self.string(key)?;
        raw.trim()
            .parse()
            .map_err(|_| SettingsError::MalformedValue {
                key: key.to_string(),
                reason: format!("expected an integer, got {raw:?}"),
            })
    }

    /// Look up a required comma-separated list.
    ///
    /// Elements are trimmed of surrounding whitespace; an empty element
    /// (leading, trailing, or doubled comma) is malformed.
    pub fn list(&self, key: &str) -> SettingsResult<Vec<String>> {
        let raw = self.string(key)?;
        let items: Vec<String> = raw.split(',').map(|item| item.trim().to_string()).collect();
        if items.iter().any(|item| item.is_empty()) {
            return Err(SettingsError::MalformedValue {
                key: key.to_string(),
                reason: "empty list element".to_string(),
            });
        }
        Ok(items)
    }

    /// The application name seeding every logical identifier.
    pub fn app(&self) -> SettingsResult<&str> {
        self.string("app")
    }

    /// The environment name selecting the topology branch.
    pub fn env(&self) -> SettingsResult<&str> {
        self.string("env")
    }

    /// Whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of keys in the map.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, String)> for Settings {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
