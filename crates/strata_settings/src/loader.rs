//! Settings file loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{SettingsError, SettingsResult};
use crate::settings::Settings;

/// Section of the environment file holding the stack settings.
pub const AWS_SECTION: &str = "config:aws";

/// Loader for environment settings files.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from a YAML file, taking the `config:aws` section.
    pub fn from_file(path: impl AsRef<Path>) -> SettingsResult<Settings> {
        let path = path.as_ref();
        debug!("Reading settings from {:?}", path);

        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML content.
    ///
    /// The document is a mapping of section names to flat string maps;
    /// only the `config:aws` section is consumed. Key case is preserved.
    pub fn from_yaml(content: &str) -> SettingsResult<Settings> {
        let mut sections: BTreeMap<String, BTreeMap<String, String>> =
            serde_yaml::from_str(content)?;

        let values = sections
            .remove(AWS_SECTION)
            .ok_or_else(|| SettingsError::SectionNotFound(AWS_SECTION.to_string()))?;

        debug!("Loaded {} settings keys", values.len());
        Ok(Settings::new(values))
    }
}
