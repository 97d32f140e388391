//! # strata_settings
//!
//! Environment settings loading, typed access, and up-front validation
//! for Strata stack composition.
//!
//! Settings are a flat, case-preserved mapping of dotted
//! `<component>.<attribute>` keys to string values, scoped to one
//! environment and read from the `config:aws` section of a YAML file.
//!
//! ## Features
//!
//! - **Typed accessors**: string, integer, and comma-list lookups that
//!   fail fast on missing or malformed keys
//! - **Key schema**: recognized keys declared per component with
//!   required/optional markers, validated once after load
//! - **Loading**: YAML section extraction with preserved key case
//!
//! ## Example
//!
//! ```rust,no_run
//! use strata_settings::SettingsLoader;
//!
//! let settings = SettingsLoader::from_file("prod.yaml").unwrap();
//! let app = settings.app().unwrap();
//! let ports = settings.list("sg_app.ports").unwrap();
//! ```

pub mod error;
pub mod loader;
pub mod schema;
pub mod settings;

pub use error::{SettingsError, SettingsResult};
pub use loader::{SettingsLoader, AWS_SECTION};
pub use schema::{KeySpec, SchemaValidator, ValidationResult, ValueKind};
pub use settings::Settings;
