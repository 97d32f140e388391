//! Logical name and tag derivation.

use strata_model::{LogicalId, TagSet};
use strata_settings::Settings;

use crate::error::ComposeResult;

/// Derive the logical identifier and tag set for a component.
///
/// Looks up `app`, `env`, and `<component>.name`. The identifier is the
/// punctuation-free concatenation of the application and component
/// display names; the `Name` tag keeps separators for readability. With
/// `app=Acme`, `env=prod`, and `sg_app.name=SG` this yields
/// `("AcmeSG", {Name: "Acme-SG-prod", app: "Acme", env: "prod"})`.
///
/// Pure function of the settings; must be called (through a builder)
/// before anything references the component's identifier.
pub fn derive(settings: &Settings, component: &str) -> ComposeResult<(LogicalId, TagSet)> {
    let app = settings.app()?;
    let env = settings.env()?;
    let display = settings.string(&format!("{component}.name"))?;

    let id = LogicalId::new(format!("{app}{display}"));
    let tags = TagSet {
        name: format!("{app}-{display}-{env}"),
        app: app.to_string(),
        env: env.to_string(),
    };
    Ok((id, tags))
}
