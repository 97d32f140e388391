//! Descriptive tags for taggable resources.

use crate::value::CfnValue;

/// Tag set applied to resources that support tagging.
///
/// Unlike logical identifiers, tag values keep separators for
/// readability and carry no uniqueness requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    /// `<app>-<display>-<env>` human-readable name.
    pub name: String,
    pub app: String,
    pub env: String,
}

impl TagSet {
    /// Render as the `[{"Key": …, "Value": …}]` list form, fixed order.
    pub fn to_value(&self) -> CfnValue {
        CfnValue::List(vec![
            Self::tag("Name", &self.name),
            Self::tag("app", &self.app),
            Self::tag("env", &self.env),
        ])
    }

    /// The same list with `PropagateAtLaunch` on each tag, as required
    /// by scaling-group tags.
    pub fn to_propagating_value(&self) -> CfnValue {
        CfnValue::List(vec![
            Self::propagating_tag("Name", &self.name),
            Self::propagating_tag("app", &self.app),
            Self::propagating_tag("env", &self.env),
        ])
    }

    fn tag(key: &str, value: &str) -> CfnValue {
        CfnValue::map([("Key", key.into()), ("Value", value.into())])
    }

    fn propagating_tag(key: &str, value: &str) -> CfnValue {
        CfnValue::map([
            ("Key", key.into()),
            ("Value", value.into()),
            ("PropagateAtLaunch", true.into()),
        ])
    }
}
