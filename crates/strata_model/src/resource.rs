//! Resource declarations.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::id::LogicalId;
use crate::tags::TagSet;
use crate::value::CfnValue;

/// One declared cloud object inside a document.
///
/// Properties may reference sibling resources through `Ref`/`GetAtt`
/// values; explicit dependencies cover ordering the property graph
/// cannot express.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    logical_id: LogicalId,
    kind: String,
    properties: BTreeMap<String, CfnValue>,
    depends_on: Vec<LogicalId>,
}

impl Resource {
    /// Start a declaration of the given resource type.
    pub fn new(logical_id: LogicalId, kind: impl Into<String>) -> Self {
        Self {
            logical_id,
            kind: kind.into(),
            properties: BTreeMap::new(),
            depends_on: Vec::new(),
        }
    }

    /// Set a property value.
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<CfnValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Attach a tag set as the `Tags` property.
    pub fn tags(self, tags: &TagSet) -> Self {
        self.prop("Tags", tags.to_value())
    }

    /// Add an explicit dependency on another resource.
    pub fn depends_on(mut self, id: &LogicalId) -> Self {
        self.depends_on.push(id.clone());
        self
    }

    pub fn logical_id(&self) -> &LogicalId {
        &self.logical_id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn property(&self, name: &str) -> Option<&CfnValue> {
        self.properties.get(name)
    }

    /// Every logical id this resource references, through properties or
    /// explicit dependencies.
    pub fn references(&self) -> Vec<LogicalId> {
        let mut refs = Vec::new();
        for value in self.properties.values() {
            value.collect_references(&mut refs);
        }
        refs.extend(self.depends_on.iter().cloned());
        refs
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("Type", &self.kind)?;
        if !self.properties.is_empty() {
            map.serialize_entry("Properties", &self.properties)?;
        }
        // Single dependency serializes as a plain string, matching the
        // provisioning schema's short form.
        match self.depends_on.as_slice() {
            [] => {}
            [single] => map.serialize_entry("DependsOn", single)?,
            many => map.serialize_entry("DependsOn", many)?,
        }
        map.end()
    }
}

/// Opaque token for a resource already registered in a document.
///
/// Builders hand handles to later builders, which turn them into
/// `Ref`/`GetAtt` property values; the handle does not expose the
/// underlying declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handle {
    id: LogicalId,
}

impl Handle {
    pub(crate) fn new(id: LogicalId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &LogicalId {
        &self.id
    }

    /// `Ref` to the resource.
    pub fn reference(&self) -> CfnValue {
        CfnValue::Ref(self.id.clone())
    }

    /// `GetAtt` on the resource.
    pub fn attribute(&self, attribute: impl Into<String>) -> CfnValue {
        CfnValue::GetAtt(self.id.clone(), attribute.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_minimal() {
        let resource = Resource::new(LogicalId::new("AcmeUser"), "AWS::IAM::User");
        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            json!({"Type": "AWS::IAM::User"})
        );
    }

    #[test]
    fn test_serialize_single_depends_on() {
        let resource = Resource::new(LogicalId::new("AcmeRoute"), "AWS::EC2::Route")
            .prop("DestinationCidrBlock", "0.0.0.0/0")
            .depends_on(&LogicalId::new("AcmeAttachment"));
        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            json!({
                "Type": "AWS::EC2::Route",
                "Properties": {"DestinationCidrBlock": "0.0.0.0/0"},
                "DependsOn": "AcmeAttachment",
            })
        );
    }

    #[test]
    fn test_references_include_depends_on() {
        let resource = Resource::new(LogicalId::new("AcmePolicy"), "AWS::AutoScaling::ScalingPolicy")
            .prop("AutoScalingGroupName", CfnValue::Ref(LogicalId::new("AcmeAsg")))
            .depends_on(&LogicalId::new("AcmeAsg"));
        assert_eq!(
            resource.references(),
            vec![LogicalId::new("AcmeAsg"), LogicalId::new("AcmeAsg")]
        );
    }

    #[test]
    fn test_handle_values() {
        let handle = Handle::new(LogicalId::new("AcmeElb"));
        assert_eq!(
            serde_json::to_value(handle.reference()).unwrap(),
            json!({"Ref": "AcmeElb"})
        );
        assert_eq!(
            serde_json::to_value(handle.attribute("DNSName")).unwrap(),
            json!({"Fn::GetAtt": ["AcmeElb", "DNSName"]})
        );
    }
}
