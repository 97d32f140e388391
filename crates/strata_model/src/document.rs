//! Document assembly and serialization.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{ModelError, ModelResult};
use crate::resource::{Handle, Resource};
use crate::value::CfnValue;

/// Provisioning document format version.
pub const FORMAT_VERSION: &str = "2010-09-09";

/// A named value exported from a document for consumption by another
/// document's settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    name: String,
    value: CfnValue,
}

impl Output {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &CfnValue {
        &self.value
    }
}

/// The complete generated description of a resource topology for one
/// environment.
///
/// Resources and outputs keep declaration order; builders must register
/// every resource before anything that references it, which makes the
/// document acyclic by construction.
#[derive(Debug, Clone)]
pub struct Document {
    version: String,
    description: String,
    resources: Vec<Resource>,
    outputs: Vec<Output>,
}

impl Document {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            description: description.into(),
            resources: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Register a resource, returning its handle for later references.
    ///
    /// Duplicate logical ids are rejected; identifiers must be unique
    /// for the provisioning engine to match resources across updates.
    pub fn add_resource(&mut self, resource: Resource) -> ModelResult<Handle> {
        let id = resource.logical_id().clone();
        if self.contains(id.as_str()) {
            return Err(ModelError::DuplicateLogicalId(id.to_string()));
        }
        self.resources.push(resource);
        Ok(Handle::new(id))
    }

    /// Register an exported output.
    pub fn add_output(&mut self, name: impl Into<String>, value: CfnValue) -> ModelResult<()> {
        let name = name.into();
        if self.outputs.iter().any(|output| output.name == name) {
            return Err(ModelError::DuplicateOutput(name));
        }
        self.outputs.push(Output { name, value });
        Ok(())
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Whether a resource with the given logical id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.resources
            .iter()
            .any(|resource| resource.logical_id().as_str() == id)
    }

    /// Look up a registered resource by logical id.
    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|resource| resource.logical_id().as_str() == id)
    }

    /// Serialize to the provisioning document JSON.
    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

struct ResourceMap<'a>(&'a [Resource]);

impl Serialize for ResourceMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for resource in self.0 {
            map.serialize_entry(resource.logical_id(), resource)?;
        }
        map.end()
    }
}

struct OutputMap<'a>(&'a [Output]);

impl Serialize for OutputMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for output in self.0 {
            map.serialize_entry(&output.name, &OutputBody(&output.value))?;
        }
        map.end()
    }
}

struct OutputBody<'a>(&'a CfnValue);

impl Serialize for OutputBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("Value", self.0)?;
        map.end()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("AWSTemplateFormatVersion", &self.version)?;
        map.serialize_entry("Description", &self.description)?;
        map.serialize_entry("Resources", &ResourceMap(&self.resources))?;
        if !self.outputs.is_empty() {
            map.serialize_entry("Outputs", &OutputMap(&self.outputs))?;
        }
        map.end()
    }
}
