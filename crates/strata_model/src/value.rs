//! Property value trees with provisioning-engine intrinsics.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::id::LogicalId;

/// A property value inside a resource declaration or output.
///
/// Values are either literals copied from settings or references to
/// sibling resources already present in the document. Maps use
/// `BTreeMap` so serialization order never depends on insertion or
/// hashing.
#[derive(Debug, Clone, PartialEq)]
pub enum CfnValue {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<CfnValue>),
    Map(BTreeMap<String, CfnValue>),
    /// `{"Ref": id}` — reference to a sibling resource.
    Ref(LogicalId),
    /// `{"Fn::GetAtt": [id, attribute]}` — derived attribute of a sibling.
    GetAtt(LogicalId, String),
    /// `{"Fn::Join": [separator, parts]}`.
    Join(String, Vec<CfnValue>),
    /// `{"Fn::Base64": inner}`.
    Base64(Box<CfnValue>),
}

impl CfnValue {
    /// Literal string value.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// List of literal strings.
    pub fn strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(|s| Self::String(s.into())).collect())
    }

    /// Map from key/value pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, CfnValue)>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Base64-encoded value.
    pub fn base64(inner: CfnValue) -> Self {
        Self::Base64(Box::new(inner))
    }

    /// Collect every logical id this value references, in traversal order.
    pub fn collect_references(&self, out: &mut Vec<LogicalId>) {
        match self {
            Self::String(_) | Self::Int(_) | Self::Bool(_) => {}
            Self::List(items) | Self::Join(_, items) => {
                for item in items {
                    item.collect_references(out);
                }
            }
            Self::Map(entries) => {
                for value in entries.values() {
                    value.collect_references(out);
                }
            }
            Self::Ref(id) | Self::GetAtt(id, _) => out.push(id.clone()),
            Self::Base64(inner) => inner.collect_references(out),
        }
    }
}

impl From<&str> for CfnValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for CfnValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for CfnValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for CfnValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<bool> for CfnValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl Serialize for CfnValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::List(items) => items.serialize(serializer),
            Self::Map(entries) => entries.serialize(serializer),
            Self::Ref(id) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Ref", id)?;
                map.end()
            }
            Self::GetAtt(id, attribute) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::GetAtt", &(id.as_str(), attribute.as_str()))?;
                map.end()
            }
            Self::Join(separator, parts) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Join", &(separator.as_str(), parts))?;
                map.end()
            }
            Self::Base64(inner) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Base64", inner)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_literals() {
        let value = CfnValue::map([
            ("Enabled", CfnValue::Bool(true)),
            ("Timeout", CfnValue::Int(300)),
            ("Target", CfnValue::string("HTTP:80/")),
        ]);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"Enabled": true, "Target": "HTTP:80/", "Timeout": 300})
        );
    }

    #[test]
    fn test_serialize_ref() {
        let value = CfnValue::Ref(LogicalId::new("AcmeAsg"));
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"Ref": "AcmeAsg"})
        );
    }

    #[test]
    fn test_serialize_get_att() {
        let value = CfnValue::GetAtt(LogicalId::new("AcmeElb"), "DNSName".to_string());
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"Fn::GetAtt": ["AcmeElb", "DNSName"]})
        );
    }

    #[test]
    fn test_serialize_base64_join() {
        let value = CfnValue::base64(CfnValue::Join(
            String::new(),
            vec!["#!/bin/bash -xe\n".into(), "apt-get update\n".into()],
        ));
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"Fn::Base64": {"Fn::Join": ["", ["#!/bin/bash -xe\n", "apt-get update\n"]]}})
        );
    }

    #[test]
    fn test_collect_references() {
        let value = CfnValue::map([
            ("A", CfnValue::Ref(LogicalId::new("First"))),
            (
                "B",
                CfnValue::List(vec![CfnValue::GetAtt(
                    LogicalId::new("Second"),
                    "DNSName".to_string(),
                )]),
            ),
        ]);
        let mut refs = Vec::new();
        value.collect_references(&mut refs);
        assert_eq!(refs, vec![LogicalId::new("First"), LogicalId::new("Second")]);
    }
}
