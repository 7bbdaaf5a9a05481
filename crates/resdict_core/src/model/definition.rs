//! Resource definition document model.
//!
//! Field names follow the dictionary JSON contract (`resource-type`,
//! `entry_schema`, ...). Optional fields that are unset are omitted when
//! encoding, and maps are key-ordered so encoding is deterministic.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Data types whose values are collections and therefore need an entry schema.
pub const COLLECTION_TYPES: &[&str] = &["list", "map"];

/// Parsed form of a dictionary record's `definition` text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(
        rename = "updated-by",
        alias = "updatedBy",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_by: Option<String>,
    #[serde(
        rename = "resource-type",
        alias = "resourceType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub resource_type: Option<String>,
    #[serde(
        rename = "resource-path",
        alias = "resourcePath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub resource_path: Option<String>,
    /// Source templates keyed by source name (`input`, `default`, `db`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<BTreeMap<String, SourceDefinition>>,
}

/// Value shape of the dictionary resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<Value>>,
    #[serde(
        rename = "entry_schema",
        alias = "entrySchema",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub entry_schema: Option<EntrySchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl PropertyDefinition {
    /// Returns whether `type` names a collection type.
    pub fn is_collection(&self) -> bool {
        self.data_type
            .as_deref()
            .map(str::trim)
            .is_some_and(|data_type| COLLECTION_TYPES.contains(&data_type))
    }

    /// Entry schema type, when one is declared.
    pub fn entry_schema_type(&self) -> Option<&str> {
        self.entry_schema
            .as_ref()
            .and_then(|schema| schema.data_type.as_deref())
    }
}

/// Element type of a collection-typed property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntrySchema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Where a resource value is sourced from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceDefinition {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::{EntrySchema, PropertyDefinition};

    #[test]
    fn collection_detection_uses_trimmed_type() {
        let property = PropertyDefinition {
            data_type: Some(" list ".to_string()),
            ..PropertyDefinition::default()
        };
        assert!(property.is_collection());

        let scalar = PropertyDefinition {
            data_type: Some("string".to_string()),
            ..PropertyDefinition::default()
        };
        assert!(!scalar.is_collection());
        assert!(!PropertyDefinition::default().is_collection());
    }

    #[test]
    fn entry_schema_type_reads_nested_value() {
        let property = PropertyDefinition {
            entry_schema: Some(EntrySchema {
                data_type: Some("string".to_string()),
                description: None,
            }),
            ..PropertyDefinition::default()
        };
        assert_eq!(property.entry_schema_type(), Some("string"));
        assert_eq!(PropertyDefinition::default().entry_schema_type(), None);
    }
}
