//! Resource dictionary record model.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes for a stored row.
//! - `definition` of a saved record is the canonical re-encoded definition.
//! - Updates overwrite the mutable field whitelist, never `id`/`created_at`.

use serde::{Deserialize, Serialize};

/// Store-assigned row identity.
pub type DictionaryId = i64;

/// Persisted resource dictionary record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDictionary {
    /// `None` until the record has been inserted.
    pub id: Option<DictionaryId>,
    /// Unique business key.
    pub name: String,
    /// Serialized resource definition (canonical form once saved).
    pub definition: String,
    /// Copied from `property.description`.
    pub description: Option<String>,
    /// Copied from `resource-type`.
    pub resource_type: Option<String>,
    /// Copied from `resource-path`.
    pub resource_path: Option<String>,
    /// Copied from `property.type`.
    pub data_type: Option<String>,
    /// Copied from `property.entry_schema.type` when present.
    pub entry_schema: Option<String>,
    /// Free-form tag text, searched by case-insensitive substring.
    pub tags: Option<String>,
    /// Audit identity of the last writer.
    pub updated_by: Option<String>,
    /// Unix epoch milliseconds, maintained by the store.
    pub created_at: Option<i64>,
    /// Unix epoch milliseconds, maintained by the store.
    pub updated_at: Option<i64>,
}

impl ResourceDictionary {
    /// Creates an unsaved record carrying caller input only.
    pub fn new(
        name: impl Into<String>,
        definition: impl Into<String>,
        updated_by: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
            updated_by: Some(updated_by.into()),
            ..Self::default()
        }
    }

    /// Copies every mutable field from `incoming` onto this stored record.
    ///
    /// `id`, `created_at` and `updated_at` stay untouched so the row keeps
    /// its identity.
    pub fn overwrite_from(&mut self, incoming: ResourceDictionary) {
        self.name = incoming.name;
        self.definition = incoming.definition;
        self.description = incoming.description;
        self.resource_type = incoming.resource_type;
        self.resource_path = incoming.resource_path;
        self.tags = incoming.tags;
        self.updated_by = incoming.updated_by;
        self.data_type = incoming.data_type;
        self.entry_schema = incoming.entry_schema;
    }

    /// Returns whether the record has been persisted.
    pub fn is_stored(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::ResourceDictionary;

    #[test]
    fn overwrite_from_keeps_identity_and_replaces_fields() {
        let mut stored = ResourceDictionary {
            id: Some(7),
            created_at: Some(1_000),
            updated_at: Some(2_000),
            description: Some("old".to_string()),
            entry_schema: Some("string".to_string()),
            ..ResourceDictionary::new("vnf-name", "{}", "alice")
        };
        let incoming = ResourceDictionary {
            id: Some(99),
            created_at: Some(5),
            description: Some("new".to_string()),
            tags: Some("vnf".to_string()),
            ..ResourceDictionary::new("vnf-name", "{\"a\":1}", "bob")
        };

        stored.overwrite_from(incoming);

        assert_eq!(stored.id, Some(7));
        assert_eq!(stored.created_at, Some(1_000));
        assert_eq!(stored.updated_at, Some(2_000));
        assert_eq!(stored.definition, "{\"a\":1}");
        assert_eq!(stored.description.as_deref(), Some("new"));
        assert_eq!(stored.tags.as_deref(), Some("vnf"));
        assert_eq!(stored.updated_by.as_deref(), Some("bob"));
        assert_eq!(stored.entry_schema, None);
    }

    #[test]
    fn new_record_is_not_stored() {
        let record = ResourceDictionary::new("a", "{}", "u");
        assert!(!record.is_stored());
        assert_eq!(record.updated_by.as_deref(), Some("u"));
    }
}
