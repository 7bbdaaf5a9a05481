//! Definition-level validation.

use crate::model::definition::ResourceDefinition;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rule violated by a parsed resource definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionValidationError {
    MissingResourceType,
    MissingProperty,
    MissingPropertyType,
    /// Collection-typed property without an entry schema type.
    MissingEntrySchema { data_type: String },
    MissingSourceType { source: String },
}

impl Display for DefinitionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingResourceType => write!(f, "resource-type is required"),
            Self::MissingProperty => write!(f, "property definition is required"),
            Self::MissingPropertyType => write!(f, "property type is required"),
            Self::MissingEntrySchema { data_type } => write!(
                f,
                "entry_schema type is required for collection property type `{data_type}`"
            ),
            Self::MissingSourceType { source } => {
                write!(f, "source `{source}` is missing its type")
            }
        }
    }
}

impl Error for DefinitionValidationError {}

/// Validator seam for parsed resource definitions.
pub trait DefinitionValidator {
    fn validate(&self, definition: &ResourceDefinition) -> Result<(), DefinitionValidationError>;
}

/// Default rule set: resource type, property type, entry schema for
/// collections and typed sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicDefinitionValidator;

impl DefinitionValidator for BasicDefinitionValidator {
    fn validate(&self, definition: &ResourceDefinition) -> Result<(), DefinitionValidationError> {
        if is_blank(definition.resource_type.as_deref()) {
            return Err(DefinitionValidationError::MissingResourceType);
        }

        let property = definition
            .property
            .as_ref()
            .ok_or(DefinitionValidationError::MissingProperty)?;
        let data_type = match property.data_type.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => value,
            _ => return Err(DefinitionValidationError::MissingPropertyType),
        };

        if property.is_collection() && is_blank(property.entry_schema_type()) {
            return Err(DefinitionValidationError::MissingEntrySchema {
                data_type: data_type.to_string(),
            });
        }

        for (source, template) in definition.sources.iter().flatten() {
            if is_blank(template.source_type.as_deref()) {
                return Err(DefinitionValidationError::MissingSourceType {
                    source: source.clone(),
                });
            }
        }

        Ok(())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |value| value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{BasicDefinitionValidator, DefinitionValidationError, DefinitionValidator};
    use crate::model::definition::{
        EntrySchema, PropertyDefinition, ResourceDefinition, SourceDefinition,
    };
    use std::collections::BTreeMap;

    fn valid_definition() -> ResourceDefinition {
        ResourceDefinition {
            resource_type: Some("ONAP".to_string()),
            property: Some(PropertyDefinition {
                data_type: Some("string".to_string()),
                ..PropertyDefinition::default()
            }),
            ..ResourceDefinition::default()
        }
    }

    fn validate(definition: &ResourceDefinition) -> Result<(), DefinitionValidationError> {
        BasicDefinitionValidator.validate(definition)
    }

    #[test]
    fn accepts_minimal_scalar_definition() {
        assert_eq!(validate(&valid_definition()), Ok(()));
    }

    #[test]
    fn rejects_blank_resource_type() {
        let mut definition = valid_definition();
        definition.resource_type = Some("  ".to_string());
        assert_eq!(
            validate(&definition),
            Err(DefinitionValidationError::MissingResourceType)
        );
    }

    #[test]
    fn rejects_missing_property_and_property_type() {
        let mut definition = valid_definition();
        definition.property = None;
        assert_eq!(
            validate(&definition),
            Err(DefinitionValidationError::MissingProperty)
        );

        definition.property = Some(PropertyDefinition::default());
        assert_eq!(
            validate(&definition),
            Err(DefinitionValidationError::MissingPropertyType)
        );
    }

    #[test]
    fn collection_requires_entry_schema_type() {
        let mut definition = valid_definition();
        let property = definition.property.as_mut().unwrap();
        property.data_type = Some("list".to_string());
        property.entry_schema = Some(EntrySchema::default());
        assert_eq!(
            validate(&definition),
            Err(DefinitionValidationError::MissingEntrySchema {
                data_type: "list".to_string()
            })
        );

        definition.property.as_mut().unwrap().entry_schema = Some(EntrySchema {
            data_type: Some("string".to_string()),
            description: None,
        });
        assert_eq!(validate(&definition), Ok(()));
    }

    #[test]
    fn sources_must_be_typed() {
        let mut definition = valid_definition();
        let mut sources = BTreeMap::new();
        sources.insert(
            "input".to_string(),
            SourceDefinition {
                source_type: Some("source-input".to_string()),
                ..SourceDefinition::default()
            },
        );
        sources.insert("db".to_string(), SourceDefinition::default());
        definition.sources = Some(sources);

        assert_eq!(
            validate(&definition),
            Err(DefinitionValidationError::MissingSourceType {
                source: "db".to_string()
            })
        );
    }
}
