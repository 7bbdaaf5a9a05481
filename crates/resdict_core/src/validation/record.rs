//! Record-level (persistence shape) validation.

use crate::model::dictionary::ResourceDictionary;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum accepted length of a dictionary name, in characters.
pub const NAME_MAX_CHARS: usize = 100;

/// Persistence-shape rule violated by a dictionary record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Required field is absent or blank.
    MissingField(&'static str),
    NameTooLong { chars: usize },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "dictionary record `{field}` is missing"),
            Self::NameTooLong { chars } => write!(
                f,
                "dictionary name has {chars} chars; at most {NAME_MAX_CHARS} allowed"
            ),
        }
    }
}

impl Error for RecordValidationError {}

/// Checks that a fully derived record can be persisted.
pub fn validate_dictionary_record(record: &ResourceDictionary) -> Result<(), RecordValidationError> {
    if record.name.trim().is_empty() {
        return Err(RecordValidationError::MissingField("name"));
    }
    let chars = record.name.chars().count();
    if chars > NAME_MAX_CHARS {
        return Err(RecordValidationError::NameTooLong { chars });
    }

    if record.definition.trim().is_empty() {
        return Err(RecordValidationError::MissingField("definition"));
    }

    let required = [
        ("description", record.description.as_deref()),
        ("tags", record.tags.as_deref()),
        ("updated_by", record.updated_by.as_deref()),
        ("data_type", record.data_type.as_deref()),
        ("resource_type", record.resource_type.as_deref()),
    ];
    for (field, value) in required {
        if value.map_or(true, |value| value.trim().is_empty()) {
            return Err(RecordValidationError::MissingField(field));
        }
    }

    Ok(())
}
