//! Resource dictionary use-case service.
//!
//! # Responsibility
//! - Validate incoming definitions and derive summary fields on save.
//! - Upsert records by unique name.
//! - Expose get/search/delete accessors with input preconditions.
//!
//! # Invariants
//! - Precondition, decode and validation failures never reach the store.
//! - Saved `definition` text is the pretty-printed canonical encoding.
//! - Updates keep the stored row identity and overwrite the mutable field
//!   whitelist (`ResourceDictionary::overwrite_from`).
//!
//! Two saves racing on the same new name both miss the lookup; the UNIQUE
//! constraint on `name` makes the second insert fail with a storage error.

use crate::codec::{decode_definition, encode_definition, CodecError};
use crate::model::definition::ResourceDefinition;
use crate::model::dictionary::ResourceDictionary;
use crate::repo::dictionary_repo::{DictionaryRepository, RepoError};
use crate::validation::definition::{
    BasicDefinitionValidator, DefinitionValidationError, DefinitionValidator,
};
use crate::validation::record::{validate_dictionary_record, RecordValidationError};
use crate::logging::sanitize_message;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const LOG_VALUE_MAX_CHARS: usize = 120;

/// Service error for dictionary use-cases.
#[derive(Debug)]
pub enum DictionaryServiceError {
    /// Caller argument failed a precondition.
    InvalidInput(&'static str),
    /// Definition text is not a valid resource definition document.
    Decode(CodecError),
    /// Parsed definition violates a domain rule.
    DefinitionValidation(DefinitionValidationError),
    /// Derived record violates a persistence-shape rule.
    RecordValidation(RecordValidationError),
    /// No record stored under the requested name.
    NotFound(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for DictionaryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::Decode(err) => write!(f, "{err}"),
            Self::DefinitionValidation(err) => write!(f, "invalid resource definition: {err}"),
            Self::RecordValidation(err) => write!(f, "invalid resource dictionary: {err}"),
            Self::NotFound(name) => write!(f, "resource dictionary not found: {name}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DictionaryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::DefinitionValidation(err) => Some(err),
            Self::RecordValidation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::InvalidInput(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<CodecError> for DictionaryServiceError {
    fn from(value: CodecError) -> Self {
        Self::Decode(value)
    }
}

impl From<DefinitionValidationError> for DictionaryServiceError {
    fn from(value: DefinitionValidationError) -> Self {
        Self::DefinitionValidation(value)
    }
}

impl From<RecordValidationError> for DictionaryServiceError {
    fn from(value: RecordValidationError) -> Self {
        Self::RecordValidation(value)
    }
}

impl From<RepoError> for DictionaryServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl DictionaryServiceError {
    /// Stable short code for logs and callers mapping errors to responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::Decode(_) => "decode_error",
            Self::DefinitionValidation(_) => "definition_invalid",
            Self::RecordValidation(_) => "record_invalid",
            Self::NotFound(_) => "not_found",
            Self::Repo(_) => "storage_error",
        }
    }
}

pub type ServiceResult<T> = Result<T, DictionaryServiceError>;

/// Dictionary record manager over a repository and a definition validator.
pub struct DictionaryService<
    R: DictionaryRepository,
    V: DefinitionValidator = BasicDefinitionValidator,
> {
    repo: R,
    validator: V,
}

impl<R: DictionaryRepository> DictionaryService<R> {
    /// Creates a service with the default definition rule set.
    pub fn new(repo: R) -> Self {
        Self::with_validator(repo, BasicDefinitionValidator)
    }
}

impl<R: DictionaryRepository, V: DefinitionValidator> DictionaryService<R, V> {
    /// Creates a service with a caller-provided definition validator.
    pub fn with_validator(repo: R, validator: V) -> Self {
        Self { repo, validator }
    }

    /// Gets one record by its unique name.
    pub fn get_by_name(&self, name: &str) -> ServiceResult<ResourceDictionary> {
        if name.trim().is_empty() {
            return Err(DictionaryServiceError::InvalidInput(
                "resource dictionary name is missing",
            ));
        }

        self.repo
            .find_by_name(name)?
            .ok_or_else(|| DictionaryServiceError::NotFound(name.to_string()))
    }

    /// Returns the records whose name is in `names`; unknown names are skipped.
    pub fn search_by_names(&self, names: &[String]) -> ServiceResult<Vec<ResourceDictionary>> {
        if names.is_empty() {
            return Err(DictionaryServiceError::InvalidInput(
                "no search names provided",
            ));
        }
        Ok(self.repo.find_by_name_in(names)?)
    }

    /// Returns the records whose tags contain `tags` (case-insensitive).
    pub fn search_by_tags(&self, tags: &str) -> ServiceResult<Vec<ResourceDictionary>> {
        if tags.trim().is_empty() {
            return Err(DictionaryServiceError::InvalidInput(
                "no search tags provided",
            ));
        }
        Ok(self.repo.find_by_tags_containing_ignore_case(tags)?)
    }

    /// Validates, canonicalizes and upserts one record by name.
    ///
    /// # Contract
    /// - `definition` must be non-blank.
    /// - Summary fields are derived from the definition, overriding caller input.
    /// - Returns the persisted record including store-assigned identity.
    pub fn save(&self, record: ResourceDictionary) -> ServiceResult<ResourceDictionary> {
        let started_at = Instant::now();
        let name = log_value(&record.name);
        let result = self.save_inner(record);

        match &result {
            Ok(saved) => info!(
                "event=dictionary_save module=service status=ok name={} id={} duration_ms={}",
                name,
                saved.id.unwrap_or_default(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=dictionary_save module=service status=error name={} error_code={} duration_ms={}",
                name,
                err.code(),
                started_at.elapsed().as_millis()
            ),
        }

        result
    }

    fn save_inner(&self, mut record: ResourceDictionary) -> ServiceResult<ResourceDictionary> {
        if record.definition.trim().is_empty() {
            return Err(DictionaryServiceError::InvalidInput(
                "resource dictionary definition is missing",
            ));
        }

        let mut definition = decode_definition(&record.definition)?;
        self.validator.validate(&definition)?;

        apply_definition_summary(&mut record, &mut definition);
        record.definition = encode_definition(&definition, true)?;

        validate_dictionary_record(&record)?;

        let saved = match self.repo.find_by_name(&record.name)? {
            Some(mut stored) => {
                stored.overwrite_from(record);
                self.repo.save(&stored)?
            }
            None => self.repo.save(&record)?,
        };
        Ok(saved)
    }

    /// Deletes every record named `name`; missing names (blank included)
    /// are a no-op.
    ///
    /// Returns the number of deleted rows.
    pub fn delete(&self, name: &str) -> ServiceResult<usize> {
        let deleted = self.repo.delete_by_name(name)?;
        info!(
            "event=dictionary_delete module=service status=ok name={} deleted={deleted}",
            log_value(name)
        );
        Ok(deleted)
    }
}

/// Quoted, single-line form of caller text for key=value log lines.
fn log_value(value: &str) -> String {
    format!("{:?}", sanitize_message(value, LOG_VALUE_MAX_CHARS))
}

/// Copies summary fields from `definition` onto `record` and stamps the
/// record's audit identity into the definition.
fn apply_definition_summary(record: &mut ResourceDictionary, definition: &mut ResourceDefinition) {
    record.resource_type = definition.resource_type.clone();
    record.resource_path = definition.resource_path.clone();
    record.tags = definition.tags.clone();
    definition.updated_by = record.updated_by.clone();

    if let Some(property) = definition.property.as_ref() {
        record.description = property.description.clone();
        record.data_type = property.data_type.clone();
        if let Some(entry_schema) = property.entry_schema.as_ref() {
            record.entry_schema = entry_schema.data_type.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_definition_summary, log_value};
    use crate::codec::decode_definition;
    use crate::model::dictionary::ResourceDictionary;

    #[test]
    fn summary_copies_fields_and_stamps_updated_by() {
        let mut definition = decode_definition(
            r#"{
                "tags": "vnf",
                "updated-by": "someone-else",
                "resource-type": "ONAP",
                "resource-path": "vnf/name",
                "property": {"type": "list", "description": "d",
                             "entry_schema": {"type": "string"}}
            }"#,
        )
        .unwrap();
        let mut record = ResourceDictionary::new("vnf-name", "{}", "alice");

        apply_definition_summary(&mut record, &mut definition);

        assert_eq!(record.resource_type.as_deref(), Some("ONAP"));
        assert_eq!(record.resource_path.as_deref(), Some("vnf/name"));
        assert_eq!(record.tags.as_deref(), Some("vnf"));
        assert_eq!(record.description.as_deref(), Some("d"));
        assert_eq!(record.data_type.as_deref(), Some("list"));
        assert_eq!(record.entry_schema.as_deref(), Some("string"));
        assert_eq!(definition.updated_by.as_deref(), Some("alice"));
    }

    #[test]
    fn summary_leaves_entry_schema_unset_without_schema() {
        let mut definition =
            decode_definition(r#"{"resource-type":"ONAP","property":{"type":"string"}}"#).unwrap();
        let mut record = ResourceDictionary::new("n", "{}", "u");

        apply_definition_summary(&mut record, &mut definition);

        assert_eq!(record.entry_schema, None);
        assert_eq!(record.tags, None);
    }

    #[test]
    fn log_value_is_quoted_and_single_line() {
        let value = log_value("vnf\nname status=ok");
        assert!(!value.contains('\n'));
        assert!(value.starts_with('"') && value.ends_with('"'));
        assert_eq!(value, "\"vnf name status=ok\"");
    }
}
