//! Core logic for the resource dictionary store.
//! Owns record validation, canonical definition encoding and persistence.

pub mod codec;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use codec::{decode_definition, encode_definition, CodecError};
pub use config::DictionaryConfig;
pub use logging::{default_log_level, flush_logs, init_logging, logging_status, LoggingError};
pub use model::definition::{EntrySchema, PropertyDefinition, ResourceDefinition, SourceDefinition};
pub use model::dictionary::{DictionaryId, ResourceDictionary};
pub use repo::dictionary_repo::{
    DictionaryRepository, RepoError, RepoResult, SqliteDictionaryRepository,
};
pub use service::dictionary_service::{DictionaryService, DictionaryServiceError, ServiceResult};
pub use validation::definition::{
    BasicDefinitionValidator, DefinitionValidationError, DefinitionValidator,
};
pub use validation::record::{validate_dictionary_record, RecordValidationError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
