//! Process configuration for dictionary store entry points.
//!
//! Values come from environment variables and may be overridden by the
//! caller (for example CLI flags) before use.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "RESDICT_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "RESDICT_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "RESDICT_LOG_DIR";

/// Database file used when no path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "resdict.sqlite3";

/// Resolved settings for opening the store and starting logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Logging stays disabled when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl DictionaryConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: read(ENV_DB_PATH).map_or(defaults.db_path, PathBuf::from),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        }
    }

    /// Checks that `log_level` names a supported level.
    pub fn validate(&self) -> Result<(), LoggingError> {
        normalize_level(&self.log_level).map(|_| ())
    }
}
