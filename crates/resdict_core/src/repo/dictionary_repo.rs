//! Resource dictionary repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Keyed lookups, searches, insert-or-update and delete over
//!   `resource_dictionary`.
//!
//! # Invariants
//! - `save` inserts when `id` is `None` and updates by `id` otherwise.
//! - `save` returns the row as read back after the write.
//! - List queries are ordered by `name ASC`.

use crate::db::DbError;
use crate::model::dictionary::{DictionaryId, ResourceDictionary};
use rusqlite::{params, params_from_iter, Connection, Row};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DICTIONARY_SELECT_SQL: &str = "SELECT
    id,
    name,
    definition,
    description,
    resource_type,
    resource_path,
    data_type,
    entry_schema,
    tags,
    updated_by,
    created_at,
    updated_at
FROM resource_dictionary";

/// Names bound per `IN (...)` query, well below SQLite's host parameter limit.
const NAME_IN_CHUNK_SIZE: usize = 500;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for dictionary persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Update targeted a row id that no longer exists.
    NotFound(DictionaryId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "resource dictionary row not found: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted resource dictionary data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}


impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Query(value))
    }
}

/// Record store contract for resource dictionary rows.
pub trait DictionaryRepository {
    fn find_by_name(&self, name: &str) -> RepoResult<Option<ResourceDictionary>>;
    /// Any number of names is accepted; duplicates are matched once.
    fn find_by_name_in(&self, names: &[String]) -> RepoResult<Vec<ResourceDictionary>>;
    fn find_by_tags_containing_ignore_case(&self, tags: &str)
        -> RepoResult<Vec<ResourceDictionary>>;
    /// Inserts or updates `record` and returns the persisted form.
    fn save(&self, record: &ResourceDictionary) -> RepoResult<ResourceDictionary>;
    /// Deletes every row named `name`, returning the number removed.
    fn delete_by_name(&self, name: &str) -> RepoResult<usize>;
}

impl<R: DictionaryRepository + ?Sized> DictionaryRepository for &R {
    fn find_by_name(&self, name: &str) -> RepoResult<Option<ResourceDictionary>> {
        (**self).find_by_name(name)
    }

    fn find_by_name_in(&self, names: &[String]) -> RepoResult<Vec<ResourceDictionary>> {
        (**self).find_by_name_in(names)
    }

    fn find_by_tags_containing_ignore_case(
        &self,
        tags: &str,
    ) -> RepoResult<Vec<ResourceDictionary>> {
        (**self).find_by_tags_containing_ignore_case(tags)
    }

    fn save(&self, record: &ResourceDictionary) -> RepoResult<ResourceDictionary> {
        (**self).save(record)
    }

    fn delete_by_name(&self, name: &str) -> RepoResult<usize> {
        (**self).delete_by_name(name)
    }
}

/// SQLite-backed dictionary repository.
pub struct SqliteDictionaryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDictionaryRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn get_by_id(&self, id: DictionaryId) -> RepoResult<Option<ResourceDictionary>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DICTIONARY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_dictionary_row(row)?));
        }
        Ok(None)
    }

    fn insert(&self, record: &ResourceDictionary) -> RepoResult<DictionaryId> {
        self.conn.execute(
            "INSERT INTO resource_dictionary (
                name,
                definition,
                description,
                resource_type,
                resource_path,
                data_type,
                entry_schema,
                tags,
                updated_by
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                record.name.as_str(),
                record.definition.as_str(),
                record.description.as_deref(),
                record.resource_type.as_deref(),
                record.resource_path.as_deref(),
                record.data_type.as_deref(),
                record.entry_schema.as_deref(),
                record.tags.as_deref(),
                record.updated_by.as_deref(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, id: DictionaryId, record: &ResourceDictionary) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE resource_dictionary
             SET
                name = ?1,
                definition = ?2,
                description = ?3,
                resource_type = ?4,
                resource_path = ?5,
                data_type = ?6,
                entry_schema = ?7,
                tags = ?8,
                updated_by = ?9,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?10;",
            params![
                record.name.as_str(),
                record.definition.as_str(),
                record.description.as_deref(),
                record.resource_type.as_deref(),
                record.resource_path.as_deref(),
                record.data_type.as_deref(),
                record.entry_schema.as_deref(),
                record.tags.as_deref(),
                record.updated_by.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn query_list(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<ResourceDictionary>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_dictionary_row(row)?);
        }
        Ok(records)
    }
}

impl DictionaryRepository for SqliteDictionaryRepository<'_> {
    fn find_by_name(&self, name: &str) -> RepoResult<Option<ResourceDictionary>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DICTIONARY_SELECT_SQL} WHERE name = ?1;"))?;
        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_dictionary_row(row)?));
        }
        Ok(None)
    }

    fn find_by_name_in(&self, names: &[String]) -> RepoResult<Vec<ResourceDictionary>> {
        let unique: BTreeSet<&str> = names.iter().map(String::as_str).collect();
        let unique: Vec<&str> = unique.into_iter().collect();

        // Chunks follow the sorted name set, so appending keeps name order.
        let mut records = Vec::new();
        for chunk in unique.chunks(NAME_IN_CHUNK_SIZE) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!(
                "{DICTIONARY_SELECT_SQL}
                 WHERE name IN ({placeholders})
                 ORDER BY name ASC, id ASC;"
            );
            records.extend(self.query_list(&sql, params_from_iter(chunk.iter()))?);
        }
        Ok(records)
    }

    fn find_by_tags_containing_ignore_case(
        &self,
        tags: &str,
    ) -> RepoResult<Vec<ResourceDictionary>> {
        // SQLite lower() only folds ASCII, so matching happens here.
        let needle = tags.to_lowercase();
        let records = self.query_list(
            &format!(
                "{DICTIONARY_SELECT_SQL}
                 WHERE tags IS NOT NULL
                 ORDER BY name ASC, id ASC;"
            ),
            [],
        )?;

        Ok(records
            .into_iter()
            .filter(|record| {
                record
                    .tags
                    .as_deref()
                    .is_some_and(|value| value.to_lowercase().contains(&needle))
            })
            .collect())
    }

    fn save(&self, record: &ResourceDictionary) -> RepoResult<ResourceDictionary> {
        let id = match record.id {
            Some(id) => {
                self.update(id, record)?;
                id
            }
            None => self.insert(record)?,
        };

        self.get_by_id(id)?.ok_or(RepoError::NotFound(id))
    }

    fn delete_by_name(&self, name: &str) -> RepoResult<usize> {
        let deleted = self
            .conn
            .execute("DELETE FROM resource_dictionary WHERE name = ?1;", [name])?;
        Ok(deleted)
    }
}

fn parse_dictionary_row(row: &Row<'_>) -> RepoResult<ResourceDictionary> {
    let name: String = row.get("name")?;
    if name.trim().is_empty() {
        return Err(RepoError::InvalidData(
            "blank value in resource_dictionary.name".to_string(),
        ));
    }

    Ok(ResourceDictionary {
        id: Some(row.get("id")?),
        name,
        definition: row.get("definition")?,
        description: row.get("description")?,
        resource_type: row.get("resource_type")?,
        resource_path: row.get("resource_path")?,
        data_type: row.get("data_type")?,
        entry_schema: row.get("entry_schema")?,
        tags: row.get("tags")?,
        updated_by: row.get("updated_by")?,
        created_at: Some(row.get("created_at")?),
        updated_at: Some(row.get("updated_at")?),
    })
}
