//! SQLite migration registry and executor.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_resource_dictionary.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
///
/// All pending steps run inside one transaction; a failure leaves the
/// schema at its previous version and reports the failing step.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let pending: Vec<Migration> = MIGRATIONS
        .iter()
        .copied()
        .filter(|migration| migration.version > current_version)
        .collect();
    run_migrations(conn, current_version, &pending)
}

fn run_migrations(
    conn: &mut Connection,
    current_version: u32,
    pending: &[Migration],
) -> DbResult<()> {
    let latest = latest_version();
    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }
    let Some(target_version) = pending.last().map(|migration| migration.version) else {
        return Ok(());
    };

    let first_version = pending[0].version;
    let tx = conn.transaction().map_err(|source| DbError::Migration {
        version: first_version,
        source,
    })?;
    for migration in pending {
        tx.execute_batch(migration.sql)
            .and_then(|()| {
                tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))
            })
            .map_err(|source| DbError::Migration {
                version: migration.version,
                source,
            })?;
    }
    tx.commit().map_err(|source| DbError::Migration {
        version: target_version,
        source,
    })?;

    info!("event=db_migrate module=db status=ok from_version={current_version} to_version={target_version}");
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))
        .map_err(DbError::Query)
}

#[cfg(test)]
mod tests {
    use super::{current_user_version, run_migrations, Migration};
    use crate::db::DbError;
    use rusqlite::Connection;

    #[test]
    fn failing_migration_reports_version_and_rolls_back() {
        let mut conn = Connection::open_in_memory().unwrap();
        let pending = [
            Migration {
                version: 1,
                sql: "CREATE TABLE first_step (id INTEGER);",
            },
            Migration {
                version: 2,
                sql: "CREATE TABLE broken (",
            },
        ];

        let err = run_migrations(&mut conn, 0, &pending).unwrap_err();

        assert!(matches!(err, DbError::Migration { version: 2, .. }));
        assert_eq!(err.code(), "db_migration_failed");
        assert_eq!(current_user_version(&conn).unwrap(), 0);
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'first_step';",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 0);
    }

    #[test]
    fn nothing_pending_is_a_no_op() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn, 0, &[]).unwrap();
        assert_eq!(current_user_version(&conn).unwrap(), 0);
    }
}
