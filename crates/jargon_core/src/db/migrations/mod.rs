//! Schema migration registry for the term store.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations in one transaction.
//! - Check that the resulting `terms` table carries every declared column.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - Migration 1 uses `CREATE TABLE IF NOT EXISTS`, so a pre-existing
//!   unversioned `terms` table is adopted instead of replaced.

use crate::db::{DbError, DbResult};
use crate::model::schema::{TermColumn, TERMS_TABLE};
use rusqlite::Connection;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version < latest {
        let tx = conn.transaction()?;
        for migration in MIGRATIONS {
            if migration.version <= current_version {
                continue;
            }

            tx.execute_batch(migration.sql)?;
            tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
        }
        tx.commit()?;
    }

    verify_terms_table(conn)
}

/// Fails when the `terms` table lacks any column declared in `TermColumn`.
pub fn verify_terms_table(conn: &Connection) -> DbResult<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({TERMS_TABLE});"))?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<HashSet<_>, _>>()?;

    let missing_columns: Vec<String> = TermColumn::ALL
        .iter()
        .map(|column| column.name())
        .filter(|name| !present.contains(*name))
        .map(str::to_string)
        .collect();

    if missing_columns.is_empty() {
        Ok(())
    } else {
        Err(DbError::SchemaMismatch { missing_columns })
    }
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
