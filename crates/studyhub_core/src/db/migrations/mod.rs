//! Schema migration registry and executor.
//!
//! # Invariants
//! - Registered versions are strictly increasing and never reused.
//! - All pending migrations apply inside one transaction; a partially
//!   migrated database is never observable.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "users_notes",
        sql: include_str!("0001_users_notes.sql"),
    },
    Migration {
        version: 2,
        name: "projects_tasks",
        sql: include_str!("0002_projects_tasks.sql"),
    },
    Migration {
        version: 3,
        name: "memberships",
        sql: include_str!("0003_memberships.sql"),
    },
];

/// Latest schema version this binary understands.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings the connection up to `latest_version`.
///
/// A database already at the latest version is a no-op; one ahead of it
/// is refused so an older binary never writes into a newer schema.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let installed = installed_version(conn)?;
    let supported = latest_version();

    if installed > supported {
        return Err(DbError::SchemaTooNew {
            found: installed,
            supported,
        });
    }

    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > installed)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in pending {
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
        info!(
            "event=db_migrate module=db status=ok version={} name={}",
            migration.version, migration.name
        );
    }
    tx.commit()?;

    Ok(())
}

fn installed_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}
