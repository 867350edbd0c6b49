//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per aggregate.
//! - Translate low-level SQLite failures into the domain error taxonomy.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Reads surface absent records as `Ok(None)`/empty vec, never as errors.
//! - Unique-key and foreign-key violations become `Conflict` and
//!   `ReferentialIntegrity` with human-readable messages.

use crate::db::{migrations, DbError};
use crate::model::ValidationError;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod note_repo;
pub mod project_repo;
pub mod task_repo;
pub mod user_repo;

pub use note_repo::{NoteRepository, SqliteNoteRepository};
pub use project_repo::{ProjectRepository, SqliteProjectRepository};
pub use task_repo::{SqliteTaskRepository, TaskRepository};
pub use user_repo::{SqliteUserRepository, UserRepository};

pub type RepoResult<T> = Result<T, RepoError>;

/// Domain error taxonomy for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Record rejected before it reached SQL.
    Validation(ValidationError),
    /// Requested record absent on an update/delete path.
    NotFound { entity: &'static str, id: Uuid },
    /// Duplicate unique key on create.
    Conflict(String),
    /// Foreign key violation on create/update/delete.
    ReferentialIntegrity(String),
    /// Persisted state that no longer parses into a domain record.
    InvalidData(String),
    /// Transport-level database failure.
    Db(DbError),
    /// Connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Migrated connection is missing a table this repository requires.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Conflict(message) => write!(f, "{message}"),
            Self::ReferentialIntegrity(message) => write!(f, "{message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps constraint failures from a write statement into the taxonomy.
///
/// `conflict` and `referential` are the human-readable messages surfaced
/// upward for unique-key and foreign-key violations respectively.
pub(crate) fn map_constraint(err: rusqlite::Error, conflict: &str, referential: &str) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        match failure.extended_code {
            rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                return RepoError::Conflict(conflict.to_string());
            }
            rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                return RepoError::ReferentialIntegrity(referential.to_string());
            }
            _ => {}
        }
    }
    RepoError::Db(DbError::Sqlite(err))
}

/// Verifies that a connection is migrated and carries the given tables.
///
/// Repositories call this from `try_new` so a raw, unmigrated connection
/// fails fast instead of producing confusing SQL errors later.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    tables: &[&'static str],
) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = migrations::latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in tables.iter().copied() {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

pub(crate) fn epoch_ms(value: DateTime<Utc>) -> i64 {
    value.timestamp_millis()
}

pub(crate) fn datetime_from_ms(ms: i64, column: &str) -> RepoResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| RepoError::InvalidData(format!("timestamp `{ms}` out of range in {column}")))
}
