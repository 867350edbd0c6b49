//! Domain model for StudyHub entities.
//!
//! # Responsibility
//! - Define the canonical records persisted by the repository layer.
//! - Provide write-path validation for scheduled entities.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID that is never reused.
//! - `deadline >= start_date` is enforced on write paths only; read-side
//!   projections exclude malformed ranges instead of failing.

use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod member;
pub mod note;
pub mod project;
pub mod task;
pub mod user;

pub use member::{MemberId, MemberProfile, Membership};
pub use note::{Note, NoteId};
pub use project::{Project, ProjectId};
pub use task::{Task, TaskId};
pub use user::{User, UserId};

/// Write-path validation failure for a domain record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace-only.
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },
    /// A scheduled range ends before it starts.
    DeadlineBeforeStart {
        entity: &'static str,
        start: DateTime<Utc>,
        deadline: DateTime<Utc>,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { entity, field } => {
                write!(f, "{entity}.{field} must not be empty")
            }
            Self::DeadlineBeforeStart {
                entity,
                start,
                deadline,
            } => write!(
                f,
                "{entity} deadline {deadline} is earlier than start {start}"
            ),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_non_empty(
    value: &str,
    entity: &'static str,
    field: &'static str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { entity, field });
    }
    Ok(())
}

pub(crate) fn require_ordered_range(
    start: DateTime<Utc>,
    deadline: DateTime<Utc>,
    entity: &'static str,
) -> Result<(), ValidationError> {
    if deadline < start {
        return Err(ValidationError::DeadlineBeforeStart {
            entity,
            start,
            deadline,
        });
    }
    Ok(())
}
