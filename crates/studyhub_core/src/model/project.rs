//! Project record.
//!
//! # Invariants
//! - `deadline >= start_date` on every persisted project.
//! - `owner_id` references an existing user; members are tracked in a
//!   separate membership table.

use super::user::UserId;
use super::{require_non_empty, require_ordered_range, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a project.
pub type ProjectId = Uuid;

/// A multi-member project with a scheduled range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: UserId,
    pub start_date: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
}

impl Project {
    /// Creates a project with a generated id.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        owner_id: UserId,
        start_date: DateTime<Utc>,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            owner_id,
            start_date,
            deadline,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty(&self.name, "project", "name")?;
        require_ordered_range(self.start_date, self.deadline, "project")
    }
}
