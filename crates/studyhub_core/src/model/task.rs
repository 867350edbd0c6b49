//! Task record.
//!
//! # Invariants
//! - `deadline >= start_date` on every persisted task.
//! - `is_project_task` is true iff `project_id` is set; standalone tasks
//!   carry neither.

use super::project::ProjectId;
use super::user::UserId;
use super::{require_non_empty, require_ordered_range, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// An actionable task, optionally attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    pub user_id: UserId,
    pub project_id: Option<ProjectId>,
    pub is_project_task: bool,
}

impl Task {
    /// Creates a standalone task with a generated id.
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        start_date: DateTime<Utc>,
        deadline: DateTime<Utc>,
        user_id: UserId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description,
            start_date,
            deadline,
            user_id,
            project_id: None,
            is_project_task: false,
        }
    }

    /// Attaches this task to a project.
    pub fn for_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self.is_project_task = true;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty(&self.title, "task", "title")?;
        require_ordered_range(self.start_date, self.deadline, "task")
    }
}
