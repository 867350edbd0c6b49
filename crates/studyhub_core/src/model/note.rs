//! Study note record.

use super::user::UserId;
use super::{require_non_empty, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// A free-form note owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// Optional body; the title alone is a valid note.
    pub content: Option<String>,
    pub user_id: UserId,
}

impl Note {
    /// Creates a note with a generated id.
    pub fn new(title: impl Into<String>, content: Option<String>, user_id: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content,
            user_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty(&self.title, "note", "title")
    }
}
