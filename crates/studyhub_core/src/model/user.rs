//! User account record.
//!
//! # Invariants
//! - `email` is unique across active and soft-deleted users.
//! - Deletion is represented by the `deleted_at` tombstone, never a hard
//!   delete, so memberships keep valid references.

use super::{require_non_empty, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a user account.
pub type UserId = Uuid;

/// A user account synced from the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Tombstone instant; `Some` means the account is soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates an active user with a generated id.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            deleted_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty(&self.name, "user", "name")?;
        require_non_empty(&self.email, "user", "email")
    }
}
