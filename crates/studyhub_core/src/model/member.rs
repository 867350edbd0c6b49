//! Membership records linking users to projects and tasks.

use super::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a membership row.
pub type MemberId = Uuid;

/// A user's membership in one project or task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: MemberId,
    pub user_id: UserId,
    /// Free-form role label, e.g. `admin` or `member`.
    pub role: String,
}

/// Read model joining a membership with the user's profile.
///
/// This is the shape the dashboard member lists render directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
}
