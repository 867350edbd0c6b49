//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Own user account CRUD plus the cross-aggregate planner reads
//!   (tasks/projects visible to one user).
//!
//! # Invariants
//! - `list_users` excludes soft-deleted accounts.
//! - Planner reads are distinct by id and deterministically ordered by
//!   `start_date ASC, id ASC`.

use crate::model::{Project, Task, User, UserId};
use crate::repo::{
    datetime_from_ms, ensure_connection_ready, epoch_ms, map_constraint, parse_uuid, RepoError,
    RepoResult,
};
use crate::repo::{project_repo, task_repo};
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT id, name, email, deleted_at FROM users";

/// Repository interface for user accounts.
pub trait UserRepository {
    fn create_user(&self, user: &User) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    /// Lists active users, ordered by name.
    fn list_users(&self) -> RepoResult<Vec<User>>;
    fn update_user_name(&self, id: UserId, name: &str) -> RepoResult<()>;
    /// Tombstones a user; memberships and owned records stay referenced.
    fn soft_delete_user(&self, id: UserId) -> RepoResult<()>;
    /// Tasks the user owns or is assigned to, distinct by id.
    fn list_user_tasks(&self, id: UserId) -> RepoResult<Vec<Task>>;
    /// Projects the user owns or is a member of, distinct by id.
    fn list_user_projects(&self, id: UserId) -> RepoResult<Vec<Project>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["users", "tasks", "projects"])?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &User) -> RepoResult<UserId> {
        user.validate()?;

        self.conn
            .execute(
                "INSERT INTO users (id, name, email, deleted_at) VALUES (?1, ?2, ?3, ?4);",
                params![
                    user.id.to_string(),
                    user.name.as_str(),
                    user.email.as_str(),
                    user.deleted_at.map(epoch_ms),
                ],
            )
            .map_err(|err| {
                map_constraint(
                    err,
                    "a user with this email already exists",
                    "user references unknown records",
                )
            })?;

        Ok(user.id)
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let row = self
            .conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE id = ?1;"),
                [id.to_string()],
                map_user_columns,
            )
            .optional()?;

        row.map(parse_user_row).transpose()
    }

    fn get_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let row = self
            .conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE email = ?1 LIMIT 1;"),
                [email],
                map_user_columns,
            )
            .optional()?;

        row.map(parse_user_row).transpose()
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self.conn.prepare(&format!(
            "{USER_SELECT_SQL} WHERE deleted_at IS NULL ORDER BY name ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(map_user_columns(row)?)?);
        }
        Ok(users)
    }

    fn update_user_name(&self, id: UserId, name: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE users
             SET name = ?2, updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![id.to_string(), name],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "user", id });
        }
        Ok(())
    }

    fn soft_delete_user(&self, id: UserId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE users
             SET deleted_at = (strftime('%s', 'now') * 1000),
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "user", id });
        }
        Ok(())
    }

    fn list_user_tasks(&self, id: UserId) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT DISTINCT {}
             FROM tasks t
             LEFT JOIN task_members tm ON tm.task_id = t.id
             WHERE t.user_id = ?1 OR tm.user_id = ?1
             ORDER BY t.start_date ASC, t.id ASC;",
            task_repo::TASK_COLUMNS_PREFIXED
        ))?;
        let mut rows = stmt.query([id.to_string()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(task_repo::parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn list_user_projects(&self, id: UserId) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT DISTINCT {}
             FROM projects p
             LEFT JOIN project_members pm ON pm.project_id = p.id
             WHERE p.owner_id = ?1 OR pm.user_id = ?1
             ORDER BY p.start_date ASC, p.id ASC;",
            project_repo::PROJECT_COLUMNS_PREFIXED
        ))?;
        let mut rows = stmt.query([id.to_string()])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(project_repo::parse_project_row(row)?);
        }
        Ok(projects)
    }
}

struct UserColumns {
    id: String,
    name: String,
    email: String,
    deleted_at: Option<i64>,
}

fn map_user_columns(row: &Row<'_>) -> rusqlite::Result<UserColumns> {
    Ok(UserColumns {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        deleted_at: row.get("deleted_at")?,
    })
}

fn parse_user_row(columns: UserColumns) -> RepoResult<User> {
    Ok(User {
        id: parse_uuid(&columns.id, "users.id")?,
        name: columns.name,
        email: columns.email,
        deleted_at: columns
            .deleted_at
            .map(|ms| datetime_from_ms(ms, "users.deleted_at"))
            .transpose()?,
    })
}
