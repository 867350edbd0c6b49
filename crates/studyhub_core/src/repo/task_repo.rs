//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Own task CRUD, deadline-window reads and task membership.
//!
//! # Invariants
//! - Write paths call `Task::validate()` before SQL mutations.
//! - `list_members` returns the parent project's members followed by the
//!   task's own members; a task outside any project returns only the
//!   latter.

use crate::model::{MemberId, MemberProfile, Membership, Task, TaskId, UserId};
use crate::repo::{
    datetime_from_ms, ensure_connection_ready, epoch_ms, map_constraint, parse_uuid, RepoError,
    RepoResult,
};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

pub(crate) const TASK_COLUMNS_PREFIXED: &str = "t.id AS id,
    t.title AS title,
    t.description AS description,
    t.start_date AS start_date,
    t.deadline AS deadline,
    t.user_id AS user_id,
    t.project_id AS project_id,
    t.is_project_task AS is_project_task";

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    start_date,
    deadline,
    user_id,
    project_id,
    is_project_task
FROM tasks";

/// Repository interface for tasks and task membership.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Tasks owned by the user, ordered by start date.
    fn list_tasks_by_owner(&self, user_id: UserId) -> RepoResult<Vec<Task>>;
    /// Tasks owned by the user whose deadline falls in `[now, now + days]`,
    /// ordered by deadline ascending.
    fn list_upcoming(&self, user_id: UserId, now: DateTime<Utc>, days: u32)
        -> RepoResult<Vec<Task>>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
    /// Everyone who can see this task: parent project members, then
    /// direct task members.
    fn list_members(&self, id: TaskId) -> RepoResult<Vec<MemberProfile>>;
    fn add_member(&self, id: TaskId, user_id: UserId, role: &str) -> RepoResult<Membership>;
    fn remove_member(&self, member_id: MemberId) -> RepoResult<()>;
    fn is_member(&self, id: TaskId, user_id: UserId) -> RepoResult<bool>;
}

/// SQLite-backed task repository.
#[derive(Debug)]
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["tasks", "task_members", "project_members"])?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn
            .execute(
                "INSERT INTO tasks (
                    id, title, description, start_date, deadline,
                    user_id, project_id, is_project_task
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
                params![
                    task.id.to_string(),
                    task.title.as_str(),
                    task.description.as_deref(),
                    epoch_ms(task.start_date),
                    epoch_ms(task.deadline),
                    task.user_id.to_string(),
                    task.project_id.map(|id| id.to_string()),
                    task.is_project_task as i64,
                ],
            )
            .map_err(|err| {
                map_constraint(
                    err,
                    "a task with this identifier already exists",
                    "the referenced user or project does not exist",
                )
            })?;

        Ok(task.id)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }

    fn list_tasks_by_owner(&self, user_id: UserId) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL} WHERE user_id = ?1 ORDER BY start_date ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([user_id.to_string()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn list_upcoming(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
        days: u32,
    ) -> RepoResult<Vec<Task>> {
        let window_end = now + Duration::days(i64::from(days));
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE user_id = ?1 AND deadline >= ?2 AND deadline <= ?3
             ORDER BY deadline ASC, id ASC;"
        ))?;
        let mut rows = stmt.query(params![
            user_id.to_string(),
            epoch_ms(now),
            epoch_ms(window_end)
        ])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE tasks
                 SET title = ?2,
                     description = ?3,
                     start_date = ?4,
                     deadline = ?5,
                     project_id = ?6,
                     is_project_task = ?7,
                     updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?1;",
                params![
                    task.id.to_string(),
                    task.title.as_str(),
                    task.description.as_deref(),
                    epoch_ms(task.start_date),
                    epoch_ms(task.deadline),
                    task.project_id.map(|id| id.to_string()),
                    task.is_project_task as i64,
                ],
            )
            .map_err(|err| {
                map_constraint(
                    err,
                    "a task with this identifier already exists",
                    "the referenced project does not exist",
                )
            })?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "task",
                id: task.id,
            });
        }
        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id.to_string()])
            .map_err(|err| {
                map_constraint(
                    err,
                    "task delete conflict",
                    "cannot delete a task that still has members",
                )
            })?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "task", id });
        }
        Ok(())
    }

    fn list_members(&self, id: TaskId) -> RepoResult<Vec<MemberProfile>> {
        let id_text = id.to_string();
        let mut members = Vec::new();

        let mut project_stmt = self.conn.prepare(
            "SELECT u.id AS id, u.name AS name, u.email AS email, pm.role AS role
             FROM project_members pm
             INNER JOIN users u ON u.id = pm.user_id
             WHERE pm.project_id = (SELECT project_id FROM tasks WHERE id = ?1)
             ORDER BY u.name ASC, u.id ASC;",
        )?;
        let mut rows = project_stmt.query([id_text.as_str()])?;
        while let Some(row) = rows.next()? {
            members.push(parse_member_row(row)?);
        }

        let mut task_stmt = self.conn.prepare(
            "SELECT u.id AS id, u.name AS name, u.email AS email, tm.role AS role
             FROM task_members tm
             INNER JOIN users u ON u.id = tm.user_id
             WHERE tm.task_id = ?1
             ORDER BY u.name ASC, u.id ASC;",
        )?;
        let mut rows = task_stmt.query([id_text.as_str()])?;
        while let Some(row) = rows.next()? {
            members.push(parse_member_row(row)?);
        }

        Ok(members)
    }

    fn add_member(&self, id: TaskId, user_id: UserId, role: &str) -> RepoResult<Membership> {
        let member_id = Uuid::new_v4();
        self.conn
            .execute(
                "INSERT INTO task_members (id, task_id, user_id, role)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    member_id.to_string(),
                    id.to_string(),
                    user_id.to_string(),
                    role
                ],
            )
            .map_err(|err| {
                map_constraint(
                    err,
                    "this user is already a member of the task",
                    "the referenced task or user does not exist",
                )
            })?;

        Ok(Membership {
            id: member_id,
            user_id,
            role: role.to_string(),
        })
    }

    fn remove_member(&self, member_id: MemberId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM task_members WHERE id = ?1;",
            [member_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "task member",
                id: member_id,
            });
        }
        Ok(())
    }

    fn is_member(&self, id: TaskId, user_id: UserId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM task_members WHERE task_id = ?1 AND user_id = ?2
            );",
            params![id.to_string(), user_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

pub(crate) fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id_text: String = row.get("id")?;
    let user_text: String = row.get("user_id")?;
    let project_text: Option<String> = row.get("project_id")?;
    let start_ms: i64 = row.get("start_date")?;
    let deadline_ms: i64 = row.get("deadline")?;
    let is_project_task: i64 = row.get("is_project_task")?;

    Ok(Task {
        id: parse_uuid(&id_text, "tasks.id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        start_date: datetime_from_ms(start_ms, "tasks.start_date")?,
        deadline: datetime_from_ms(deadline_ms, "tasks.deadline")?,
        user_id: parse_uuid(&user_text, "tasks.user_id")?,
        project_id: project_text
            .map(|value| parse_uuid(&value, "tasks.project_id"))
            .transpose()?,
        is_project_task: is_project_task != 0,
    })
}

pub(crate) fn parse_member_row(row: &Row<'_>) -> RepoResult<MemberProfile> {
    let id_text: String = row.get("id")?;
    Ok(MemberProfile {
        id: parse_uuid(&id_text, "users.id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        role: row.get("role")?,
    })
}
