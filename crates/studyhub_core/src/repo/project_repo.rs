//! Project repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Own project CRUD and project membership.
//!
//! # Invariants
//! - Write paths call `Project::validate()` before SQL mutations.
//! - A project with remaining members cannot be deleted
//!   (`ReferentialIntegrity`).

use crate::model::{MemberId, MemberProfile, Membership, Project, ProjectId, UserId};
use crate::repo::task_repo::parse_member_row;
use crate::repo::{
    datetime_from_ms, ensure_connection_ready, epoch_ms, map_constraint, parse_uuid, RepoError,
    RepoResult,
};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

pub(crate) const PROJECT_COLUMNS_PREFIXED: &str = "p.id AS id,
    p.name AS name,
    p.description AS description,
    p.owner_id AS owner_id,
    p.start_date AS start_date,
    p.deadline AS deadline";

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    owner_id,
    start_date,
    deadline
FROM projects";

/// Repository interface for projects and project membership.
pub trait ProjectRepository {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    /// Projects owned by the user, ordered by start date.
    fn list_projects_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<Project>>;
    fn update_project(&self, project: &Project) -> RepoResult<()>;
    fn delete_project(&self, id: ProjectId) -> RepoResult<()>;
    fn list_members(&self, id: ProjectId) -> RepoResult<Vec<MemberProfile>>;
    fn add_member(&self, id: ProjectId, user_id: UserId, role: &str) -> RepoResult<Membership>;
    fn update_member_role(&self, member_id: MemberId, role: &str) -> RepoResult<()>;
    fn remove_member(&self, member_id: MemberId) -> RepoResult<()>;
    fn is_member(&self, id: ProjectId, user_id: UserId) -> RepoResult<bool>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["projects", "project_members"])?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId> {
        project.validate()?;

        self.conn
            .execute(
                "INSERT INTO projects (
                    id, name, description, owner_id, start_date, deadline
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    project.id.to_string(),
                    project.name.as_str(),
                    project.description.as_deref(),
                    project.owner_id.to_string(),
                    epoch_ms(project.start_date),
                    epoch_ms(project.deadline),
                ],
            )
            .map_err(|err| {
                map_constraint(
                    err,
                    "a project with this identifier already exists",
                    "the referenced owner does not exist",
                )
            })?;

        Ok(project.id)
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }

    fn list_projects_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL} WHERE owner_id = ?1 ORDER BY start_date ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([owner_id.to_string()])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn update_project(&self, project: &Project) -> RepoResult<()> {
        project.validate()?;

        let changed = self.conn.execute(
            "UPDATE projects
             SET name = ?2,
                 description = ?3,
                 start_date = ?4,
                 deadline = ?5,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                project.id.to_string(),
                project.name.as_str(),
                project.description.as_deref(),
                epoch_ms(project.start_date),
                epoch_ms(project.deadline),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "project",
                id: project.id,
            });
        }
        Ok(())
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE id = ?1;", [id.to_string()])
            .map_err(|err| {
                map_constraint(
                    err,
                    "project delete conflict",
                    "cannot delete a project with associated members or tasks",
                )
            })?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "project",
                id,
            });
        }
        Ok(())
    }

    fn list_members(&self, id: ProjectId) -> RepoResult<Vec<MemberProfile>> {
        let mut stmt = self.conn.prepare(
            "SELECT u.id AS id, u.name AS name, u.email AS email, pm.role AS role
             FROM project_members pm
             INNER JOIN users u ON u.id = pm.user_id
             WHERE pm.project_id = ?1
             ORDER BY u.name ASC, u.id ASC;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        let mut members = Vec::new();
        while let Some(row) = rows.next()? {
            members.push(parse_member_row(row)?);
        }
        Ok(members)
    }

    fn add_member(&self, id: ProjectId, user_id: UserId, role: &str) -> RepoResult<Membership> {
        let member_id = Uuid::new_v4();
        self.conn
            .execute(
                "INSERT INTO project_members (id, project_id, user_id, role)
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
                    "this user is already a member of the project",
                    "the referenced project or user does not exist",
                )
            })?;

        Ok(Membership {
            id: member_id,
            user_id,
            role: role.to_string(),
        })
    }

    fn update_member_role(&self, member_id: MemberId, role: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE project_members SET role = ?2 WHERE id = ?1;",
            params![member_id.to_string(), role],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "project member",
                id: member_id,
            });
        }
        Ok(())
    }

    fn remove_member(&self, member_id: MemberId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM project_members WHERE id = ?1;",
            [member_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "project member",
                id: member_id,
            });
        }
        Ok(())
    }

    fn is_member(&self, id: ProjectId, user_id: UserId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM project_members WHERE project_id = ?1 AND user_id = ?2
            );",
            params![id.to_string(), user_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

pub(crate) fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let id_text: String = row.get("id")?;
    let owner_text: String = row.get("owner_id")?;
    let start_ms: i64 = row.get("start_date")?;
    let deadline_ms: i64 = row.get("deadline")?;

    Ok(Project {
        id: parse_uuid(&id_text, "projects.id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        owner_id: parse_uuid(&owner_text, "projects.owner_id")?,
        start_date: datetime_from_ms(start_ms, "projects.start_date")?,
        deadline: datetime_from_ms(deadline_ms, "projects.deadline")?,
    })
}
