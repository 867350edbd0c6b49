use chrono::{DateTime, TimeZone, Utc};
use rusqlite::Connection;
use studyhub_core::db::open_db_in_memory;
use studyhub_core::{
    Project, ProjectRepository, RepoError, SqliteProjectRepository, SqliteTaskRepository,
    SqliteUserRepository, Task, TaskRepository, User, UserRepository,
};

fn instant(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn seed_user(conn: &Connection, name: &str, email: &str) -> User {
    let users = SqliteUserRepository::try_new(conn).unwrap();
    let user = User::new(name, email);
    users.create_user(&user).unwrap();
    user
}

fn sample_project(owner: &User) -> Project {
    Project::new(
        "thesis",
        Some("final year project".to_string()),
        owner.id,
        instant(2024, 3, 1),
        instant(2024, 6, 1),
    )
}

#[test]
fn create_then_get_roundtrips_the_project() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_user(&conn, "Ada", "ada@example.com");
    let projects = SqliteProjectRepository::try_new(&conn).unwrap();

    let project = sample_project(&owner);
    projects.create_project(&project).unwrap();
    assert_eq!(projects.get_project(project.id).unwrap().unwrap(), project);
}

#[test]
fn create_with_unknown_owner_is_a_referential_error() {
    let conn = open_db_in_memory().unwrap();
    let projects = SqliteProjectRepository::try_new(&conn).unwrap();

    let ghost = User::new("Ghost", "ghost@example.com");
    let err = projects.create_project(&sample_project(&ghost)).unwrap_err();
    assert!(matches!(err, RepoError::ReferentialIntegrity(_)), "{err}");
}

#[test]
fn inverted_schedule_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_user(&conn, "Ada", "ada@example.com");
    let projects = SqliteProjectRepository::try_new(&conn).unwrap();

    let mut project = sample_project(&owner);
    project.deadline = instant(2024, 2, 1);
    assert!(matches!(
        projects.create_project(&project).unwrap_err(),
        RepoError::Validation(_)
    ));
}

#[test]
fn update_replaces_mutable_columns() {
    let conn = open_db_in_memory().unwrap();
    let owner = seed_user(&conn, "Ada", "ada@example.com");
    let projects = SqliteProjectRepository::try_new(&conn).unwrap();

    let mut project = sample_project(&owner);
    projects.create_project(&project).unwrap();

    project.name = "thesis v2".to_string();
    project.description = None;
    project.deadline = instant(2024, 7, 1);
    projects.update_project(&project).unwrap();

    assert_eq!(projects.get_project(project.id).unwrap().unwrap(), project);
}

#[test]
fn delete_with_members_is_a_referential_error() {
    let conn = open_db_in_memory().unwrap();
    let ada = seed_user(&conn, "Ada", "ada@example.com");
    let ben = seed_user(&conn, "Ben", "ben@example.com");
    let projects = SqliteProjectRepository::try_new(&conn).unwrap();

    let project = sample_project(&ada);
    projects.create_project(&project).unwrap();
    let membership = projects.add_member(project.id, ben.id, "editor").unwrap();

    let err = projects.delete_project(project.id).unwrap_err();
    assert!(matches!(err, RepoError::ReferentialIntegrity(_)), "{err}");

    projects.remove_member(membership.id).unwrap();
    projects.delete_project(project.id).unwrap();
    assert!(projects.get_project(project.id).unwrap().is_none());
}

#[test]
fn delete_with_tasks_is_a_referential_error() {
    let conn = open_db_in_memory().unwrap();
    let ada = seed_user(&conn, "Ada", "ada@example.com");
    let projects = SqliteProjectRepository::try_new(&conn).unwrap();
    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();

    let project = sample_project(&ada);
    projects.create_project(&project).unwrap();
    let task = Task::new(
        "outline",
        None,
        instant(2024, 3, 2),
        instant(2024, 3, 9),
        ada.id,
    )
    .for_project(project.id);
    tasks.create_task(&task).unwrap();

    assert!(matches!(
        projects.delete_project(project.id).unwrap_err(),
        RepoError::ReferentialIntegrity(_)
    ));
}

#[test]
fn duplicate_project_membership_is_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let ada = seed_user(&conn, "Ada", "ada@example.com");
    let ben = seed_user(&conn, "Ben", "ben@example.com");
    let projects = SqliteProjectRepository::try_new(&conn).unwrap();

    let project = sample_project(&ada);
    projects.create_project(&project).unwrap();
    projects.add_member(project.id, ben.id, "editor").unwrap();
    let err = projects.add_member(project.id, ben.id, "viewer").unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)), "{err}");
}

#[test]
fn member_role_can_be_updated_in_place() {
    let conn = open_db_in_memory().unwrap();
    let ada = seed_user(&conn, "Ada", "ada@example.com");
    let ben = seed_user(&conn, "Ben", "ben@example.com");
    let projects = SqliteProjectRepository::try_new(&conn).unwrap();

    let project = sample_project(&ada);
    projects.create_project(&project).unwrap();
    let membership = projects.add_member(project.id, ben.id, "viewer").unwrap();
    assert_eq!(membership.role, "viewer");

    projects.update_member_role(membership.id, "editor").unwrap();
    let members = projects.list_members(project.id).unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].role, "editor");

    projects.remove_member(membership.id).unwrap();
    assert!(matches!(
        projects
            .update_member_role(membership.id, "viewer")
            .unwrap_err(),
        RepoError::NotFound { .. }
    ));
}

#[test]
fn list_members_is_ordered_by_name() {
    let conn = open_db_in_memory().unwrap();
    let ada = seed_user(&conn, "Ada", "ada@example.com");
    let zoe = seed_user(&conn, "Zoe", "zoe@example.com");
    let ben = seed_user(&conn, "Ben", "ben@example.com");
    let projects = SqliteProjectRepository::try_new(&conn).unwrap();

    let project = sample_project(&ada);
    projects.create_project(&project).unwrap();
    projects.add_member(project.id, zoe.id, "editor").unwrap();
    projects.add_member(project.id, ben.id, "viewer").unwrap();

    let members = projects.list_members(project.id).unwrap();
    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Ben", "Zoe"]);

    assert!(projects.is_member(project.id, ben.id).unwrap());
    assert!(!projects.is_member(project.id, ada.id).unwrap());
}

#[test]
fn list_users_excludes_soft_deleted_accounts() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();

    let ada = User::new("Ada", "ada@example.com");
    let ben = User::new("Ben", "ben@example.com");
    users.create_user(&ada).unwrap();
    users.create_user(&ben).unwrap();
    users.soft_delete_user(ben.id).unwrap();

    let listed = users.list_users().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, ada.id);

    // The tombstoned account is still fetchable directly.
    let tombstoned = users.get_user(ben.id).unwrap().unwrap();
    assert!(!tombstoned.is_active());
}

#[test]
fn duplicate_email_is_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();

    users.create_user(&User::new("Ada", "ada@example.com")).unwrap();
    let err = users
        .create_user(&User::new("Other Ada", "ada@example.com"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)), "{err}");
}

#[test]
fn get_user_by_email_finds_the_account() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();

    let ada = User::new("Ada", "ada@example.com");
    users.create_user(&ada).unwrap();

    let found = users.get_user_by_email("ada@example.com").unwrap().unwrap();
    assert_eq!(found.id, ada.id);
    assert!(users.get_user_by_email("nobody@example.com").unwrap().is_none());
}

#[test]
fn update_user_name_requires_an_existing_account() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();

    let ada = User::new("Ada", "ada@example.com");
    users.create_user(&ada).unwrap();
    users.update_user_name(ada.id, "Ada L.").unwrap();
    assert_eq!(users.get_user(ada.id).unwrap().unwrap().name, "Ada L.");

    let err = users
        .update_user_name(uuid::Uuid::new_v4(), "Nobody")
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "user", .. }));
}

#[test]
fn planner_reads_are_distinct_when_owner_is_also_member() {
    let conn = open_db_in_memory().unwrap();
    let ada = seed_user(&conn, "Ada", "ada@example.com");
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let projects = SqliteProjectRepository::try_new(&conn).unwrap();
    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();

    let project = sample_project(&ada);
    projects.create_project(&project).unwrap();
    projects.add_member(project.id, ada.id, "admin").unwrap();

    let task = Task::new(
        "outline",
        None,
        instant(2024, 3, 2),
        instant(2024, 3, 9),
        ada.id,
    )
    .for_project(project.id);
    tasks.create_task(&task).unwrap();
    tasks.add_member(task.id, ada.id, "admin").unwrap();

    let owned_projects = users.list_user_projects(ada.id).unwrap();
    assert_eq!(owned_projects.len(), 1);
    assert_eq!(owned_projects[0].id, project.id);

    let owned_tasks = users.list_user_tasks(ada.id).unwrap();
    assert_eq!(owned_tasks.len(), 1);
    assert_eq!(owned_tasks[0].id, task.id);
}

#[test]
fn planner_reads_include_membership_only_records() {
    let conn = open_db_in_memory().unwrap();
    let ada = seed_user(&conn, "Ada", "ada@example.com");
    let ben = seed_user(&conn, "Ben", "ben@example.com");
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let projects = SqliteProjectRepository::try_new(&conn).unwrap();
    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();

    let project = sample_project(&ada);
    projects.create_project(&project).unwrap();
    projects.add_member(project.id, ben.id, "editor").unwrap();

    let task = Task::new(
        "review draft",
        None,
        instant(2024, 3, 5),
        instant(2024, 3, 8),
        ada.id,
    );
    tasks.create_task(&task).unwrap();
    tasks.add_member(task.id, ben.id, "reviewer").unwrap();

    let ben_projects = users.list_user_projects(ben.id).unwrap();
    assert_eq!(ben_projects.len(), 1);
    assert_eq!(ben_projects[0].id, project.id);

    let ben_tasks = users.list_user_tasks(ben.id).unwrap();
    assert_eq!(ben_tasks.len(), 1);
    assert_eq!(ben_tasks[0].id, task.id);
}
