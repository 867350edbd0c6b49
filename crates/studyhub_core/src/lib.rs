//! Core domain logic for StudyHub.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod timeline;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    MemberId, MemberProfile, Membership, Note, NoteId, Project, ProjectId, Task, TaskId, User,
    UserId, ValidationError,
};
pub use repo::{
    NoteRepository, ProjectRepository, RepoError, RepoResult, SqliteNoteRepository,
    SqliteProjectRepository, SqliteTaskRepository, SqliteUserRepository, TaskRepository,
    UserRepository,
};
pub use service::note_service::NoteService;
pub use service::planner_service::PlannerService;
pub use service::project_service::ProjectService;
pub use service::reminder::{ReminderError, ReminderSchedule};
pub use service::revalidate::{CacheInvalidator, NoopInvalidator};
pub use service::task_service::TaskService;
pub use service::user_service::UserService;
pub use timeline::{
    dedupe_events, month_grid, Event, EventKind, Placement, Timeline, DEFAULT_PAD_DAYS,
    MONTH_GRID_CELLS, VISIBLE_WINDOW_DAYS,
};

/// Cheap liveness probe for embedding smoke tests.
pub fn ping() -> &'static str {
    "pong"
}

/// Version of the core crate as compiled.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    #[test]
    fn health_probes_respond() {
        assert_eq!(super::ping(), "pong");
        assert!(!super::core_version().is_empty());
    }
}
