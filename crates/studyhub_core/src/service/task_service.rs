//! Task use-case service.
//!
//! # Responsibility
//! - Provide task CRUD and membership entry points.
//! - Enroll the creator as an `admin` member on task creation.
//! - Invalidate the tasks dashboard path after every mutation.

use crate::model::{MemberId, MemberProfile, Membership, Task, TaskId, UserId};
use crate::repo::{RepoResult, TaskRepository};
use crate::service::revalidate::{CacheInvalidator, TASKS_PATH};
use chrono::{DateTime, Utc};

/// Role granted to the task creator.
pub const CREATOR_ROLE: &str = "admin";

/// Use-case service wrapper for task operations.
pub struct TaskService<R: TaskRepository, C: CacheInvalidator> {
    repo: R,
    cache: C,
}

impl<R: TaskRepository, C: CacheInvalidator> TaskService<R, C> {
    pub fn new(repo: R, cache: C) -> Self {
        Self { repo, cache }
    }

    /// Creates a task and enrolls its creator as an admin member.
    pub fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        let id = self.repo.create_task(task)?;
        self.repo.add_member(id, task.user_id, CREATOR_ROLE)?;
        self.cache.invalidate(TASKS_PATH);
        Ok(id)
    }

    pub fn update_task(&self, task: &Task) -> RepoResult<()> {
        self.repo.update_task(task)?;
        self.cache.invalidate(TASKS_PATH);
        Ok(())
    }

    pub fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        self.repo.delete_task(id)?;
        self.cache.invalidate(TASKS_PATH);
        Ok(())
    }

    pub fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.repo.get_task(id)
    }

    pub fn list_tasks_by_owner(&self, user_id: UserId) -> RepoResult<Vec<Task>> {
        self.repo.list_tasks_by_owner(user_id)
    }

    /// Tasks due within the next `days` days, soonest first.
    pub fn list_upcoming(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
        days: u32,
    ) -> RepoResult<Vec<Task>> {
        self.repo.list_upcoming(user_id, now, days)
    }

    pub fn list_members(&self, id: TaskId) -> RepoResult<Vec<MemberProfile>> {
        self.repo.list_members(id)
    }

    pub fn add_member(&self, id: TaskId, user_id: UserId, role: &str) -> RepoResult<Membership> {
        let membership = self.repo.add_member(id, user_id, role)?;
        self.cache.invalidate(TASKS_PATH);
        Ok(membership)
    }

    pub fn remove_member(&self, member_id: MemberId) -> RepoResult<()> {
        self.repo.remove_member(member_id)?;
        self.cache.invalidate(TASKS_PATH);
        Ok(())
    }

    pub fn is_member(&self, id: TaskId, user_id: UserId) -> RepoResult<bool> {
        self.repo.is_member(id, user_id)
    }
}
