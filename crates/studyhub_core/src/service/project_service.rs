//! Project use-case service.
//!
//! # Responsibility
//! - Provide project CRUD and membership entry points.
//! - Invalidate the projects dashboard path after every mutation.

use crate::model::{MemberId, MemberProfile, Membership, Project, ProjectId, UserId};
use crate::repo::{ProjectRepository, RepoResult};
use crate::service::revalidate::{CacheInvalidator, PROJECTS_PATH};

/// Use-case service wrapper for project operations.
pub struct ProjectService<R: ProjectRepository, C: CacheInvalidator> {
    repo: R,
    cache: C,
}

impl<R: ProjectRepository, C: CacheInvalidator> ProjectService<R, C> {
    pub fn new(repo: R, cache: C) -> Self {
        Self { repo, cache }
    }

    pub fn create_project(&self, project: &Project) -> RepoResult<ProjectId> {
        let id = self.repo.create_project(project)?;
        self.cache.invalidate(PROJECTS_PATH);
        Ok(id)
    }

    pub fn update_project(&self, project: &Project) -> RepoResult<()> {
        self.repo.update_project(project)?;
        self.cache.invalidate(PROJECTS_PATH);
        Ok(())
    }

    pub fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        self.repo.delete_project(id)?;
        self.cache.invalidate(PROJECTS_PATH);
        Ok(())
    }

    pub fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        self.repo.get_project(id)
    }

    pub fn list_projects_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<Project>> {
        self.repo.list_projects_by_owner(owner_id)
    }

    pub fn list_members(&self, id: ProjectId) -> RepoResult<Vec<MemberProfile>> {
        self.repo.list_members(id)
    }

    pub fn add_member(&self, id: ProjectId, user_id: UserId, role: &str) -> RepoResult<Membership> {
        let membership = self.repo.add_member(id, user_id, role)?;
        self.cache.invalidate(PROJECTS_PATH);
        Ok(membership)
    }

    pub fn update_member_role(&self, member_id: MemberId, role: &str) -> RepoResult<()> {
        self.repo.update_member_role(member_id, role)?;
        self.cache.invalidate(PROJECTS_PATH);
        Ok(())
    }

    pub fn remove_member(&self, member_id: MemberId) -> RepoResult<()> {
        self.repo.remove_member(member_id)?;
        self.cache.invalidate(PROJECTS_PATH);
        Ok(())
    }

    pub fn is_member(&self, id: ProjectId, user_id: UserId) -> RepoResult<bool> {
        self.repo.is_member(id, user_id)
    }
}
