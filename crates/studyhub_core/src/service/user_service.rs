//! User account use-case service.
//!
//! # Responsibility
//! - Provide account CRUD entry points.
//! - Invalidate the users page path after every mutation.

use crate::model::{User, UserId};
use crate::repo::{RepoResult, UserRepository};
use crate::service::revalidate::{CacheInvalidator, USERS_PATH};

/// Use-case service wrapper for user account operations.
pub struct UserService<R: UserRepository, C: CacheInvalidator> {
    repo: R,
    cache: C,
}

impl<R: UserRepository, C: CacheInvalidator> UserService<R, C> {
    pub fn new(repo: R, cache: C) -> Self {
        Self { repo, cache }
    }

    pub fn create_user(&self, user: &User) -> RepoResult<UserId> {
        let id = self.repo.create_user(user)?;
        self.cache.invalidate(USERS_PATH);
        Ok(id)
    }

    pub fn update_user_name(&self, id: UserId, name: &str) -> RepoResult<()> {
        self.repo.update_user_name(id, name)?;
        self.cache.invalidate(USERS_PATH);
        Ok(())
    }

    /// Tombstones the account; it stays referenced by memberships.
    pub fn soft_delete_user(&self, id: UserId) -> RepoResult<()> {
        self.repo.soft_delete_user(id)?;
        self.cache.invalidate(USERS_PATH);
        Ok(())
    }

    pub fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.repo.get_user(id)
    }

    pub fn get_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.repo.get_user_by_email(email)
    }

    pub fn list_users(&self) -> RepoResult<Vec<User>> {
        self.repo.list_users()
    }
}
