//! Note use-case service.

use crate::model::{Note, NoteId, UserId};
use crate::repo::{NoteRepository, RepoResult};
use crate::service::revalidate::{CacheInvalidator, NOTES_PATH};

/// Use-case service wrapper for note operations.
pub struct NoteService<R: NoteRepository, C: CacheInvalidator> {
    repo: R,
    cache: C,
}

impl<R: NoteRepository, C: CacheInvalidator> NoteService<R, C> {
    pub fn new(repo: R, cache: C) -> Self {
        Self { repo, cache }
    }

    pub fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        let id = self.repo.create_note(note)?;
        self.cache.invalidate(NOTES_PATH);
        Ok(id)
    }

    /// Full-replacement update of title and content.
    pub fn update_note(&self, note: &Note) -> RepoResult<()> {
        self.repo.update_note(note)?;
        self.cache.invalidate(NOTES_PATH);
        Ok(())
    }

    pub fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        self.repo.delete_note(id)?;
        self.cache.invalidate(NOTES_PATH);
        Ok(())
    }

    pub fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        self.repo.get_note(id)
    }

    pub fn list_notes_by_user(&self, user_id: UserId) -> RepoResult<Vec<Note>> {
        self.repo.list_notes_by_user(user_id)
    }
}
