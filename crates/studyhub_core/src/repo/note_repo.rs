//! Note repository contract and SQLite implementation.
//!
//! # Invariants
//! - Write paths call `Note::validate()` before SQL mutations.
//! - Notes are hard-deleted; nothing references them.

use crate::model::{Note, NoteId, UserId};
use crate::repo::{
    ensure_connection_ready, map_constraint, parse_uuid, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT id, title, content, user_id FROM notes";

/// Repository interface for notes.
pub trait NoteRepository {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId>;
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Notes owned by the user, most recently updated first.
    fn list_notes_by_user(&self, user_id: UserId) -> RepoResult<Vec<Note>>;
    /// Full replacement of title and content.
    fn update_note(&self, note: &Note) -> RepoResult<()>;
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["notes"])?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        note.validate()?;

        self.conn
            .execute(
                "INSERT INTO notes (id, title, content, user_id) VALUES (?1, ?2, ?3, ?4);",
                params![
                    note.id.to_string(),
                    note.title.as_str(),
                    note.content.as_deref(),
                    note.user_id.to_string(),
                ],
            )
            .map_err(|err| {
                map_constraint(
                    err,
                    "a note with this identifier already exists",
                    "the referenced user does not exist",
                )
            })?;

        Ok(note.id)
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }
        Ok(None)
    }

    fn list_notes_by_user(&self, user_id: UserId) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL} WHERE user_id = ?1 ORDER BY updated_at DESC, id ASC;"
        ))?;
        let mut rows = stmt.query([user_id.to_string()])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        note.validate()?;

        let changed = self.conn.execute(
            "UPDATE notes
             SET title = ?2,
                 content = ?3,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                note.id.to_string(),
                note.title.as_str(),
                note.content.as_deref(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "note",
                id: note.id,
            });
        }
        Ok(())
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "note", id });
        }
        Ok(())
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id_text: String = row.get("id")?;
    let user_text: String = row.get("user_id")?;
    Ok(Note {
        id: parse_uuid(&id_text, "notes.id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        user_id: parse_uuid(&user_text, "notes.user_id")?,
    })
}
