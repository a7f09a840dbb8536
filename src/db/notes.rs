use crate::db::models::{NewNote, Note, NoteTag};
use crate::db::sqlite::{SqlitePool, json_ids};
use crate::error::JotterError;

#[derive(Clone)]
pub struct NoteStorage {
    pool: SqlitePool,
}

impl NoteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Note>, JotterError> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT id, user_id, title, content FROM notes WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }

    pub async fn list_for_user_by_tag(
        &self,
        user_id: i64,
        tag: &str,
    ) -> Result<Vec<Note>, JotterError> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT id, user_id, title, content FROM notes
             WHERE user_id = ?
               AND id IN (SELECT note_id FROM note_tags WHERE tag = ?)
             ORDER BY id",
        )
        .bind(user_id)
        .bind(tag)
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }

    pub async fn insert(&self, user_id: i64, new: NewNote) -> Result<Note, JotterError> {
        let note = sqlx::query_as::<_, Note>(
            "INSERT INTO notes (user_id, title, content) VALUES (?, ?, ?)
             RETURNING id, user_id, title, content",
        )
        .bind(user_id)
        .bind(new.title)
        .bind(new.content)
        .fetch_one(&self.pool)
        .await?;
        Ok(note)
    }

    /// Insert a tag row only if the note exists and belongs to `user_id`.
    pub async fn insert_tag(
        &self,
        user_id: i64,
        note_id: i64,
        tag: Option<String>,
    ) -> Result<Option<NoteTag>, JotterError> {
        let tag = sqlx::query_as::<_, NoteTag>(
            "INSERT INTO note_tags (note_id, tag)
             SELECT id, ? FROM notes WHERE id = ? AND user_id = ?
             RETURNING id, note_id, tag",
        )
        .bind(tag)
        .bind(note_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tag)
    }

    pub async fn tags_for(&self, note_ids: &[i64]) -> Result<Vec<NoteTag>, JotterError> {
        let tags = sqlx::query_as::<_, NoteTag>(
            "SELECT id, note_id, tag FROM note_tags
             WHERE note_id IN (SELECT value FROM json_each(?))
             ORDER BY id",
        )
        .bind(json_ids(note_ids)?)
        .fetch_all(&self.pool)
        .await?;
        Ok(tags)
    }
}
