use crate::db::models::{NewNote, Note, NoteTag};
use crate::db::NoteStorage;
use crate::error::JotterError;
use crate::service::tags::{Tagged, attach_tags};
use tracing::info;

pub type TaggedNote = Tagged<Note, NoteTag>;

#[derive(Clone)]
pub struct NoteService {
    storage: NoteStorage,
}

impl NoteService {
    pub fn new(storage: NoteStorage) -> Self {
        Self { storage }
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<TaggedNote>, JotterError> {
        let notes = self.storage.list_for_user(user_id).await?;
        attach_tags(&self.storage, notes).await
    }

    pub async fn list_for_user_by_tag(
        &self,
        user_id: i64,
        tag: &str,
    ) -> Result<Vec<TaggedNote>, JotterError> {
        let notes = self.storage.list_for_user_by_tag(user_id, tag).await?;
        attach_tags(&self.storage, notes).await
    }

    pub async fn create(&self, user_id: i64, new: NewNote) -> Result<Note, JotterError> {
        let note = self.storage.insert(user_id, new).await?;
        info!(id = note.id, user_id, "note created");
        Ok(note)
    }

    pub async fn add_tag(
        &self,
        user_id: i64,
        note_id: i64,
        tag: Option<String>,
    ) -> Result<Option<NoteTag>, JotterError> {
        self.storage.insert_tag(user_id, note_id, tag).await
    }
}
