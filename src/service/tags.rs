//! Joins child tag rows onto their parent records with a single batched query.

use crate::db::models::{Note, NoteTag, Todo, TodoTag};
use crate::db::{NoteStorage, TodoStorage};
use crate::error::JotterError;
use serde::Serialize;
use std::future::Future;
use tracing::debug;

/// A parent record addressable by integer id.
pub trait Record {
    fn id(&self) -> i64;
}

/// A child tag row pointing at its parent.
pub trait TagRow {
    fn parent_id(&self) -> i64;
}

/// Fetches every tag row belonging to any of the given parent ids.
pub trait TagSource: Sync {
    type Tag: TagRow + Send;

    fn tags_for(
        &self,
        parent_ids: &[i64],
    ) -> impl Future<Output = Result<Vec<Self::Tag>, JotterError>> + Send;
}

/// A parent record with its tags attached; serializes flat with a `tags` array.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Tagged<P, T> {
    #[serde(flatten)]
    pub record: P,
    pub tags: Vec<T>,
}

/// Attach tags to `parents`, preserving parent order.
///
/// Issues no query for an empty list and exactly one otherwise. Tags whose
/// parent is not in `parents` are dropped.
pub async fn attach_tags<S, P>(
    source: &S,
    parents: Vec<P>,
) -> Result<Vec<Tagged<P, S::Tag>>, JotterError>
where
    S: TagSource,
    P: Record,
    S::Tag: Clone,
{
    if parents.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = parents.iter().map(Record::id).collect();
    let tags = source.tags_for(&ids).await?;
    debug!(parents = parents.len(), tags = tags.len(), "attaching tags");

    Ok(parents
        .into_iter()
        .map(|record| {
            let id = record.id();
            let tags = tags
                .iter()
                .filter(|t| t.parent_id() == id)
                .cloned()
                .collect();
            Tagged { record, tags }
        })
        .collect())
}

impl Record for Todo {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Note {
    fn id(&self) -> i64 {
        self.id
    }
}

impl TagRow for TodoTag {
    fn parent_id(&self) -> i64 {
        self.todo_id
    }
}

impl TagRow for NoteTag {
    fn parent_id(&self) -> i64 {
        self.note_id
    }
}

impl TagSource for TodoStorage {
    type Tag = TodoTag;

    async fn tags_for(&self, parent_ids: &[i64]) -> Result<Vec<TodoTag>, JotterError> {
        TodoStorage::tags_for(self, parent_ids).await
    }
}

impl TagSource for NoteStorage {
    type Tag = NoteTag;

    async fn tags_for(&self, parent_ids: &[i64]) -> Result<Vec<NoteTag>, JotterError> {
        NoteStorage::tags_for(self, parent_ids).await
    }
}
