use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;

use crate::db::models::{NewNote, NewTag, Note, NoteTag};
use crate::handlers::{JsonBody, PathParam};
use crate::service::notes::TaggedNote;
use crate::{JotterError, router::JotterState};

/// GET /api/notes/{user_id}
pub async fn list_user_notes(
    State(state): State<JotterState>,
    WithRejection(Path(user_id), _): PathParam<i64>,
) -> Result<Json<Vec<TaggedNote>>, JotterError> {
    Ok(Json(state.notes.list_for_user(user_id).await?))
}

/// GET /api/notes/{user_id}/{tag}
pub async fn list_user_notes_by_tag(
    State(state): State<JotterState>,
    WithRejection(Path((user_id, tag)), _): PathParam<(i64, String)>,
) -> Result<Json<Vec<TaggedNote>>, JotterError> {
    Ok(Json(state.notes.list_for_user_by_tag(user_id, &tag).await?))
}

/// POST /api/notes/{user_id}
pub async fn create_note(
    State(state): State<JotterState>,
    WithRejection(Path(user_id), _): PathParam<i64>,
    WithRejection(Json(body), _): JsonBody<NewNote>,
) -> Result<(StatusCode, Json<Note>), JotterError> {
    let note = state.notes.create(user_id, body).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// POST /api/users/{user_id}/notes/{note_id}/tags
pub async fn add_note_tag(
    State(state): State<JotterState>,
    WithRejection(Path((user_id, note_id)), _): PathParam<(i64, i64)>,
    WithRejection(Json(body), _): JsonBody<NewTag>,
) -> Result<(StatusCode, Json<NoteTag>), JotterError> {
    let tag = state
        .notes
        .add_tag(user_id, note_id, body.tag)
        .await?
        .ok_or(JotterError::NotFound("Note"))?;
    Ok((StatusCode::CREATED, Json(tag)))
}
