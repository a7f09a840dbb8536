use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;

use crate::db::models::{NewTag, NewTodo, Todo, TodoPatch, TodoTag};
use crate::handlers::{JsonBody, PathParam};
use crate::service::todos::TaggedTodo;
use crate::{JotterError, router::JotterState};

/// GET /api/todos
pub async fn list_todos(
    State(state): State<JotterState>,
) -> Result<Json<Vec<TaggedTodo>>, JotterError> {
    Ok(Json(state.todos.list().await?))
}

/// GET /api/todos/{id}
pub async fn get_todo(
    State(state): State<JotterState>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<Json<TaggedTodo>, JotterError> {
    state
        .todos
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or(JotterError::NotFound("Todo"))
}

/// GET /api/todos/search/{title}
pub async fn search_todos(
    State(state): State<JotterState>,
    WithRejection(Path(title), _): PathParam<String>,
) -> Result<Json<Vec<TaggedTodo>>, JotterError> {
    Ok(Json(state.todos.search_by_title(&title).await?))
}

/// GET /api/todos/tag/{tag}
pub async fn todos_by_tag(
    State(state): State<JotterState>,
    WithRejection(Path(tag), _): PathParam<String>,
) -> Result<Json<Vec<TaggedTodo>>, JotterError> {
    Ok(Json(state.todos.list_by_tag(&tag).await?))
}

/// POST /api/todos
pub async fn create_todo(
    State(state): State<JotterState>,
    WithRejection(Json(body), _): JsonBody<NewTodo>,
) -> Result<(StatusCode, Json<Todo>), JotterError> {
    let todo = state.todos.create(body).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /api/todos/{id}: only the fields present in the body are changed.
pub async fn update_todo(
    State(state): State<JotterState>,
    WithRejection(Path(id), _): PathParam<i64>,
    WithRejection(Json(patch), _): JsonBody<TodoPatch>,
) -> Result<Json<Todo>, JotterError> {
    state
        .todos
        .update(id, patch)
        .await?
        .map(Json)
        .ok_or(JotterError::NotFound("Todo"))
}

/// DELETE /api/todos/{id}
pub async fn delete_todo(
    State(state): State<JotterState>,
    WithRejection(Path(id), _): PathParam<i64>,
) -> Result<impl IntoResponse, JotterError> {
    if state.todos.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JotterError::NotFound("Todo"))
    }
}

/// POST /api/todos/{id}/tags
pub async fn add_todo_tag(
    State(state): State<JotterState>,
    WithRejection(Path(id), _): PathParam<i64>,
    WithRejection(Json(body), _): JsonBody<NewTag>,
) -> Result<(StatusCode, Json<TodoTag>), JotterError> {
    let tag = state
        .todos
        .add_tag(id, body.tag)
        .await?
        .ok_or(JotterError::NotFound("Todo"))?;
    Ok((StatusCode::CREATED, Json(tag)))
}
