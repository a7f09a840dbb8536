use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::{NoteStorage, SqlitePool, TodoStorage};
use crate::handlers::{self, notes, todos};
use crate::service::{NoteService, TodoService};

/// Shared handler state; every service holds a clone of the same pool.
#[derive(Clone)]
pub struct JotterState {
    pub todos: TodoService,
    pub notes: NoteService,
}

impl JotterState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            todos: TodoService::new(TodoStorage::new(pool.clone())),
            notes: NoteService::new(NoteStorage::new(pool)),
        }
    }
}

pub fn jotter_router(state: JotterState) -> Router {
    let api = Router::new()
        .route("/todos", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/todos/{id}",
            get(todos::get_todo)
                .put(todos::update_todo)
                .delete(todos::delete_todo),
        )
        .route("/todos/{id}/tags", post(todos::add_todo_tag))
        .route("/todos/search/{title}", get(todos::search_todos))
        .route("/todos/tag/{tag}", get(todos::todos_by_tag))
        .route(
            "/notes/{user_id}",
            get(notes::list_user_notes).post(notes::create_note),
        )
        .route("/notes/{user_id}/{tag}", get(notes::list_user_notes_by_tag))
        .route(
            "/users/{user_id}/notes/{note_id}/tags",
            post(notes::add_note_tag),
        );

    Router::new()
        .route("/", get(handlers::root_handler))
        .route("/hello", get(handlers::hello_handler))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
