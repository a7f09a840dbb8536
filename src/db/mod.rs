//! Database module: row models, schema and storage for todos and notes.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and request payloads
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool construction, schema bootstrap and todo storage
//! - `notes.rs`: note storage

pub mod models;
pub mod notes;
pub mod schema;
pub mod sqlite;

pub use models::{NewNote, NewTag, NewTodo, Note, NoteTag, Todo, TodoPatch, TodoTag};
pub use notes::NoteStorage;
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, TodoStorage, connect, init_schema};
