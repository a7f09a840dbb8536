use crate::db::models::{NewTodo, Todo, TodoPatch, TodoTag};
use crate::db::schema::SQLITE_INIT;
use crate::error::JotterError;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

const TODO_COLUMNS: &str = "id, title, description, completed, created_at";

/// Open a pool for `database_url`, creating the file if missing.
///
/// Foreign keys are left unenforced: tag rows may outlive their parent.
/// In-memory databases live and die with their connection, so they get a
/// single connection that the pool never retires.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, JotterError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(false);
    let pool_opts = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };
    let pool = pool_opts.connect_with(connect_opts).await?;
    Ok(pool)
}

/// Encode an id list as a JSON array, bound as one parameter and expanded
/// with `json_each` so the statement size does not grow with the list.
pub(crate) fn json_ids(ids: &[i64]) -> Result<String, JotterError> {
    let encoded = serde_json::to_string(ids).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
    Ok(encoded)
}

/// Initialize the schema by executing the bundled DDL.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), JotterError> {
    // sqlx::query runs one statement at a time
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}

#[derive(Clone)]
pub struct TodoStorage {
    pool: SqlitePool,
}

impl TodoStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn list(&self) -> Result<Vec<Todo>, JotterError> {
        let rows = sqlx::query(&format!("SELECT {TODO_COLUMNS} FROM todos ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Todo>, JotterError> {
        let row = sqlx::query(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Self::row_to_model).transpose()
    }

    /// Case-insensitive substring match on title. Both sides are lowercased
    /// with Unicode rules; `%`, `_` and `\` in `query` match literally.
    pub async fn search_by_title(&self, query: &str) -> Result<Vec<Todo>, JotterError> {
        let pattern = format!("%{}%", escape_like(&query.to_lowercase()));
        let rows = sqlx::query(&format!(
            r"SELECT {TODO_COLUMNS} FROM todos WHERE title_folded LIKE ? ESCAPE '\' ORDER BY id"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    /// Todos carrying at least one tag row equal to `tag`.
    pub async fn list_by_tag(&self, tag: &str) -> Result<Vec<Todo>, JotterError> {
        let rows = sqlx::query(&format!(
            "SELECT {TODO_COLUMNS} FROM todos
             WHERE id IN (SELECT todo_id FROM todo_tags WHERE tag = ?)
             ORDER BY id"
        ))
        .bind(tag)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    pub async fn insert(&self, new: NewTodo) -> Result<Todo, JotterError> {
        let title_folded = new.title.as_deref().map(str::to_lowercase);
        let row = sqlx::query(&format!(
            "INSERT INTO todos (title, title_folded, description) VALUES (?, ?, ?)
             RETURNING {TODO_COLUMNS}"
        ))
        .bind(new.title)
        .bind(title_folded)
        .bind(new.description)
        .fetch_one(&self.pool)
        .await?;
        Self::row_to_model(row)
    }

    /// Apply the fields present in `patch`. Returns `None` when no row matched.
    pub async fn update(&self, id: i64, patch: TodoPatch) -> Result<Option<Todo>, JotterError> {
        if patch.is_empty() {
            return self.get_by_id(id).await;
        }
        let completed = patch.completed.map(i64::from);
        let title_folded = patch.title.as_deref().map(str::to_lowercase);
        let row = sqlx::query(&format!(
            "UPDATE todos SET
                title = COALESCE(?, title),
                title_folded = COALESCE(?, title_folded),
                description = COALESCE(?, description),
                completed = COALESCE(?, completed)
             WHERE id = ?
             RETURNING {TODO_COLUMNS}"
        ))
        .bind(patch.title)
        .bind(title_folded)
        .bind(patch.description)
        .bind(completed)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_model).transpose()
    }

    /// Returns the number of rows removed. Tag rows are left in place.
    pub async fn delete(&self, id: i64) -> Result<u64, JotterError> {
        let res = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    /// Insert a tag row only if the parent todo exists.
    pub async fn insert_tag(
        &self,
        todo_id: i64,
        tag: Option<String>,
    ) -> Result<Option<TodoTag>, JotterError> {
        let tag = sqlx::query_as::<_, TodoTag>(
            "INSERT INTO todo_tags (todo_id, tag)
             SELECT id, ? FROM todos WHERE id = ?
             RETURNING id, todo_id, tag",
        )
        .bind(tag)
        .bind(todo_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tag)
    }

    /// All tag rows whose `todo_id` is in `todo_ids`, in one round trip.
    pub async fn tags_for(&self, todo_ids: &[i64]) -> Result<Vec<TodoTag>, JotterError> {
        let tags = sqlx::query_as::<_, TodoTag>(
            "SELECT id, todo_id, tag FROM todo_tags
             WHERE todo_id IN (SELECT value FROM json_each(?))
             ORDER BY id",
        )
        .bind(json_ids(todo_ids)?)
        .fetch_all(&self.pool)
        .await?;
        Ok(tags)
    }

    fn row_to_model(row: SqliteRow) -> Result<Todo, JotterError> {
        let id: i64 = row.try_get("id")?;
        let title: String = row.try_get("title")?;
        let description: String = row.try_get("description")?;
        let completed_i: i64 = row.try_get("completed")?;
        let created_at_str: String = row.try_get("created_at")?;

        let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
            .with_timezone(&Utc);

        Ok(Todo {
            id,
            title,
            description,
            completed: completed_i != 0,
            created_at,
        })
    }
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
