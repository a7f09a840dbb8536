use crate::db::models::{NewTodo, Todo, TodoPatch, TodoTag};
use crate::db::TodoStorage;
use crate::error::JotterError;
use crate::service::tags::{Tagged, attach_tags};
use tracing::{debug, info};

pub type TaggedTodo = Tagged<Todo, TodoTag>;

/// Todo operations over an injected storage handle.
#[derive(Clone)]
pub struct TodoService {
    storage: TodoStorage,
}

impl TodoService {
    pub fn new(storage: TodoStorage) -> Self {
        Self { storage }
    }

    pub async fn list(&self) -> Result<Vec<TaggedTodo>, JotterError> {
        let todos = self.storage.list().await?;
        attach_tags(&self.storage, todos).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<TaggedTodo>, JotterError> {
        let todo = self.storage.get_by_id(id).await?;
        let mut tagged = attach_tags(&self.storage, todo.into_iter().collect()).await?;
        Ok(tagged.pop())
    }

    pub async fn search_by_title(&self, query: &str) -> Result<Vec<TaggedTodo>, JotterError> {
        let todos = self.storage.search_by_title(query).await?;
        debug!(query, hits = todos.len(), "title search");
        attach_tags(&self.storage, todos).await
    }

    pub async fn list_by_tag(&self, tag: &str) -> Result<Vec<TaggedTodo>, JotterError> {
        let todos = self.storage.list_by_tag(tag).await?;
        attach_tags(&self.storage, todos).await
    }

    pub async fn create(&self, new: NewTodo) -> Result<Todo, JotterError> {
        let todo = self.storage.insert(new).await?;
        info!(id = todo.id, "todo created");
        Ok(todo)
    }

    pub async fn update(&self, id: i64, patch: TodoPatch) -> Result<Option<Todo>, JotterError> {
        let updated = self.storage.update(id, patch).await?;
        if updated.is_some() {
            info!(id, "todo updated");
        }
        Ok(updated)
    }

    /// True when a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, JotterError> {
        let removed = self.storage.delete(id).await? > 0;
        if removed {
            info!(id, "todo deleted");
        }
        Ok(removed)
    }

    pub async fn add_tag(
        &self,
        todo_id: i64,
        tag: Option<String>,
    ) -> Result<Option<TodoTag>, JotterError> {
        self.storage.insert_tag(todo_id, tag).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{SqlitePool, connect, init_schema};

    async fn pool() -> SqlitePool {
        let pool = connect("sqlite::memory:", 1).await.unwrap();
        init_schema(&pool).await.unwrap();
        pool
    }

    async fn service() -> TodoService {
        TodoService::new(TodoStorage::new(pool().await))
    }

    async fn create(svc: &TodoService, title: &str) -> Todo {
        svc.create(NewTodo {
            title: Some(title.to_string()),
            description: Some("d".to_string()),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let svc = service().await;
        let created = create(&svc, "Write report").await;
        let fetched = svc.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.record.title, "Write report");
        assert_eq!(fetched.record.description, "d");
        assert!(!fetched.record.completed);
        assert!(fetched.tags.is_empty());
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let svc = service().await;
        assert!(svc.get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleted_todo_is_invisible() {
        let svc = service().await;
        let todo = create(&svc, "gone").await;
        assert!(svc.delete(todo.id).await.unwrap());
        assert!(svc.get_by_id(todo.id).await.unwrap().is_none());
        assert!(!svc.delete(todo.id).await.unwrap());
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let svc = service().await;
        create(&svc, "Buy milk").await;
        create(&svc, "Buy bread").await;

        let both = svc.search_by_title("buy").await.unwrap();
        assert_eq!(both.len(), 2);

        let milk = svc.search_by_title("milk").await.unwrap();
        assert_eq!(milk.len(), 1);
        assert_eq!(milk[0].record.title, "Buy milk");

        assert_eq!(svc.search_by_title("").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn tags_are_attached_per_todo() {
        let svc = service().await;
        let first = create(&svc, "first").await;
        let second = create(&svc, "second").await;
        svc.add_tag(first.id, Some("a".into())).await.unwrap().unwrap();
        svc.add_tag(first.id, Some("b".into())).await.unwrap().unwrap();

        let all = svc.list().await.unwrap();
        let tags: Vec<Vec<&str>> = all
            .iter()
            .map(|t| t.tags.iter().map(|tag| tag.tag.as_str()).collect())
            .collect();
        assert_eq!(tags, vec![vec!["a", "b"], vec![]]);
        assert_eq!(all[1].record.id, second.id);
    }

    #[tokio::test]
    async fn list_by_tag_returns_all_tags_of_matching_todos() {
        let svc = service().await;
        let work = create(&svc, "work item").await;
        let home = create(&svc, "home item").await;
        svc.add_tag(work.id, Some("work".into())).await.unwrap();
        svc.add_tag(work.id, Some("urgent".into())).await.unwrap();
        svc.add_tag(home.id, Some("home".into())).await.unwrap();

        let hits = svc.list_by_tag("work").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record.id, work.id);
        assert_eq!(hits[0].tags.len(), 2);
        assert!(svc.list_by_tag("none").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn orphan_tags_never_surface() {
        let svc = service().await;
        let keep = create(&svc, "keep").await;
        let gone = create(&svc, "gone").await;
        svc.add_tag(gone.id, Some("x".into())).await.unwrap();
        svc.delete(gone.id).await.unwrap();

        let all = svc.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].record.id, keep.id);
        assert!(all[0].tags.is_empty());
    }

    #[tokio::test]
    async fn list_scales_past_sqlite_variable_limit() {
        let pool = pool().await;
        sqlx::query(
            "INSERT INTO todos (title, title_folded, description)
             WITH RECURSIVE seq(n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM seq WHERE n < 40000)
             SELECT 'bulk ' || n, 'bulk ' || n, 'd' FROM seq",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO todo_tags (todo_id, tag) VALUES (40000, 'tail')")
            .execute(&pool)
            .await
            .unwrap();

        let svc = TodoService::new(TodoStorage::new(pool));
        let all = svc.list().await.unwrap();
        assert_eq!(all.len(), 40_000);
        let last = all.last().unwrap();
        assert_eq!(last.record.id, 40_000);
        assert_eq!(last.tags[0].tag, "tail");
        assert!(all[0].tags.is_empty());
    }
}
