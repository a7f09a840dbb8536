use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

/// Router over a throwaway SQLite file, removed on drop.
pub struct TestApp {
    pub app: Router,
    #[allow(dead_code)]
    pub pool: jotter::db::SqlitePool,
    path: PathBuf,
}

impl TestApp {
    pub async fn spawn(label: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "jotter-{label}-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));

        let database_url = format!("sqlite:{}", path.display());
        let pool = jotter::db::connect(&database_url, 1)
            .await
            .expect("failed to open database");
        jotter::db::init_schema(&pool)
            .await
            .expect("failed to init schema");

        let state = jotter::router::JotterState::new(pool.clone());
        let app = jotter::router::jotter_router(state);
        Self { app, pool, path }
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        let resp = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
