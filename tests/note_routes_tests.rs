mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn notes_are_listed_per_user_with_tags() {
    let t = TestApp::spawn("notes").await;

    let (status, note) = t
        .send(
            "POST",
            "/api/notes/1",
            Some(json!({"title": "groceries", "content": "eggs"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(note["userId"], 1);
    let note_id = note["id"].as_i64().unwrap();

    t.send(
        "POST",
        "/api/notes/2",
        Some(json!({"title": "other", "content": "x"})),
    )
    .await;

    let (status, tag) = t
        .send(
            "POST",
            &format!("/api/users/1/notes/{note_id}/tags"),
            Some(json!({"tag": "home"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tag["noteId"], note_id);

    let (status, notes) = t.send("GET", "/api/notes/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let notes = notes.as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "groceries");
    assert_eq!(notes[0]["tags"][0]["tag"], "home");

    let (_, by_tag) = t.send("GET", "/api/notes/1/home", None).await;
    assert_eq!(by_tag.as_array().map(Vec::len), Some(1));

    let (_, by_tag) = t.send("GET", "/api/notes/2/home", None).await;
    assert_eq!(by_tag, json!([]));
}

#[tokio::test]
async fn tagging_a_foreign_note_is_404() {
    let t = TestApp::spawn("notes-foreign").await;

    let (_, note) = t
        .send(
            "POST",
            "/api/notes/1",
            Some(json!({"title": "mine", "content": "c"})),
        )
        .await;
    let note_id = note["id"].as_i64().unwrap();

    let (status, body) = t
        .send(
            "POST",
            &format!("/api/users/2/notes/{note_id}/tags"),
            Some(json!({"tag": "x"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Note not found.");
}

#[tokio::test]
async fn non_numeric_user_id_is_a_validation_failure() {
    let t = TestApp::spawn("notes-rejections").await;

    let (status, body) = t.send("GET", "/api/notes/someone", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");

    let (status, body) = t
        .send("POST", "/api/notes/1", Some(json!({"title": [], "content": "c"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
}
