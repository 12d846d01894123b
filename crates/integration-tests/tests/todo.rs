//! To-do API: CRUD, partial updates and trailing-slash tolerance.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;
use threefold_integration_tests::todo_app;

#[tokio::test]
async fn test_crud_lifecycle() {
    let app = todo_app().await;

    let created = app
        .post(
            "/todos",
            None,
            Some(json!({"title": "Buy milk", "description": "two litres"})),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["title"], "Buy milk");
    assert_eq!(created.body["completed"], false);
    let id = created.body["id"].as_i64().unwrap();

    let listed = app.get("/todos", None).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);

    let updated = app
        .put(&format!("/todos/{id}"), None, json!({"completed": true}))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["completed"], true);
    assert_eq!(updated.body["title"], "Buy milk");
    assert_eq!(updated.body["description"], "two litres");

    let deleted = app.delete(&format!("/todos/{id}"), None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["id"], id);

    let gone = app.get(&format!("/todos/{id}"), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.detail(), "Item not found");
}

#[tokio::test]
async fn test_trailing_slashes_are_accepted() {
    let app = todo_app().await;

    let created = app
        .post("/todos/", None, Some(json!({"title": "Walk the dog"})))
        .await;
    assert_eq!(created.status, StatusCode::OK);
    let id = created.body["id"].as_i64().unwrap();

    assert_eq!(app.get("/todos/", None).await.status, StatusCode::OK);
    assert_eq!(
        app.get(&format!("/todos/{id}/"), None).await.status,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_description_can_be_cleared() {
    let app = todo_app().await;
    let created = app
        .post(
            "/todos",
            None,
            Some(json!({"title": "Read", "description": "chapter 3"})),
        )
        .await;
    let id = created.body["id"].as_i64().unwrap();

    let updated = app
        .put(&format!("/todos/{id}"), None, json!({"description": null}))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert!(updated.body["description"].is_null());
    assert_eq!(updated.body["title"], "Read");
}

#[tokio::test]
async fn test_missing_items_are_404() {
    let app = todo_app().await;

    let update = app.put("/todos/42", None, json!({"completed": true})).await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);
    assert_eq!(update.detail(), "Item not found");

    let delete = app.delete("/todos/42", None).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_title_rejected() {
    let app = todo_app().await;

    let created = app.post("/todos", None, Some(json!({"title": "   "}))).await;
    assert_eq!(created.status, StatusCode::BAD_REQUEST);
    assert_eq!(created.detail(), "Title cannot be empty");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = todo_app().await;
    assert_eq!(app.get("/health", None).await.status, StatusCode::OK);
}
