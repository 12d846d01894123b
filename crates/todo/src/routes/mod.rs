//! HTTP route handlers for the to-do API.
//!
//! ```text
//! POST   /todos/        - Create
//! GET    /todos/        - List
//! GET    /todos/{id}/   - Show
//! PUT    /todos/{id}/   - Partial update
//! DELETE /todos/{id}/   - Delete, returning the item
//! ```
//!
//! Routes are registered without trailing slashes; `crate::app` trims them
//! before routing, so both spellings work.

pub mod todos;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(todos::index).post(todos::create))
        .route(
            "/todos/{id}",
            get(todos::show).put(todos::update).delete(todos::destroy),
        )
}
