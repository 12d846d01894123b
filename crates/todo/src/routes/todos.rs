//! To-do handlers.

use axum::{Json, extract::State};

use threefold_core::TodoId;
use threefold_platform::http::{JsonBody, PathParam};

use crate::db::todos;
use crate::error::{AppError, Result};
use crate::models::{NewTodo, Todo, TodoUpdate};
use crate::state::AppState;

fn require_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("Title cannot be empty".into()));
    }
    Ok(title.to_string())
}

#[tracing::instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(todo): JsonBody<NewTodo>,
) -> Result<Json<Todo>> {
    let todo = NewTodo {
        title: require_title(&todo.title)?,
        ..todo
    };
    Ok(Json(todos::create(state.pool(), &todo).await?))
}

pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Todo>>> {
    Ok(Json(todos::list(state.pool()).await?))
}

pub async fn show(
    State(state): State<AppState>,
    PathParam(id): PathParam<TodoId>,
) -> Result<Json<Todo>> {
    todos::get(state.pool(), id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[tracing::instrument(skip(state, changes))]
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<TodoId>,
    JsonBody(changes): JsonBody<TodoUpdate>,
) -> Result<Json<Todo>> {
    let changes = TodoUpdate {
        title: changes.title.as_deref().map(require_title).transpose()?,
        ..changes
    };
    Ok(Json(todos::update(state.pool(), id, changes).await?))
}

#[tracing::instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    PathParam(id): PathParam<TodoId>,
) -> Result<Json<Todo>> {
    Ok(Json(todos::delete(state.pool(), id).await?))
}
