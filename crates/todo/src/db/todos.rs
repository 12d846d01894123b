//! To-do queries.

use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};

use threefold_core::TodoId;

use super::RepositoryError;
use crate::models::{NewTodo, Todo, TodoUpdate};

const TODO_COLUMNS: &str = "id, title, description, completed, created_at";

/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn create<'e, E>(conn: E, todo: &NewTodo) -> Result<Todo, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let todo = sqlx::query_as::<_, Todo>(&format!(
        "INSERT INTO todos (title, description, completed, created_at) VALUES (?, ?, 0, ?)
         RETURNING {TODO_COLUMNS}"
    ))
    .bind(&todo.title)
    .bind(&todo.description)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(todo)
}

/// All items, oldest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list<'e, E>(conn: E) -> Result<Vec<Todo>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let todos = sqlx::query_as::<_, Todo>(&format!("SELECT {TODO_COLUMNS} FROM todos ORDER BY id"))
        .fetch_all(conn)
        .await?;

    Ok(todos)
}

/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get<'e, E>(conn: E, id: TodoId) -> Result<Option<Todo>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let todo = sqlx::query_as::<_, Todo>(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(todo)
}

/// Apply a partial update.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the item does not exist.
pub async fn update(pool: &SqlitePool, id: TodoId, changes: TodoUpdate) -> Result<Todo, RepositoryError> {
    let mut tx = pool.begin().await?;

    // Writer from the first statement, so a concurrent update waits on the
    // busy timeout instead of failing on a stale read.
    sqlx::query("UPDATE todos SET completed = completed WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let mut todo = get(&mut *tx, id).await?.ok_or(RepositoryError::NotFound)?;
    changes.apply(&mut todo);

    let todo = sqlx::query_as::<_, Todo>(&format!(
        "UPDATE todos SET title = ?, description = ?, completed = ? WHERE id = ?
         RETURNING {TODO_COLUMNS}"
    ))
    .bind(&todo.title)
    .bind(&todo.description)
    .bind(todo.completed)
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(todo)
}

/// Delete an item and return it.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the item does not exist.
pub async fn delete<'e, E>(conn: E, id: TodoId) -> Result<Todo, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Todo>(&format!(
        "DELETE FROM todos WHERE id = ? RETURNING {TODO_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or(RepositoryError::NotFound)
}
