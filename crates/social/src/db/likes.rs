//! Like queries.

use chrono::Utc;
use sqlx::SqliteExecutor;

use threefold_core::{PostId, UserId};

use super::RepositoryError;
use crate::models::Like;

/// Like a post.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the user already likes the post.
pub async fn create<'e, E>(conn: E, user_id: UserId, post_id: PostId) -> Result<Like, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Like>(
        "INSERT INTO likes (user_id, post_id, created_at) VALUES (?, ?, ?)
         RETURNING id, user_id, post_id, created_at",
    )
    .bind(user_id)
    .bind(post_id)
    .bind(Utc::now())
    .fetch_one(conn)
    .await
    .map_err(|e| RepositoryError::from_write(e, "post already liked"))
}

/// Remove a like. Returns `false` if there was none.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the delete fails.
pub async fn delete<'e, E>(conn: E, user_id: UserId, post_id: PostId) -> Result<bool, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM likes WHERE user_id = ? AND post_id = ?")
        .bind(user_id)
        .bind(post_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn for_post<'e, E>(conn: E, post_id: PostId) -> Result<Vec<Like>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let likes = sqlx::query_as::<_, Like>(
        "SELECT id, user_id, post_id, created_at FROM likes WHERE post_id = ? ORDER BY id",
    )
    .bind(post_id)
    .fetch_all(conn)
    .await?;

    Ok(likes)
}
