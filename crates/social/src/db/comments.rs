//! Comment queries.

use chrono::Utc;
use sqlx::SqliteExecutor;

use threefold_core::{CommentId, PostId, UserId};

use super::RepositoryError;
use crate::models::Comment;

const COMMENT_COLUMNS: &str = "id, user_id, post_id, comment, created_at";

/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn create<'e, E>(
    conn: E,
    user_id: UserId,
    post_id: PostId,
    comment: &str,
) -> Result<Comment, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let comment = sqlx::query_as::<_, Comment>(&format!(
        "INSERT INTO comments (user_id, post_id, comment, created_at) VALUES (?, ?, ?, ?)
         RETURNING {COMMENT_COLUMNS}"
    ))
    .bind(user_id)
    .bind(post_id)
    .bind(comment)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(comment)
}

/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get<'e, E>(conn: E, id: CommentId) -> Result<Option<Comment>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let comment = sqlx::query_as::<_, Comment>(&format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(comment)
}

/// Comments on a post, oldest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn for_post<'e, E>(conn: E, post_id: PostId) -> Result<Vec<Comment>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let comments = sqlx::query_as::<_, Comment>(&format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = ? ORDER BY id"
    ))
    .bind(post_id)
    .fetch_all(conn)
    .await?;

    Ok(comments)
}

/// # Errors
///
/// Returns `RepositoryError::NotFound` if the comment does not exist.
pub async fn update_text<'e, E>(
    conn: E,
    id: CommentId,
    comment: &str,
) -> Result<Comment, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Comment>(&format!(
        "UPDATE comments SET comment = ? WHERE id = ? RETURNING {COMMENT_COLUMNS}"
    ))
    .bind(comment)
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or(RepositoryError::NotFound)
}

/// # Errors
///
/// Returns `RepositoryError::NotFound` if the comment does not exist.
pub async fn delete<'e, E>(conn: E, id: CommentId) -> Result<(), RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::db::testing;

    #[tokio::test]
    async fn test_comment_lifecycle() {
        let pool = testing::pool().await;
        let user = testing::user(&pool, "eli").await;
        let post = testing::post(&pool, user, "thoughts?").await;

        let comment = create(&pool, user, post.id, "nice").await.unwrap();
        let edited = update_text(&pool, comment.id, "very nice").await.unwrap();
        assert_eq!(edited.comment, "very nice");

        let listed = for_post(&pool, post.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, comment.id);

        delete(&pool, comment.id).await.unwrap();
        assert!(get(&pool, comment.id).await.unwrap().is_none());
    }
}
