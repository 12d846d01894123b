//! Post queries.

use chrono::Utc;
use sqlx::SqliteExecutor;

use threefold_core::{PostId, UserId};

use super::RepositoryError;
use crate::models::Post;

/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn create<'e, E>(conn: E, author: UserId, content: &str) -> Result<Post, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let post = sqlx::query_as::<_, Post>(
        "INSERT INTO posts (user_id, content, created_at) VALUES (?, ?, ?)
         RETURNING id, user_id, content, created_at",
    )
    .bind(author)
    .bind(content)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(post)
}

/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get<'e, E>(conn: E, id: PostId) -> Result<Option<Post>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let post = sqlx::query_as::<_, Post>(
        "SELECT id, user_id, content, created_at FROM posts WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(post)
}

/// Posts by one author, oldest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn by_author<'e, E>(conn: E, author: UserId) -> Result<Vec<Post>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let posts = sqlx::query_as::<_, Post>(
        "SELECT id, user_id, content, created_at FROM posts WHERE user_id = ? ORDER BY id",
    )
    .bind(author)
    .fetch_all(conn)
    .await?;

    Ok(posts)
}

/// Replace a post's content.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the post does not exist.
pub async fn update_content<'e, E>(conn: E, id: PostId, content: &str) -> Result<Post, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Post>(
        "UPDATE posts SET content = ? WHERE id = ?
         RETURNING id, user_id, content, created_at",
    )
    .bind(content)
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or(RepositoryError::NotFound)
}

/// Delete a post; its likes and comments go with it.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the post does not exist.
pub async fn delete<'e, E>(conn: E, id: PostId) -> Result<(), RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
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
    use crate::db::{likes, testing};

    #[tokio::test]
    async fn test_update_and_list() {
        let pool = testing::pool().await;
        let author = testing::user(&pool, "bo").await;
        let post = create(&pool, author, "first").await.unwrap();
        create(&pool, author, "second").await.unwrap();

        let updated = update_content(&pool, post.id, "edited").await.unwrap();
        assert_eq!(updated.content, "edited");
        assert_eq!(updated.created_at, post.created_at);

        let listed = by_author(&pool, author).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].content, "edited");
    }

    #[tokio::test]
    async fn test_delete_cascades_to_likes() {
        let pool = testing::pool().await;
        let author = testing::user(&pool, "cy").await;
        let post = create(&pool, author, "bye").await.unwrap();
        likes::create(&pool, author, post.id).await.unwrap();

        delete(&pool, post.id).await.unwrap();
        assert!(get(&pool, post.id).await.unwrap().is_none());
        assert!(likes::for_post(&pool, post.id).await.unwrap().is_empty());
        assert!(matches!(
            delete(&pool, post.id).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
