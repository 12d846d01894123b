//! Notification queries.
//!
//! Mutations are scoped by owner: a row that exists but belongs to someone
//! else is reported the same as a missing one.

use chrono::Utc;
use sqlx::SqliteExecutor;

use threefold_core::{NotificationId, UserId};

use super::RepositoryError;
use crate::models::Notification;

/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn create<'e, E>(
    conn: E,
    user_id: UserId,
    message: &str,
) -> Result<Notification, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let notification = sqlx::query_as::<_, Notification>(
        "INSERT INTO notifications (user_id, message, is_read, created_at) VALUES (?, ?, 0, ?)
         RETURNING id, user_id, message, is_read, created_at",
    )
    .bind(user_id)
    .bind(message)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(notification)
}

/// Notifications of a user, newest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn for_user<'e, E>(conn: E, user_id: UserId) -> Result<Vec<Notification>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let notifications = sqlx::query_as::<_, Notification>(
        "SELECT id, user_id, message, is_read, created_at FROM notifications
         WHERE user_id = ? ORDER BY id DESC",
    )
    .bind(user_id)
    .fetch_all(conn)
    .await?;

    Ok(notifications)
}

/// Mark one of the owner's notifications read. Returns `false` if the owner
/// has no such notification.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn mark_read<'e, E>(
    conn: E,
    id: NotificationId,
    owner: UserId,
) -> Result<bool, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(owner)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete one of the owner's notifications. Returns `false` if the owner has
/// no such notification.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the delete fails.
pub async fn delete<'e, E>(
    conn: E,
    id: NotificationId,
    owner: UserId,
) -> Result<bool, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM notifications WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(owner)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::db::testing;

    #[tokio::test]
    async fn test_newest_first_and_owner_scoped() {
        let pool = testing::pool().await;
        let owner = testing::user(&pool, "fay").await;
        let stranger = testing::user(&pool, "gus").await;

        let first = create(&pool, owner, "one").await.unwrap();
        create(&pool, owner, "two").await.unwrap();

        let listed = for_user(&pool, owner).await.unwrap();
        assert_eq!(listed[0].message, "two");
        assert!(!listed[1].is_read);

        assert!(!mark_read(&pool, first.id, stranger).await.unwrap());
        assert!(mark_read(&pool, first.id, owner).await.unwrap());
        assert!(for_user(&pool, owner).await.unwrap()[1].is_read);

        assert!(!delete(&pool, first.id, stranger).await.unwrap());
        assert!(delete(&pool, first.id, owner).await.unwrap());
        assert_eq!(for_user(&pool, owner).await.unwrap().len(), 1);
    }
}
