//! Notifications.
//!
//! Marking or deleting someone else's notification (or a missing one) is a
//! silent no-op, so ids of other users' notifications are not revealed.

use sqlx::SqlitePool;
use thiserror::Error;

use threefold_core::{NotificationId, UserId};

use crate::db::{self, RepositoryError};
use crate::models::Notification;

/// Errors from notification operations.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Send a notification to `user_id`.
///
/// # Errors
///
/// Returns `NotificationError::EmptyMessage` for a blank message.
pub async fn notify(
    pool: &SqlitePool,
    user_id: UserId,
    message: &str,
) -> Result<Notification, NotificationError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(NotificationError::EmptyMessage);
    }
    Ok(db::notifications::create(pool, user_id, message).await?)
}

/// # Errors
///
/// Returns `NotificationError::Repository` if the query fails.
pub async fn inbox(pool: &SqlitePool, user_id: UserId) -> Result<Vec<Notification>, NotificationError> {
    Ok(db::notifications::for_user(pool, user_id).await?)
}

/// # Errors
///
/// Returns `NotificationError::Repository` if the update fails.
pub async fn mark_read(
    pool: &SqlitePool,
    user_id: UserId,
    id: NotificationId,
) -> Result<(), NotificationError> {
    if !db::notifications::mark_read(pool, id, user_id).await? {
        tracing::debug!(notification_id = %id, "no owned notification to mark read");
    }
    Ok(())
}

/// # Errors
///
/// Returns `NotificationError::Repository` if the delete fails.
pub async fn dismiss(
    pool: &SqlitePool,
    user_id: UserId,
    id: NotificationId,
) -> Result<(), NotificationError> {
    if !db::notifications::delete(pool, id, user_id).await? {
        tracing::debug!(notification_id = %id, "no owned notification to delete");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::testing;

    #[tokio::test]
    async fn test_foreign_notifications_untouched() {
        let pool = testing::pool().await;
        let owner = testing::user(&pool, "uri").await;
        let other = testing::user(&pool, "val").await;
        let note = notify(&pool, owner, " Hello ").await.unwrap();
        assert_eq!(note.message, "Hello");

        mark_read(&pool, other, note.id).await.unwrap();
        dismiss(&pool, other, note.id).await.unwrap();

        let inbox = inbox(&pool, owner).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert!(!inbox.iter().any(|n| n.is_read));
    }

    #[tokio::test]
    async fn test_blank_message_rejected() {
        let pool = testing::pool().await;
        let owner = testing::user(&pool, "wyn").await;
        assert!(matches!(
            notify(&pool, owner, "  ").await,
            Err(NotificationError::EmptyMessage)
        ));
    }
}
