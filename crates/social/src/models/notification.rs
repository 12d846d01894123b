//! In-app notifications.

use chrono::{DateTime, Utc};
use serde::Serialize;

use threefold_core::{NotificationId, UserId};

/// A message for one user. Friendship changes create these; users may also
/// post their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
