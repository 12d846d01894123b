//! Likes and comments on posts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use threefold_core::{CommentId, LikeId, PostId, UserId};

/// At most one per (user, post).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Like {
    pub id: LikeId,
    pub user_id: UserId,
    pub post_id: PostId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: CommentId,
    pub user_id: UserId,
    pub post_id: PostId,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}
