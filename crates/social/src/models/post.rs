//! Posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use threefold_core::{PostId, UserId};

/// A post. Only its author may edit or delete it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /posts` and `PUT /posts/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    pub content: String,
}
