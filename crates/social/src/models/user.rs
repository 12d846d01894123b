//! Social user.

use chrono::{DateTime, Utc};
use serde::Serialize;

use threefold_core::{Email, UserId};

/// A registered member. The password hash never leaves `crate::db`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}
