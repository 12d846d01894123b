//! Shop user.

use chrono::{DateTime, Utc};
use serde::Serialize;

use threefold_core::{Email, UserId};

/// A registered shop customer. The password hash never leaves `crate::db`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    /// May create products and coupons.
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}
