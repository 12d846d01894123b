//! Wishlist entries.

use chrono::{DateTime, Utc};
use serde::Serialize;

use threefold_core::{ProductId, UserId, WishlistItemId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct WishlistItem {
    pub id: WishlistItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub created_at: DateTime<Utc>,
}
