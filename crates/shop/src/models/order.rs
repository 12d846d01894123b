//! Orders.

use chrono::{DateTime, Utc};
use serde::Serialize;

use threefold_core::{OrderId, Price, ProductId, UserId};

/// Immutable purchase record for one cart line.
///
/// `total_price` is the product price times `quantity` at the moment of
/// placement; later price changes do not touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub total_price: Price,
    pub created_at: DateTime<Utc>,
}
