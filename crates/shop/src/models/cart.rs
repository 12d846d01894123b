//! Cart lines.

use serde::Serialize;

use threefold_core::{CartLineId, ProductId, UserId};

/// One product in a user's cart. There is at most one line per
/// (user, product); adding again increases `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CartLine {
    pub id: CartLineId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i64,
}
