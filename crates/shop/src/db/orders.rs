//! Order queries. Orders are insert-only.

use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;

use threefold_core::{OrderId, Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::Order;

/// Insert an order snapshot.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert<'e, E>(
    conn: E,
    user_id: UserId,
    product_id: ProductId,
    quantity: i64,
    total_price: Price,
    placed_at: DateTime<Utc>,
) -> Result<Order, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (user_id, product_id, quantity, total_price, created_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING id, user_id, product_id, quantity, total_price, created_at",
    )
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .bind(total_price)
    .bind(placed_at)
    .fetch_one(conn)
    .await?;

    Ok(order)
}

/// Fetch one order.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get<'e, E>(conn: E, id: OrderId) -> Result<Option<Order>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, user_id, product_id, quantity, total_price, created_at
         FROM orders WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(order)
}

/// The user's orders, newest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn for_user<'e, E>(conn: E, user_id: UserId) -> Result<Vec<Order>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let orders = sqlx::query_as::<_, Order>(
        "SELECT id, user_id, product_id, quantity, total_price, created_at
         FROM orders WHERE user_id = ?
         ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(conn)
    .await?;

    Ok(orders)
}
