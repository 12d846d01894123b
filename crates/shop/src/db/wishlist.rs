//! Wishlist queries.

use chrono::Utc;
use sqlx::SqliteExecutor;

use threefold_core::{ProductId, UserId};

use super::RepositoryError;
use crate::models::WishlistItem;

/// Add a product to the wishlist. Adding the same product twice keeps the
/// existing entry.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn add<'e, E>(
    conn: E,
    user_id: UserId,
    product_id: ProductId,
) -> Result<(), RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO wishlist_items (user_id, product_id, created_at)
         VALUES (?, ?, ?)
         ON CONFLICT (user_id, product_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(product_id)
    .bind(Utc::now())
    .execute(conn)
    .await?;

    Ok(())
}

/// The user's wishlist, oldest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn for_user<'e, E>(conn: E, user_id: UserId) -> Result<Vec<WishlistItem>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let items = sqlx::query_as::<_, WishlistItem>(
        "SELECT id, user_id, product_id, created_at
         FROM wishlist_items WHERE user_id = ? ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(conn)
    .await?;

    Ok(items)
}
