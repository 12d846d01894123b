//! Cart line queries.

use sqlx::SqliteExecutor;

use threefold_core::{CartLineId, ProductId, UserId};

use super::RepositoryError;
use crate::models::CartLine;

/// Add `quantity` of a product to the user's cart, accumulating onto an
/// existing line.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the upsert fails.
pub async fn add<'e, E>(
    conn: E,
    user_id: UserId,
    product_id: ProductId,
    quantity: i64,
) -> Result<CartLine, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let line = sqlx::query_as::<_, CartLine>(
        "INSERT INTO cart_lines (user_id, product_id, quantity)
         VALUES (?, ?, ?)
         ON CONFLICT (user_id, product_id) DO UPDATE SET quantity = quantity + excluded.quantity
         RETURNING id, user_id, product_id, quantity",
    )
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .fetch_one(conn)
    .await?;

    Ok(line)
}

/// All cart lines of a user, in cart line id order.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn lines_for_user<'e, E>(conn: E, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let lines = sqlx::query_as::<_, CartLine>(
        "SELECT id, user_id, product_id, quantity FROM cart_lines WHERE user_id = ? ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(conn)
    .await?;

    Ok(lines)
}

/// Quantity of a product already in the user's cart, 0 if there is no line.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn quantity_of<'e, E>(
    conn: E,
    user_id: UserId,
    product_id: ProductId,
) -> Result<i64, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let quantity: Option<i64> = sqlx::query_scalar(
        "SELECT quantity FROM cart_lines WHERE user_id = ? AND product_id = ?",
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_optional(conn)
    .await?;

    Ok(quantity.unwrap_or(0))
}

/// Take SQLite's write lock before reading the cart.
///
/// A no-op `UPDATE` makes the surrounding transaction a writer from its
/// first statement, so concurrent checkouts queue on the busy timeout
/// instead of failing on a stale read snapshot.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the lock cannot be taken.
pub async fn lock_for_checkout<'e, E>(conn: E, user_id: UserId) -> Result<(), RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("UPDATE cart_lines SET quantity = quantity WHERE user_id = ?")
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Delete one line by id.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the line no longer exists.
pub async fn delete_line<'e, E>(conn: E, id: CartLineId) -> Result<(), RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM cart_lines WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

/// Remove the user's line for a product. Returns `false` if there was none.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the delete fails.
pub async fn remove_product<'e, E>(
    conn: E,
    user_id: UserId,
    product_id: ProductId,
) -> Result<bool, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM cart_lines WHERE user_id = ? AND product_id = ?")
        .bind(user_id)
        .bind(product_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
