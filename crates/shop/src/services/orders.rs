//! Order placement.
//!
//! Placing an order turns every line of the caller's cart into an `Order`,
//! takes the ordered quantity out of stock and empties the cart. The whole
//! operation is one transaction in two phases:
//!
//! 1. **Validate**: read every cart line and its product, check stock and
//!    compute totals. Nothing is written.
//! 2. **Apply**: for each line, conditionally decrement stock, insert the
//!    order and delete the cart line.
//!
//! Any error drops the transaction, so a failed request leaves stock, orders
//! and the cart exactly as they were for every line.

use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;

use threefold_core::{OrderId, Price, ProductId, UserId};

use crate::db::{self, RepositoryError};
use crate::models::{CartLine, Order, Product};

/// Errors from placing or reading orders.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The caller has no cart lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// A line asks for more than is in stock.
    #[error("Insufficient stock for {0}")]
    InsufficientStock(String),

    /// A cart line points at a product that no longer exists.
    #[error("Product {0} not found")]
    ProductNotFound(ProductId),

    /// `price * quantity` does not fit in an `i64`.
    #[error("Order total too large for {0}")]
    TotalOverflow(String),

    /// No order with this id.
    #[error("Order not found")]
    NotFound,

    /// The order belongs to another user.
    #[error("Permission denied")]
    Forbidden,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(err))
    }
}

/// A cart line that passed validation.
struct CheckedLine {
    line: CartLine,
    product: Product,
    total: Price,
}

/// Place an order for everything in the user's cart.
///
/// Returns one `Order` per consumed cart line, in cart line order.
///
/// # Errors
///
/// - `OrderError::EmptyCart` if the cart has no lines
/// - `OrderError::InsufficientStock` if any line exceeds the product's stock,
///   including when a concurrent checkout took the stock first
/// - `OrderError::ProductNotFound` if a line's product is gone
/// - `OrderError::Repository` for database failures
#[tracing::instrument(skip(pool))]
pub async fn place_order(pool: &SqlitePool, user_id: UserId) -> Result<Vec<Order>, OrderError> {
    let mut tx = pool.begin().await?;

    db::cart::lock_for_checkout(&mut *tx, user_id).await?;

    let lines = db::cart::lines_for_user(&mut *tx, user_id).await?;
    if lines.is_empty() {
        return Err(OrderError::EmptyCart);
    }

    // Validate phase.
    let mut checked = Vec::with_capacity(lines.len());
    for line in lines {
        let product = db::products::get(&mut *tx, line.product_id)
            .await?
            .ok_or(OrderError::ProductNotFound(line.product_id))?;

        if product.stock < line.quantity {
            tracing::info!(
                product_id = %product.id,
                stock = product.stock,
                requested = line.quantity,
                "insufficient stock"
            );
            return Err(OrderError::InsufficientStock(product.name));
        }

        let total = product
            .price
            .times(line.quantity)
            .map_err(|_| OrderError::TotalOverflow(product.name.clone()))?;

        checked.push(CheckedLine {
            line,
            product,
            total,
        });
    }

    // Apply phase.
    let placed_at = Utc::now();
    let mut orders = Vec::with_capacity(checked.len());
    for CheckedLine {
        line,
        product,
        total,
    } in checked
    {
        if !db::products::decrement_stock(&mut *tx, product.id, line.quantity).await? {
            return Err(OrderError::InsufficientStock(product.name));
        }

        let order = db::orders::insert(
            &mut *tx,
            user_id,
            product.id,
            line.quantity,
            total,
            placed_at,
        )
        .await?;
        db::cart::delete_line(&mut *tx, line.id).await?;

        orders.push(order);
    }

    tx.commit().await?;

    tracing::info!(orders = orders.len(), "order placed");
    Ok(orders)
}

/// Orders of a user, newest first.
///
/// # Errors
///
/// Returns `OrderError::Repository` if the query fails.
pub async fn list_orders(pool: &SqlitePool, user_id: UserId) -> Result<Vec<Order>, OrderError> {
    Ok(db::orders::for_user(pool, user_id).await?)
}

/// One order, visible only to the user who placed it.
///
/// # Errors
///
/// Returns `OrderError::NotFound` if the order does not exist and
/// `OrderError::Forbidden` if it belongs to someone else.
pub async fn get_order(
    pool: &SqlitePool,
    user_id: UserId,
    order_id: OrderId,
) -> Result<Order, OrderError> {
    let order = db::orders::get(pool, order_id)
        .await?
        .ok_or(OrderError::NotFound)?;

    if order.user_id != user_id {
        return Err(OrderError::Forbidden);
    }
    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::db::testing;

    async fn stock_of(pool: &SqlitePool, id: ProductId) -> i64 {
        db::products::get(pool, id).await.unwrap().unwrap().stock
    }

    async fn order_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let pool = testing::pool().await;
        let user = testing::user(&pool, "nina").await;

        assert!(matches!(
            place_order(&pool, user).await,
            Err(OrderError::EmptyCart)
        ));
        assert_eq!(order_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_exact_stock_succeeds() {
        let pool = testing::pool().await;
        let user = testing::user(&pool, "omar").await;
        let product = testing::product(&pool, "Desk", 15_000, 5).await;
        db::cart::add(&pool, user, product.id, 5).await.unwrap();

        let orders = place_order(&pool, user).await.unwrap();

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].quantity, 5);
        assert_eq!(orders[0].total_price.minor_units(), 75_000);
        assert_eq!(orders[0].user_id, user);
        assert_eq!(stock_of(&pool, product.id).await, 0);
        assert!(db::cart::lines_for_user(&pool, user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insufficient_stock_changes_nothing() {
        let pool = testing::pool().await;
        let user = testing::user(&pool, "pia").await;
        let chair = testing::product(&pool, "Chair", 4_000, 10).await;
        let shelf = testing::product(&pool, "Shelf", 7_000, 2).await;

        db::cart::add(&pool, user, chair.id, 1).await.unwrap();
        db::cart::add(&pool, user, shelf.id, 2).await.unwrap();
        // Stock drops below the carted quantity after add-to-cart.
        sqlx::query("UPDATE products SET stock = 1 WHERE id = ?")
            .bind(shelf.id)
            .execute(&pool)
            .await
            .unwrap();

        let err = place_order(&pool, user).await.unwrap_err();
        assert!(matches!(err, OrderError::InsufficientStock(ref name) if name == "Shelf"));
        assert_eq!(err.to_string(), "Insufficient stock for Shelf");

        assert_eq!(stock_of(&pool, chair.id).await, 10);
        assert_eq!(stock_of(&pool, shelf.id).await, 1);
        assert_eq!(order_count(&pool).await, 0);
        assert_eq!(db::cart::lines_for_user(&pool, user).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_multiple_lines_become_multiple_orders() {
        let pool = testing::pool().await;
        let user = testing::user(&pool, "quinn").await;
        let pen = testing::product(&pool, "Pen", 150, 100).await;
        let ink = testing::product(&pool, "Ink", 900, 10).await;
        db::cart::add(&pool, user, pen.id, 4).await.unwrap();
        db::cart::add(&pool, user, ink.id, 2).await.unwrap();

        let orders = place_order(&pool, user).await.unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].product_id, pen.id);
        assert_eq!(orders[0].total_price.minor_units(), 600);
        assert_eq!(orders[1].product_id, ink.id);
        assert_eq!(orders[1].total_price.minor_units(), 1_800);
        assert_eq!(stock_of(&pool, pen.id).await, 96);
        assert_eq!(stock_of(&pool, ink.id).await, 8);

        let listed = list_orders(&pool, user).await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn test_total_uses_price_at_placement() {
        let pool = testing::pool().await;
        let user = testing::user(&pool, "rae").await;
        let product = testing::product(&pool, "Clock", 2_000, 3).await;
        db::cart::add(&pool, user, product.id, 2).await.unwrap();

        let orders = place_order(&pool, user).await.unwrap();
        sqlx::query("UPDATE products SET price = 9999 WHERE id = ?")
            .bind(product.id)
            .execute(&pool)
            .await
            .unwrap();

        let stored = get_order(&pool, user, orders[0].id).await.unwrap();
        assert_eq!(stored.total_price.minor_units(), 4_000);
    }

    #[tokio::test]
    async fn test_total_overflow_changes_nothing() {
        let pool = testing::pool().await;
        let user = testing::user(&pool, "wyn").await;
        let product = testing::product(&pool, "Yacht", i64::MAX / 2 + 1, 2).await;
        db::cart::add(&pool, user, product.id, 2).await.unwrap();

        let err = place_order(&pool, user).await.unwrap_err();
        assert!(matches!(err, OrderError::TotalOverflow(ref name) if name == "Yacht"));
        assert_eq!(stock_of(&pool, product.id).await, 2);
        assert_eq!(order_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_get_order_ownership() {
        let pool = testing::pool().await;
        let owner = testing::user(&pool, "sam").await;
        let other = testing::user(&pool, "tess").await;
        let product = testing::product(&pool, "Bowl", 1_000, 3).await;
        db::cart::add(&pool, owner, product.id, 1).await.unwrap();
        let orders = place_order(&pool, owner).await.unwrap();

        assert!(matches!(
            get_order(&pool, other, orders[0].id).await,
            Err(OrderError::Forbidden)
        ));
        assert!(matches!(
            get_order(&pool, owner, OrderId::new(9_999)).await,
            Err(OrderError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_concurrent_checkouts_never_oversell() {
        let path = std::env::temp_dir().join(format!("threefold-shop-{}.db", uuid::Uuid::new_v4()));
        let url = secrecy::SecretString::from(format!("sqlite://{}", path.display()));
        let pool = db::create_pool(&url).await.unwrap();
        db::MIGRATOR.run(&pool).await.unwrap();

        let first = testing::user(&pool, "uma").await;
        let second = testing::user(&pool, "vic").await;
        let product = testing::product(&pool, "Lantern", 3_000, 5).await;
        db::cart::add(&pool, first, product.id, 3).await.unwrap();
        db::cart::add(&pool, second, product.id, 3).await.unwrap();

        let (a, b) = tokio::join!(place_order(&pool, first), place_order(&pool, second));

        let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
        assert_eq!(successes, 1);
        let failure = if a.is_err() { a } else { b };
        assert!(matches!(failure, Err(OrderError::InsufficientStock(_))));
        assert_eq!(stock_of(&pool, product.id).await, 2);
        assert_eq!(order_count(&pool).await, 1);

        pool.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
    }
}
