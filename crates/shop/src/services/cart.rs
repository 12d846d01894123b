//! Cart and wishlist operations.

use sqlx::SqlitePool;
use thiserror::Error;

use threefold_core::{ProductId, UserId};

use crate::db::{self, RepositoryError};
use crate::models::{CartLine, WishlistItem};

/// Errors from cart and wishlist operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Quantity below 1.
    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    /// Unknown product, or fewer units in stock than requested.
    #[error("Insufficient stock")]
    Unavailable,

    /// Unknown product (wishlist).
    #[error("Product not found")]
    ProductNotFound,

    /// No cart line for this product.
    #[error("Item not in cart")]
    NotInCart,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Add a product to the user's cart.
///
/// The accumulated line quantity must be available at the time of adding;
/// it is checked again at checkout.
///
/// # Errors
///
/// Returns `CartError::InvalidQuantity` for quantities below 1 and
/// `CartError::Unavailable` if the product is unknown or the line would
/// exceed its stock.
#[tracing::instrument(skip(pool))]
pub async fn add_to_cart(
    pool: &SqlitePool,
    user_id: UserId,
    product_id: ProductId,
    quantity: i64,
) -> Result<CartLine, CartError> {
    if quantity < 1 {
        return Err(CartError::InvalidQuantity);
    }

    let mut tx = pool.begin().await.map_err(RepositoryError::from)?;
    db::cart::lock_for_checkout(&mut *tx, user_id).await?;

    let product = db::products::get(&mut *tx, product_id)
        .await?
        .ok_or(CartError::Unavailable)?;
    let in_cart = db::cart::quantity_of(&mut *tx, user_id, product_id).await?;
    match in_cart.checked_add(quantity) {
        Some(total) if total <= product.stock => {}
        _ => return Err(CartError::Unavailable),
    }

    let line = db::cart::add(&mut *tx, user_id, product_id, quantity).await?;
    tx.commit().await.map_err(RepositoryError::from)?;
    Ok(line)
}

/// Remove the user's line for a product.
///
/// # Errors
///
/// Returns `CartError::NotInCart` if the user has no such line.
pub async fn remove_from_cart(
    pool: &SqlitePool,
    user_id: UserId,
    product_id: ProductId,
) -> Result<(), CartError> {
    if db::cart::remove_product(pool, user_id, product_id).await? {
        Ok(())
    } else {
        Err(CartError::NotInCart)
    }
}

/// Cart lines of a user.
///
/// # Errors
///
/// Returns `CartError::Repository` if the query fails.
pub async fn cart_for(pool: &SqlitePool, user_id: UserId) -> Result<Vec<CartLine>, CartError> {
    Ok(db::cart::lines_for_user(pool, user_id).await?)
}

/// Add a product to the user's wishlist.
///
/// # Errors
///
/// Returns `CartError::ProductNotFound` for unknown products.
pub async fn add_to_wishlist(
    pool: &SqlitePool,
    user_id: UserId,
    product_id: ProductId,
) -> Result<(), CartError> {
    if db::products::get(pool, product_id).await?.is_none() {
        return Err(CartError::ProductNotFound);
    }
    Ok(db::wishlist::add(pool, user_id, product_id).await?)
}

/// Wishlist of a user.
///
/// # Errors
///
/// Returns `CartError::Repository` if the query fails.
pub async fn wishlist_for(
    pool: &SqlitePool,
    user_id: UserId,
) -> Result<Vec<WishlistItem>, CartError> {
    Ok(db::wishlist::for_user(pool, user_id).await?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::testing;

    #[tokio::test]
    async fn test_add_checks_quantity_and_stock() {
        let pool = testing::pool().await;
        let user = testing::user(&pool, "wes").await;
        let product = testing::product(&pool, "Plant", 1_500, 3).await;

        assert!(matches!(
            add_to_cart(&pool, user, product.id, 0).await,
            Err(CartError::InvalidQuantity)
        ));
        assert!(matches!(
            add_to_cart(&pool, user, product.id, 4).await,
            Err(CartError::Unavailable)
        ));
        assert!(matches!(
            add_to_cart(&pool, user, ProductId::new(404), 1).await,
            Err(CartError::Unavailable)
        ));

        let line = add_to_cart(&pool, user, product.id, 3).await.unwrap();
        assert_eq!(line.quantity, 3);
    }

    #[tokio::test]
    async fn test_add_counts_quantity_already_in_cart() {
        let pool = testing::pool().await;
        let user = testing::user(&pool, "xena").await;
        let product = testing::product(&pool, "Vase", 2_000, 3).await;

        add_to_cart(&pool, user, product.id, 2).await.unwrap();
        assert!(matches!(
            add_to_cart(&pool, user, product.id, 2).await,
            Err(CartError::Unavailable)
        ));
        let line = add_to_cart(&pool, user, product.id, 1).await.unwrap();
        assert_eq!(line.quantity, 3);
    }

    #[tokio::test]
    async fn test_add_rejects_quantity_overflow() {
        let pool = testing::pool().await;
        let user = testing::user(&pool, "yuri").await;
        let product = testing::product(&pool, "Sand", 1, i64::MAX).await;

        add_to_cart(&pool, user, product.id, i64::MAX).await.unwrap();
        assert!(matches!(
            add_to_cart(&pool, user, product.id, 1).await,
            Err(CartError::Unavailable)
        ));
        let lines = db::cart::lines_for_user(&pool, user).await.unwrap();
        assert_eq!(lines[0].quantity, i64::MAX);
    }

    #[tokio::test]
    async fn test_remove_missing_line() {
        let pool = testing::pool().await;
        let user = testing::user(&pool, "xan").await;
        assert!(matches!(
            remove_from_cart(&pool, user, ProductId::new(1)).await,
            Err(CartError::NotInCart)
        ));
    }

    #[tokio::test]
    async fn test_wishlist_requires_product() {
        let pool = testing::pool().await;
        let user = testing::user(&pool, "yara").await;
        assert!(matches!(
            add_to_wishlist(&pool, user, ProductId::new(77)).await,
            Err(CartError::ProductNotFound)
        ));

        let product = testing::product(&pool, "Poster", 500, 1).await;
        add_to_wishlist(&pool, user, product.id).await.unwrap();
        assert_eq!(wishlist_for(&pool, user).await.unwrap().len(), 1);
    }
}
