//! Products and reviews.

use sqlx::SqlitePool;
use thiserror::Error;

use threefold_core::{ProductId, UserId};

use crate::db::{self, RepositoryError};
use crate::models::review::RATING_RANGE;
use crate::models::{NewProduct, NewReview, Product, ProductFilter, Review};

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product with this id.
    #[error("Product not found")]
    ProductNotFound,

    /// Input failed validation.
    #[error("{0}")]
    Invalid(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Search the catalog.
///
/// # Errors
///
/// Returns `CatalogError::Invalid` if `min_price > max_price`.
pub async fn search(pool: &SqlitePool, filter: &ProductFilter) -> Result<Vec<Product>, CatalogError> {
    if filter.min_price > filter.max_price {
        return Err(CatalogError::Invalid(
            "min_price cannot exceed max_price".into(),
        ));
    }
    Ok(db::products::list(pool, filter).await?)
}

/// Fetch one product.
///
/// # Errors
///
/// Returns `CatalogError::ProductNotFound` if it does not exist.
pub async fn product(pool: &SqlitePool, id: ProductId) -> Result<Product, CatalogError> {
    db::products::get(pool, id)
        .await?
        .ok_or(CatalogError::ProductNotFound)
}

/// Create a product. Callers must have checked the admin flag.
///
/// # Errors
///
/// Returns `CatalogError::Invalid` for an empty name or negative stock.
#[tracing::instrument(skip(pool, input), fields(name = %input.name))]
pub async fn create_product(pool: &SqlitePool, input: NewProduct) -> Result<Product, CatalogError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(CatalogError::Invalid("Product name cannot be empty".into()));
    }
    if input.stock < 0 {
        return Err(CatalogError::Invalid("Stock cannot be negative".into()));
    }

    let input = NewProduct {
        name: name.to_string(),
        ..input
    };
    let product = db::products::create(pool, &input).await?;

    tracing::info!(product_id = %product.id, "product created");
    Ok(product)
}

/// Post a review.
///
/// # Errors
///
/// Returns `CatalogError::Invalid` for a rating outside 1..=5 and
/// `CatalogError::ProductNotFound` for unknown products.
pub async fn add_review(
    pool: &SqlitePool,
    user_id: UserId,
    review: &NewReview,
) -> Result<Review, CatalogError> {
    if !RATING_RANGE.contains(&review.rating) {
        return Err(CatalogError::Invalid(
            "Rating must be between 1 and 5".into(),
        ));
    }
    product(pool, review.product_id).await?;

    Ok(db::reviews::create(pool, user_id, review).await?)
}

/// Reviews of a product.
///
/// # Errors
///
/// Returns `CatalogError::ProductNotFound` for unknown products.
pub async fn reviews(pool: &SqlitePool, product_id: ProductId) -> Result<Vec<Review>, CatalogError> {
    product(pool, product_id).await?;
    Ok(db::reviews::for_product(pool, product_id).await?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::testing;
    use threefold_core::Price;

    #[tokio::test]
    async fn test_create_product_validation() {
        let pool = testing::pool().await;

        let blank = NewProduct {
            name: "   ".into(),
            description: String::new(),
            price: Price::ZERO,
            stock: 1,
        };
        assert!(matches!(
            create_product(&pool, blank).await,
            Err(CatalogError::Invalid(_))
        ));

        let negative = NewProduct {
            name: "Stool".into(),
            description: String::new(),
            price: Price::ZERO,
            stock: -3,
        };
        assert!(matches!(
            create_product(&pool, negative).await,
            Err(CatalogError::Invalid(_))
        ));

        let ok = NewProduct {
            name: "  Stool ".into(),
            description: "three legs".into(),
            price: Price::from_minor(2_500).unwrap(),
            stock: 3,
        };
        let product = create_product(&pool, ok).await.unwrap();
        assert_eq!(product.name, "Stool");
    }

    #[tokio::test]
    async fn test_search_rejects_inverted_range() {
        let pool = testing::pool().await;
        let filter = ProductFilter {
            search: None,
            min_price: 10,
            max_price: 5,
        };
        assert!(matches!(
            search(&pool, &filter).await,
            Err(CatalogError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn test_reviews() {
        let pool = testing::pool().await;
        let user = testing::user(&pool, "zed").await;
        let product = testing::product(&pool, "Frame", 1_000, 1).await;

        let bad = NewReview {
            product_id: product.id,
            rating: 6,
            review_text: None,
        };
        assert!(matches!(
            add_review(&pool, user, &bad).await,
            Err(CatalogError::Invalid(_))
        ));

        let orphan = NewReview {
            product_id: ProductId::new(999),
            rating: 4,
            review_text: None,
        };
        assert!(matches!(
            add_review(&pool, user, &orphan).await,
            Err(CatalogError::ProductNotFound)
        ));

        let good = NewReview {
            product_id: product.id,
            rating: 5,
            review_text: Some("sturdy".into()),
        };
        add_review(&pool, user, &good).await.unwrap();

        let listed = reviews(&pool, product.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].review_text.as_deref(), Some("sturdy"));
    }
}
