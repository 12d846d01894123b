//! Review queries.

use chrono::Utc;
use sqlx::SqliteExecutor;

use threefold_core::{ProductId, UserId};

use super::RepositoryError;
use crate::models::{NewReview, Review};

/// Insert a review.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn create<'e, E>(
    conn: E,
    user_id: UserId,
    review: &NewReview,
) -> Result<Review, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let review = sqlx::query_as::<_, Review>(
        "INSERT INTO reviews (user_id, product_id, rating, review_text, created_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING id, user_id, product_id, rating, review_text, created_at",
    )
    .bind(user_id)
    .bind(review.product_id)
    .bind(review.rating)
    .bind(review.review_text.as_deref())
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(review)
}

/// Reviews of a product, oldest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn for_product<'e, E>(conn: E, product_id: ProductId) -> Result<Vec<Review>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT id, user_id, product_id, rating, review_text, created_at
         FROM reviews WHERE product_id = ? ORDER BY id",
    )
    .bind(product_id)
    .fetch_all(conn)
    .await?;

    Ok(reviews)
}
