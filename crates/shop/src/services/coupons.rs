//! Coupon validation and management.
//!
//! Applying a coupon only reports its discount; nothing is stored against
//! the user or their cart. Coupons have no expiry date: "expired" in the
//! client-facing message means deactivated.

use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::{self, RepositoryError};
use crate::models::coupon::DISCOUNT_RANGE;
use crate::models::{Coupon, NewCoupon};

/// Errors from coupon operations.
#[derive(Debug, Error)]
pub enum CouponError {
    /// No active coupon with this code.
    #[error("Invalid or expired coupon")]
    InvalidCoupon,

    /// Empty code or discount outside 1..=100.
    #[error("{0}")]
    Invalid(String),

    /// A coupon with this code already exists.
    #[error("Coupon code already exists")]
    DuplicateCode,

    /// No coupon with this code (deactivation).
    #[error("Coupon not found")]
    NotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Look up an active coupon.
///
/// # Errors
///
/// Returns `CouponError::InvalidCoupon` if the code is unknown or inactive.
pub async fn apply_coupon(pool: &SqlitePool, code: &str) -> Result<Coupon, CouponError> {
    db::coupons::find_active(pool, code.trim())
        .await?
        .ok_or(CouponError::InvalidCoupon)
}

/// Create a coupon.
///
/// # Errors
///
/// Returns `CouponError::Invalid` for bad input and
/// `CouponError::DuplicateCode` if the code is taken.
#[tracing::instrument(skip(pool, input), fields(code = %input.code))]
pub async fn create_coupon(pool: &SqlitePool, input: NewCoupon) -> Result<Coupon, CouponError> {
    let code = input.code.trim();
    if code.is_empty() {
        return Err(CouponError::Invalid("Coupon code cannot be empty".into()));
    }
    if !DISCOUNT_RANGE.contains(&input.discount_percentage) {
        return Err(CouponError::Invalid(
            "Discount percentage must be between 1 and 100".into(),
        ));
    }

    let input = NewCoupon {
        code: code.to_string(),
        ..input
    };
    db::coupons::create(pool, &input).await.map_err(|e| match e {
        RepositoryError::Conflict(_) => CouponError::DuplicateCode,
        other => CouponError::Repository(other),
    })
}

/// Deactivate a coupon.
///
/// # Errors
///
/// Returns `CouponError::NotFound` if no coupon has this code.
pub async fn deactivate_coupon(pool: &SqlitePool, code: &str) -> Result<(), CouponError> {
    if db::coupons::deactivate(pool, code.trim()).await? {
        Ok(())
    } else {
        Err(CouponError::NotFound)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::testing;

    fn input(code: &str, pct: i64) -> NewCoupon {
        NewCoupon {
            code: code.into(),
            discount_percentage: pct,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_apply_active_coupon() {
        let pool = testing::pool().await;
        create_coupon(&pool, input("WELCOME15", 15)).await.unwrap();

        let coupon = apply_coupon(&pool, "WELCOME15").await.unwrap();
        assert_eq!(coupon.discount_percentage, 15);
    }

    #[tokio::test]
    async fn test_apply_unknown_or_inactive() {
        let pool = testing::pool().await;
        create_coupon(&pool, input("GONE", 30)).await.unwrap();
        deactivate_coupon(&pool, "GONE").await.unwrap();

        let err = apply_coupon(&pool, "GONE").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid or expired coupon");
        assert!(matches!(
            apply_coupon(&pool, "NEVER").await,
            Err(CouponError::InvalidCoupon)
        ));
    }

    #[tokio::test]
    async fn test_create_validation() {
        let pool = testing::pool().await;
        assert!(matches!(
            create_coupon(&pool, input("ZERO", 0)).await,
            Err(CouponError::Invalid(_))
        ));
        assert!(matches!(
            create_coupon(&pool, input("HUGE", 101)).await,
            Err(CouponError::Invalid(_))
        ));
        assert!(matches!(
            create_coupon(&pool, input(" ", 10)).await,
            Err(CouponError::Invalid(_))
        ));

        create_coupon(&pool, input("TWICE", 10)).await.unwrap();
        assert!(matches!(
            create_coupon(&pool, input("TWICE", 20)).await,
            Err(CouponError::DuplicateCode)
        ));
    }

    #[tokio::test]
    async fn test_deactivate_unknown() {
        let pool = testing::pool().await;
        assert!(matches!(
            deactivate_coupon(&pool, "MISSING").await,
            Err(CouponError::NotFound)
        ));
    }
}
