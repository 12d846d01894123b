//! Coupon queries.

use chrono::Utc;
use sqlx::SqliteExecutor;

use super::RepositoryError;
use crate::models::{Coupon, NewCoupon};

/// Insert a coupon.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the code already exists.
pub async fn create<'e, E>(conn: E, coupon: &NewCoupon) -> Result<Coupon, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Coupon>(
        "INSERT INTO coupons (code, discount_percentage, is_active, created_at)
         VALUES (?, ?, ?, ?)
         RETURNING id, code, discount_percentage, is_active, created_at",
    )
    .bind(&coupon.code)
    .bind(coupon.discount_percentage)
    .bind(coupon.is_active)
    .bind(Utc::now())
    .fetch_one(conn)
    .await
    .map_err(|e| RepositoryError::from_write(e, "coupon code already exists"))
}

/// Find an active coupon by exact code.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn find_active<'e, E>(conn: E, code: &str) -> Result<Option<Coupon>, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let coupon = sqlx::query_as::<_, Coupon>(
        "SELECT id, code, discount_percentage, is_active, created_at
         FROM coupons WHERE code = ? AND is_active = 1",
    )
    .bind(code)
    .fetch_optional(conn)
    .await?;

    Ok(coupon)
}

/// Deactivate a coupon. Returns `false` if the code does not exist.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn deactivate<'e, E>(conn: E, code: &str) -> Result<bool, RepositoryError>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("UPDATE coupons SET is_active = 0 WHERE code = ?")
        .bind(code)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::testing;

    fn coupon(code: &str, pct: i64, active: bool) -> NewCoupon {
        NewCoupon {
            code: code.to_string(),
            discount_percentage: pct,
            is_active: active,
        }
    }

    #[tokio::test]
    async fn test_only_active_coupons_found() {
        let pool = testing::pool().await;
        create(&pool, &coupon("SPRING10", 10, true)).await.unwrap();
        create(&pool, &coupon("OLD50", 50, false)).await.unwrap();

        assert_eq!(
            find_active(&pool, "SPRING10").await.unwrap().unwrap().discount_percentage,
            10
        );
        assert!(find_active(&pool, "OLD50").await.unwrap().is_none());
        assert!(find_active(&pool, "spring10").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_code_conflicts() {
        let pool = testing::pool().await;
        create(&pool, &coupon("DUP", 5, true)).await.unwrap();
        assert!(matches!(
            create(&pool, &coupon("DUP", 15, true)).await,
            Err(RepositoryError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_deactivate() {
        let pool = testing::pool().await;
        create(&pool, &coupon("ONCE", 20, true)).await.unwrap();

        assert!(deactivate(&pool, "ONCE").await.unwrap());
        assert!(find_active(&pool, "ONCE").await.unwrap().is_none());
        assert!(!deactivate(&pool, "MISSING").await.unwrap());
    }
}
