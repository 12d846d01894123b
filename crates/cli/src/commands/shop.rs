//! Shop administration: admin promotion and coupons.
//!
//! # Usage
//!
//! ```bash
//! tf-cli shop promote --email owner@example.com
//! tf-cli shop coupon create --code WELCOME10 --discount 10
//! tf-cli shop coupon create --code LATER --discount 25 --inactive
//! tf-cli shop coupon deactivate --code WELCOME10
//! ```

use sqlx::SqlitePool;

use threefold_core::Email;
use threefold_platform::db::RepositoryError;
use threefold_shop::db::UserRepository;
use threefold_shop::models::{Coupon, NewCoupon, User};
use threefold_shop::services::coupons;

use super::{CommandError, Service};

/// Grant the admin flag to the user with `email`.
///
/// # Errors
///
/// Returns `CommandError::UserNotFound` if no user has this email.
pub async fn promote(email: &str) -> Result<User, CommandError> {
    let pool = Service::Shop.connect().await?;
    let user = set_admin(&pool, email).await?;
    pool.close().await;

    tracing::info!(user_id = %user.id, email = %user.email, "User promoted to admin");
    Ok(user)
}

async fn set_admin(pool: &SqlitePool, email: &str) -> Result<User, CommandError> {
    let email = Email::parse(email)?;
    UserRepository::new(pool)
        .set_admin(&email, true)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => CommandError::UserNotFound(email.into_inner()),
            other => CommandError::Repository(other),
        })
}

/// Create a coupon.
///
/// # Errors
///
/// Returns `CommandError::Coupon` for an invalid or duplicate code.
pub async fn create_coupon(code: &str, discount: i64, active: bool) -> Result<Coupon, CommandError> {
    let pool = Service::Shop.connect().await?;
    let coupon = coupons::create_coupon(
        &pool,
        NewCoupon {
            code: code.to_string(),
            discount_percentage: discount,
            is_active: active,
        },
    )
    .await?;
    pool.close().await;

    tracing::info!(
        code = %coupon.code,
        discount = coupon.discount_percentage,
        active = coupon.is_active,
        "Coupon created"
    );
    Ok(coupon)
}

/// Deactivate a coupon.
///
/// # Errors
///
/// Returns `CommandError::Coupon` if no coupon has this code.
pub async fn deactivate_coupon(code: &str) -> Result<(), CommandError> {
    let pool = Service::Shop.connect().await?;
    coupons::deactivate_coupon(&pool, code).await?;
    pool.close().await;

    tracing::info!(code, "Coupon deactivated");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use threefold_platform::db::create_memory_pool;

    #[tokio::test]
    async fn test_set_admin() {
        let pool = create_memory_pool().await.unwrap();
        threefold_shop::db::MIGRATOR.run(&pool).await.unwrap();

        let email = Email::parse("owner@shop.test").unwrap();
        UserRepository::new(&pool)
            .create("owner", &email, "hash", false)
            .await
            .unwrap();

        let user = set_admin(&pool, "Owner@Shop.test").await.unwrap();
        assert!(user.is_admin);

        assert!(matches!(
            set_admin(&pool, "nobody@shop.test").await,
            Err(CommandError::UserNotFound(_))
        ));
        assert!(matches!(
            set_admin(&pool, "not-an-email").await,
            Err(CommandError::InvalidEmail(_))
        ));
    }
}
