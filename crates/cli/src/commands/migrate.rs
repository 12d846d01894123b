//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! tf-cli migrate shop
//! tf-cli migrate social
//! tf-cli migrate todo
//! tf-cli migrate all
//! ```
//!
//! # Environment Variables
//!
//! - `SHOP_DATABASE_URL`, `SOCIAL_DATABASE_URL`, `TODO_DATABASE_URL`
//!   (each falls back to `DATABASE_URL`, then `sqlite://<service>.db`)
//!
//! Migration files live in `crates/<service>/migrations/` and are embedded in
//! each service crate's `db::MIGRATOR`.

use sqlx::migrate::Migrator;

use super::{CommandError, Service};

const fn migrator(service: Service) -> &'static Migrator {
    match service {
        Service::Shop => &threefold_shop::db::MIGRATOR,
        Service::Social => &threefold_social::db::MIGRATOR,
        Service::Todo => &threefold_todo::db::MIGRATOR,
    }
}

/// Run one service's migrations against its configured database.
///
/// # Errors
///
/// Returns `CommandError` if the database cannot be opened or a migration
/// fails.
pub async fn run(service: Service) -> Result<(), CommandError> {
    let pool = service.connect().await?;

    tracing::info!(?service, "Running migrations...");
    migrator(service).run(&pool).await?;
    pool.close().await;

    tracing::info!(?service, "Migrations complete");
    Ok(())
}

/// Run every service's migrations, stopping at the first failure.
///
/// # Errors
///
/// Returns the first `CommandError`.
pub async fn all() -> Result<(), CommandError> {
    for service in [Service::Shop, Service::Social, Service::Todo] {
        run(service).await?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use threefold_platform::db::create_memory_pool;

    #[tokio::test]
    async fn test_every_migrator_applies_cleanly() {
        for service in [Service::Shop, Service::Social, Service::Todo] {
            let pool = create_memory_pool().await.unwrap();
            migrator(service).run(&pool).await.unwrap();
            // Re-running is a no-op.
            migrator(service).run(&pool).await.unwrap();
        }
    }
}
