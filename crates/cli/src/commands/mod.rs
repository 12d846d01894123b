//! CLI command implementations.

pub mod migrate;
pub mod shop;

use secrecy::SecretString;
use sqlx::SqlitePool;
use thiserror::Error;

use threefold_platform::config::{database_url, load_dotenv};
use threefold_platform::db::{RepositoryError, create_pool};

/// Errors from any command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] threefold_core::EmailError),

    #[error("No user with email {0}")]
    UserNotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Coupon(#[from] threefold_shop::services::CouponError),
}

/// A service whose database the CLI can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Shop,
    Social,
    Todo,
}

impl Service {
    /// Environment prefix and default database URL, matching the service's
    /// own configuration.
    const fn database_defaults(self) -> (&'static str, &'static str) {
        match self {
            Self::Shop => ("SHOP", "sqlite://shop.db"),
            Self::Social => ("SOCIAL", "sqlite://social.db"),
            Self::Todo => ("TODO", "sqlite://todo.db"),
        }
    }

    pub(crate) fn database_url(self) -> SecretString {
        load_dotenv();
        let (prefix, default) = self.database_defaults();
        database_url(prefix, default)
    }

    /// Open the service's configured database.
    pub(crate) async fn connect(self) -> Result<SqlitePool, CommandError> {
        tracing::info!(service = ?self, "Connecting to database...");
        Ok(create_pool(&self.database_url()).await?)
    }
}
