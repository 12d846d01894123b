//! `SQLite` pool construction and the shared repository error.
//!
//! Each service owns its schema under `crates/<service>/migrations/` and
//! embeds it with `sqlx::migrate!`. Migrations run automatically at startup
//! when `<PREFIX>_AUTO_MIGRATE` is true, or explicitly via:
//!
//! ```bash
//! cargo run -p threefold-cli -- migrate all
//! ```

use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a write error, turning unique-index violations into `Conflict`.
    ///
    /// ```rust,ignore
    /// sqlx::query("INSERT INTO coupons ...")
    ///     .execute(conn)
    ///     .await
    ///     .map_err(|e| RepositoryError::from_write(e, "coupon code already exists"))?;
    /// ```
    #[must_use]
    pub fn from_write(err: sqlx::Error, conflict: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict.to_owned());
        }
        Self::Database(err)
    }
}

/// Create a `SQLite` connection pool.
///
/// The database file is created if missing, foreign keys are enforced, the
/// journal runs in WAL mode, and writers wait up to 5 seconds on a busy lock.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(database_url: &SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create a private in-memory database for tests and tooling.
///
/// Every connection to `sqlite::memory:` opens a fresh database, so the pool
/// holds exactly one connection and never recycles it.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be opened.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_pool_keeps_schema_between_queries() {
        let pool = create_memory_pool().await.unwrap();
        sqlx::query("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT NOT NULL UNIQUE)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO t (name) VALUES ('a')")
            .execute(&pool)
            .await
            .unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM t")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_from_write_maps_unique_violation() {
        let pool = create_memory_pool().await.unwrap();
        sqlx::query("CREATE TABLE t (name TEXT NOT NULL UNIQUE)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO t (name) VALUES ('dup')")
            .execute(&pool)
            .await
            .unwrap();

        let err = sqlx::query("INSERT INTO t (name) VALUES ('dup')")
            .execute(&pool)
            .await
            .unwrap_err();

        let mapped = RepositoryError::from_write(err, "name taken");
        assert!(matches!(mapped, RepositoryError::Conflict(ref m) if m == "name taken"));
    }

    #[tokio::test]
    async fn test_from_write_keeps_other_errors() {
        let pool = create_memory_pool().await.unwrap();
        let err = sqlx::query("INSERT INTO missing_table VALUES (1)")
            .execute(&pool)
            .await
            .unwrap_err();

        assert!(matches!(
            RepositoryError::from_write(err, "unused"),
            RepositoryError::Database(_)
        ));
    }
}
