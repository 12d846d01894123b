//! Database operations for the to-do `SQLite` database.
//!
//! Migrations live in `crates/todo/migrations/` and run at startup unless
//! `TODO_AUTO_MIGRATE=false`, or via `cargo run -p threefold-cli -- migrate todo`.

pub mod todos;

use sqlx::migrate::Migrator;

pub use threefold_platform::db::{RepositoryError, create_memory_pool, create_pool};

/// Embedded to-do migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();

#[cfg(test)]
pub(crate) mod testing {
    #![allow(clippy::unwrap_used)]

    use sqlx::SqlitePool;

    use super::{MIGRATOR, create_memory_pool};

    pub async fn pool() -> SqlitePool {
        let pool = create_memory_pool().await.unwrap();
        MIGRATOR.run(&pool).await.unwrap();
        pool
    }
}
