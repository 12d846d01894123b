//! Database operations for the social `SQLite` database.
//!
//! ## Tables
//!
//! - `users` - Accounts with Argon2 password hashes
//! - `posts` - Authored content
//! - `likes` - One row per (user, post)
//! - `comments` - Comments on posts
//! - `notifications` - Per-user messages with a read flag
//! - `friendships` - One row per unordered pair of users, with status
//!
//! # Migrations
//!
//! Stored in `crates/social/migrations/` and embedded in [`MIGRATOR`]. They
//! run at startup unless `SOCIAL_AUTO_MIGRATE=false`, or via:
//! ```bash
//! cargo run -p threefold-cli -- migrate social
//! ```

pub mod comments;
pub mod friendships;
pub mod likes;
pub mod notifications;
pub mod posts;
pub mod users;

use sqlx::migrate::Migrator;

pub use threefold_platform::db::{RepositoryError, create_memory_pool, create_pool};
pub use users::UserRepository;

/// Embedded social migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();

#[cfg(test)]
pub(crate) mod testing {
    //! Fixtures shared by the db and service tests.

    #![allow(clippy::unwrap_used)]

    use sqlx::SqlitePool;
    use threefold_core::{Email, UserId};

    use super::{MIGRATOR, UserRepository, create_memory_pool, posts};
    use crate::models::Post;

    pub async fn pool() -> SqlitePool {
        let pool = create_memory_pool().await.unwrap();
        MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    pub async fn user(pool: &SqlitePool, username: &str) -> UserId {
        let email = Email::parse(&format!("{username}@social.test")).unwrap();
        UserRepository::new(pool)
            .create(username, &email, "$argon2id$placeholder")
            .await
            .unwrap()
            .id
    }

    pub async fn post(pool: &SqlitePool, author: UserId, content: &str) -> Post {
        posts::create(pool, author, content).await.unwrap()
    }
}
