//! Database operations for the shop `SQLite` database.
//!
//! ## Tables
//!
//! - `users` - Accounts with Argon2 password hashes and the admin flag
//! - `products` - Catalog with integer prices and stock
//! - `cart_lines` - One row per (user, product)
//! - `wishlist_items` - One row per (user, product)
//! - `orders` - Immutable purchase records
//! - `reviews` - Ratings per product
//! - `coupons` - Discount codes
//!
//! Functions other than the user repository take any `SqliteExecutor`, so
//! the same query runs against the pool or inside a transaction.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/shop/migrations/` and embedded in
//! [`MIGRATOR`]. They run at startup unless `SHOP_AUTO_MIGRATE=false`, or via:
//! ```bash
//! cargo run -p threefold-cli -- migrate shop
//! ```

pub mod cart;
pub mod coupons;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;
pub mod wishlist;

use sqlx::migrate::Migrator;

pub use threefold_platform::db::{RepositoryError, create_memory_pool, create_pool};
pub use users::UserRepository;

/// Embedded shop migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();
