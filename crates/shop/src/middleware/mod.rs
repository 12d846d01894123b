//! Request extractors for the shop.

mod auth;

pub use auth::{AdminUser, CurrentUser};
