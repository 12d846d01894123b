//! Business logic for the shop.
//!
//! Handlers stay thin: they extract input, call a service, and serialize the
//! result. Services own validation, authorization decisions that depend on
//! stored data, and transactions.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod coupons;
pub mod orders;

pub use auth::AuthService;
pub use cart::CartError;
pub use catalog::CatalogError;
pub use coupons::CouponError;
pub use orders::OrderError;
