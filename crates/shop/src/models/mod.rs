//! Domain types for the shop.
//!
//! Row types live next to their queries in `crate::db`; the types here are
//! what services and handlers pass around and serialize.

pub mod cart;
pub mod coupon;
pub mod order;
pub mod product;
pub mod review;
pub mod user;
pub mod wishlist;

pub use cart::CartLine;
pub use coupon::{Coupon, NewCoupon};
pub use order::Order;
pub use product::{NewProduct, Product, ProductFilter};
pub use review::{NewReview, Review};
pub use user::User;
pub use wishlist::WishlistItem;
