//! HTTP route handlers for the shop.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST   /signup                 - Register
//! POST   /login                  - Exchange credentials for a bearer token
//! GET    /users/me               - Current user (auth)
//!
//! # Catalog
//! GET    /products               - Search (?search=&min_price=&max_price=)
//! POST   /products               - Create product (admin)
//! GET    /products/{id}          - Product detail
//! GET    /products/{id}/reviews  - Reviews of a product
//! POST   /reviews                - Post a review (auth)
//!
//! # Cart & wishlist (auth unless noted)
//! POST   /cart                   - Add to cart
//! GET    /cart                   - Own cart
//! GET    /cart/{user_id}         - Any user's cart (public)
//! DELETE /cart/{product_id}      - Remove a line
//! POST   /wishlist?product_id=   - Add to wishlist
//! GET    /wishlist               - Own wishlist
//!
//! # Orders (auth)
//! POST   /orders                 - Place an order from the cart
//! GET    /orders                 - Own orders
//! GET    /orders/{id}            - One order
//!
//! # Coupons
//! POST   /apply-coupon?code=     - Check a coupon (auth)
//! POST   /coupons                - Create coupon (admin)
//! ```

pub mod auth;
pub mod cart;
pub mod coupons;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Signup and login. Rate limited separately by the caller.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
}

/// Create the product and review routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index).post(products::create))
        .route("/products/{id}", get(products::show))
        .route("/products/{id}/reviews", get(products::reviews))
        .route("/reviews", post(products::add_review))
}

/// Create the cart and wishlist routes router.
///
/// `GET /cart/{id}` reads a user id while `DELETE /cart/{id}` takes a product
/// id; both share the one path segment.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show).post(cart::add))
        .route("/cart/{id}", get(cart::show_for_user).delete(cart::remove))
        .route("/wishlist", get(cart::wishlist).post(cart::add_to_wishlist))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(orders::index).post(orders::place))
        .route("/orders/{id}", get(orders::show))
}

/// Create the coupon routes router.
pub fn coupon_routes() -> Router<AppState> {
    Router::new()
        .route("/apply-coupon", post(coupons::apply))
        .route("/coupons", post(coupons::create))
}

/// All routes except signup/login.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(auth::me))
        .merge(product_routes())
        .merge(cart_routes())
        .merge(order_routes())
        .merge(coupon_routes())
}
