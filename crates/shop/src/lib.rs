//! Threefold shop: an e-commerce JSON API.
//!
//! Users sign up, browse and review products, fill a cart and place orders
//! from it. Admins manage the catalog and coupons. The crate is a library so
//! the router can be driven in-process by tests and tooling; `main.rs` only
//! wires configuration and serves it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use threefold_platform::health::health_routes;
use threefold_platform::middleware::auth_rate_limiter;

pub use config::ShopConfig;
pub use state::AppState;

/// Build the shop router.
///
/// Observability layers are added by `threefold_platform::server::serve`.
pub fn app(state: AppState) -> Router {
    let mut auth = routes::auth_routes();
    if state.config().rate_limit_auth {
        auth = auth.layer(auth_rate_limiter());
    }

    Router::new()
        .merge(auth)
        .merge(routes::routes())
        .merge(health_routes())
        .with_state(state)
}
