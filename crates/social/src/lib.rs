//! Threefold social: a social network JSON API.
//!
//! Members post, like and comment, keep a notification inbox, and send,
//! accept or reject friend requests. Friendship changes notify the other
//! side.

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

pub use config::SocialConfig;
pub use state::AppState;

/// Build the social router.
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
