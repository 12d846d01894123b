//! Threefold todo: a minimal to-do list JSON API with no authentication.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;

use axum::Router;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

use threefold_platform::health::health_routes;

pub use config::TodoConfig;
pub use state::AppState;

/// Build the to-do router. Trailing slashes are trimmed before routing.
pub fn app(state: AppState) -> Router {
    let inner = Router::new()
        .merge(routes::routes())
        .merge(health_routes())
        .with_state(state);

    Router::new().fallback_service(NormalizePathLayer::trim_trailing_slash().layer(inner))
}
