//! Application state shared across handlers.

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;
use threefold_platform::auth::TokenService;

use crate::config::SocialConfig;

/// Cheaply cloneable handle to the pool, token service and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SocialConfig,
    pool: SqlitePool,
    tokens: TokenService,
}

impl AppState {
    #[must_use]
    pub fn new(config: SocialConfig, pool: SqlitePool) -> Self {
        let tokens = TokenService::new(&config.jwt);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                tokens,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SocialConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.inner.pool.clone()
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.inner.tokens.clone()
    }
}
