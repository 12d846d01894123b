//! Threefold social server (port 8001 by default).

#![cfg_attr(not(test), forbid(unsafe_code))]

use threefold_platform::{server, telemetry};
use threefold_social::{AppState, SocialConfig, app, db};

#[tokio::main]
async fn main() {
    let config = SocialConfig::from_env().expect("Failed to load configuration");

    let _sentry_guard = telemetry::init_sentry(&config.sentry);
    telemetry::init_tracing("threefold_social=info,threefold_platform=info,tower_http=debug");

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    if config.auto_migrate {
        db::MIGRATOR
            .run(&pool)
            .await
            .expect("Failed to run migrations");
        tracing::info!("Migrations applied");
    }

    let addr = config.server.socket_addr();
    let state = AppState::new(config, pool);

    if let Err(err) = server::serve(app(state), addr).await {
        tracing::error!(error = %err, "server error");
        std::process::exit(1);
    }
}
