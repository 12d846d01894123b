//! To-do configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `TODO_DATABASE_URL` - `SQLite` URL (fallback `DATABASE_URL`, default `sqlite://todo.db`)
//! - `TODO_HOST` / `TODO_PORT` - Bind address (default: 127.0.0.1:8002)
//! - `TODO_AUTO_MIGRATE` - Run migrations on startup (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use secrecy::SecretString;
use threefold_platform::config::{
    ConfigError, SentryConfig, ServerConfig, bool_env, database_url, load_dotenv,
};

const PREFIX: &str = "TODO";
const DEFAULT_PORT: u16 = 8002;
const DEFAULT_DATABASE_URL: &str = "sqlite://todo.db";

#[derive(Debug, Clone)]
pub struct TodoConfig {
    pub database_url: SecretString,
    pub server: ServerConfig,
    pub auto_migrate: bool,
    pub sentry: SentryConfig,
}

impl TodoConfig {
    /// Load configuration from environment variables (and `.env`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();

        Ok(Self {
            database_url: database_url(PREFIX, DEFAULT_DATABASE_URL),
            server: ServerConfig::from_env(PREFIX, DEFAULT_PORT)?,
            auto_migrate: bool_env("TODO_AUTO_MIGRATE", true)?,
            sentry: SentryConfig::from_env(),
        })
    }

    /// In-process configuration with an in-memory database.
    #[must_use]
    pub fn local() -> Self {
        Self {
            database_url: SecretString::from("sqlite::memory:"),
            server: ServerConfig {
                host: std::net::IpAddr::from([127, 0, 0, 1]),
                port: DEFAULT_PORT,
            },
            auto_migrate: true,
            sentry: SentryConfig::default(),
        }
    }
}
