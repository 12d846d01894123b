//! Social configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SOCIAL_JWT_SECRET` - Token signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `SOCIAL_DATABASE_URL` - `SQLite` URL (fallback `DATABASE_URL`, default `sqlite://social.db`)
//! - `SOCIAL_HOST` / `SOCIAL_PORT` - Bind address (default: 127.0.0.1:8001)
//! - `SOCIAL_TOKEN_TTL_MINUTES` - Access token lifetime (default: 30)
//! - `SOCIAL_RATE_LIMIT_AUTH` - Rate limit `/signup` and `/login` (default: true)
//! - `SOCIAL_AUTO_MIGRATE` - Run migrations on startup (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use secrecy::SecretString;
use threefold_platform::auth::JwtConfig;
use threefold_platform::config::{
    ConfigError, SentryConfig, ServerConfig, bool_env, database_url, load_dotenv,
};

const PREFIX: &str = "SOCIAL";
const DEFAULT_PORT: u16 = 8001;
const DEFAULT_DATABASE_URL: &str = "sqlite://social.db";

/// Social application configuration.
#[derive(Debug, Clone)]
pub struct SocialConfig {
    pub database_url: SecretString,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    /// Apply the auth rate limiter to `/signup` and `/login`
    pub rate_limit_auth: bool,
    pub auto_migrate: bool,
    pub sentry: SentryConfig,
}

impl SocialConfig {
    /// Load configuration from environment variables (and `.env`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the JWT secret is missing or weak, or any
    /// variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();

        Ok(Self {
            database_url: database_url(PREFIX, DEFAULT_DATABASE_URL),
            server: ServerConfig::from_env(PREFIX, DEFAULT_PORT)?,
            jwt: JwtConfig::from_env(PREFIX)?,
            rate_limit_auth: bool_env("SOCIAL_RATE_LIMIT_AUTH", true)?,
            auto_migrate: bool_env("SOCIAL_AUTO_MIGRATE", true)?,
            sentry: SentryConfig::from_env(),
        })
    }

    /// In-process configuration: in-memory database, no rate limiting.
    #[must_use]
    pub fn local(jwt: JwtConfig) -> Self {
        Self {
            database_url: SecretString::from("sqlite::memory:"),
            server: ServerConfig {
                host: std::net::IpAddr::from([127, 0, 0, 1]),
                port: DEFAULT_PORT,
            },
            jwt,
            rate_limit_auth: false,
            auto_migrate: true,
            sentry: SentryConfig::default(),
        }
    }
}
