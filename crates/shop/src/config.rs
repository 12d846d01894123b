//! Shop configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOP_JWT_SECRET` - Token signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `SHOP_DATABASE_URL` - `SQLite` URL (fallback `DATABASE_URL`, default `sqlite://shop.db`)
//! - `SHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOP_PORT` - Listen port (default: 8000)
//! - `SHOP_TOKEN_TTL_MINUTES` - Access token lifetime (default: 30)
//! - `SHOP_RATE_LIMIT_AUTH` - Rate limit `/signup` and `/login` (default: true)
//! - `SHOP_SIGNUP_GRANTS_ADMIN` - Every new account is an admin (default: false, dev only)
//! - `SHOP_AUTO_MIGRATE` - Run migrations on startup (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use secrecy::SecretString;
use threefold_platform::auth::JwtConfig;
use threefold_platform::config::{
    ConfigError, SentryConfig, ServerConfig, bool_env, database_url, load_dotenv,
};

const PREFIX: &str = "SHOP";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_URL: &str = "sqlite://shop.db";

/// Shop application configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// `SQLite` database URL
    pub database_url: SecretString,
    /// Bind address
    pub server: ServerConfig,
    /// Token signing
    pub jwt: JwtConfig,
    /// Apply the auth rate limiter to `/signup` and `/login`
    pub rate_limit_auth: bool,
    /// Grant the admin flag on signup. Development convenience only.
    pub signup_grants_admin: bool,
    /// Run embedded migrations at startup
    pub auto_migrate: bool,
    /// Sentry settings
    pub sentry: SentryConfig,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
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
            rate_limit_auth: bool_env("SHOP_RATE_LIMIT_AUTH", true)?,
            signup_grants_admin: bool_env("SHOP_SIGNUP_GRANTS_ADMIN", false)?,
            auto_migrate: bool_env("SHOP_AUTO_MIGRATE", true)?,
            sentry: SentryConfig::from_env(),
        })
    }

    /// Configuration for in-process use (tests, tooling): in-memory database,
    /// no rate limiting, the given signing parameters.
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
            signup_grants_admin: false,
            auto_migrate: true,
            sentry: SentryConfig::default(),
        }
    }
}
