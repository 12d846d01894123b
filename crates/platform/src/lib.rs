//! Shared server plumbing for the Threefold services.
//!
//! Every service binary (`threefold-shop`, `threefold-social`,
//! `threefold-todo`) builds on the same pieces:
//!
//! - [`config`] - environment helpers and secret validation
//! - [`telemetry`] - Sentry and `tracing-subscriber` bootstrap
//! - [`db`] - `SQLite` pool construction and `RepositoryError`
//! - [`auth`] - Argon2 password hashing, JWT issuance, bearer extractor
//! - [`middleware`] - request IDs and rate limiting
//! - [`health`] - liveness and readiness routes
//! - [`http`] - `{"detail": ...}` error bodies and message helpers
//! - [`server`] - observability layers and graceful shutdown

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod db;
pub mod health;
pub mod http;
pub mod middleware;
pub mod server;
pub mod telemetry;

pub use config::ConfigError;
pub use db::RepositoryError;
