//! Integration test harness for the Threefold services.
//!
//! Each helper builds a service router over a fresh in-memory `SQLite`
//! database and drives it in-process with `tower::ServiceExt::oneshot`; no
//! ports are bound.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p threefold-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use secrecy::SecretString;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use threefold_platform::auth::JwtConfig;
use threefold_platform::db::create_memory_pool;

/// Signing key shared by the test apps.
pub const TEST_JWT_SECRET: &str = "T7#kL2$mN9@pQ4!rS8%vW1^xY6&zA3*b";

/// Token settings for test apps.
#[must_use]
pub fn test_jwt() -> JwtConfig {
    JwtConfig {
        secret: SecretString::from(TEST_JWT_SECRET),
        ttl: chrono::Duration::minutes(30),
    }
}

/// A router plus the database behind it.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

/// Status and parsed JSON body of a response. Non-JSON bodies are kept as a
/// JSON string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub www_authenticate: Option<String>,
}

impl TestResponse {
    /// `body["detail"]` as a string, for error assertions.
    #[must_use]
    pub fn detail(&self) -> &str {
        self.body["detail"].as_str().unwrap_or_default()
    }

    /// `body["message"]` as a string.
    #[must_use]
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    /// Send a request with an optional bearer token and JSON body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        json: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match json {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let www_authenticate = response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse {
            status,
            body,
            www_authenticate,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, json: Option<Value>) -> TestResponse {
        self.send(Method::POST, uri, token, json).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, json: Value) -> TestResponse {
        self.send(Method::PUT, uri, token, Some(json)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::DELETE, uri, token, None).await
    }

    /// Sign up and log in; returns the access token.
    pub async fn register(&self, username: &str) -> String {
        let email = format!("{username}@example.test");
        let password = format!("{username}-password");

        let signup = self
            .post(
                "/signup",
                None,
                Some(serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password,
                })),
            )
            .await;
        assert_eq!(signup.status, StatusCode::OK, "signup failed: {:?}", signup.body);

        let login = self
            .post(
                "/login",
                None,
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(login.status, StatusCode::OK, "login failed: {:?}", login.body);
        login.body["access_token"].as_str().unwrap().to_string()
    }
}

async fn migrated_pool(migrator: &sqlx::migrate::Migrator) -> SqlitePool {
    let pool = create_memory_pool().await.unwrap();
    migrator.run(&pool).await.unwrap();
    pool
}

/// The shop API over an empty database.
pub async fn shop_app() -> TestApp {
    let pool = migrated_pool(&threefold_shop::db::MIGRATOR).await;
    let state = threefold_shop::AppState::new(
        threefold_shop::ShopConfig::local(test_jwt()),
        pool.clone(),
    );
    TestApp {
        router: threefold_shop::app(state),
        pool,
    }
}

/// The social API over an empty database.
pub async fn social_app() -> TestApp {
    let pool = migrated_pool(&threefold_social::db::MIGRATOR).await;
    let state = threefold_social::AppState::new(
        threefold_social::SocialConfig::local(test_jwt()),
        pool.clone(),
    );
    TestApp {
        router: threefold_social::app(state),
        pool,
    }
}

/// The to-do API over an empty database.
pub async fn todo_app() -> TestApp {
    let pool = migrated_pool(&threefold_todo::db::MIGRATOR).await;
    let state = threefold_todo::AppState::new(threefold_todo::TodoConfig::local(), pool.clone());
    TestApp {
        router: threefold_todo::app(state),
        pool,
    }
}
