//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Server errors are captured to
//! Sentry before responding; clients only ever see `{"detail": ...}` with a
//! safe message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use threefold_platform::auth::{AuthError, BearerRejection};
use threefold_platform::http::detail;

use crate::db::RepositoryError;
use crate::services::{CartError, CatalogError, CouponError, OrderError};

/// Application-level error type for the shop.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Signup or login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Missing or invalid bearer token.
    #[error("Unauthorized: {}", .0.detail())]
    Unauthorized(BearerRejection),

    /// Authenticated, but not allowed.
    #[error("Permission denied")]
    Forbidden,

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Coupon(#[from] CouponError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<BearerRejection> for AppError {
    fn from(rejection: BearerRejection) -> Self {
        Self::Unauthorized(rejection)
    }
}

impl AppError {
    /// Whether this is our fault rather than the client's.
    fn is_server_error(&self) -> bool {
        match self {
            Self::Database(_) | Self::Internal(_) => true,
            Self::Auth(err) => matches!(
                err,
                AuthError::Repository(_) | AuthError::PasswordHash | AuthError::Token(_)
            ),
            Self::Order(OrderError::Repository(_))
            | Self::Cart(CartError::Repository(_))
            | Self::Catalog(CatalogError::Repository(_))
            | Self::Coupon(CouponError::Repository(_)) => true,
            _ => false,
        }
    }

    fn status(&self) -> StatusCode {
        if self.is_server_error() {
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
        match self {
            Self::Auth(AuthError::InvalidCredentials) | Self::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Auth(AuthError::UserAlreadyExists) | Self::Coupon(CouponError::DuplicateCode) => {
                StatusCode::CONFLICT
            }
            Self::Forbidden | Self::Order(OrderError::Forbidden) => StatusCode::FORBIDDEN,
            Self::Order(OrderError::NotFound | OrderError::ProductNotFound(_))
            | Self::Cart(CartError::NotInCart | CartError::ProductNotFound)
            | Self::Catalog(CatalogError::ProductNotFound)
            | Self::Coupon(CouponError::NotFound) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn client_message(&self) -> String {
        if self.is_server_error() {
            return "Internal server error".to_string();
        }
        match self {
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::UserAlreadyExists => "Username or email already registered".to_string(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AuthError::WeakPassword(msg) | AuthError::InvalidUsername(msg) => msg.clone(),
                _ => "Authentication error".to_string(),
            },
            Self::Unauthorized(rejection) => rejection.detail().to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        if let Self::Unauthorized(rejection) = self {
            return rejection.into_response();
        }

        detail(self.status(), self.client_message())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn body(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_order_errors_map_to_status() {
        let (status, json) = body(OrderError::EmptyCart.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], "Cart is empty");

        let (status, json) = body(OrderError::InsufficientStock("Lamp".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], "Insufficient stock for Lamp");

        let (status, _) = body(OrderError::Forbidden.into()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = body(OrderError::NotFound.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["detail"], "Order not found");
    }

    #[tokio::test]
    async fn test_total_overflow_is_client_error() {
        let (status, json) = body(OrderError::TotalOverflow("Yacht".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], "Order total too large for Yacht");
    }

    #[tokio::test]
    async fn test_internal_errors_hide_details() {
        let err = AppError::Database(RepositoryError::DataCorruption("bad email row".into()));
        let (status, json) = body(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["detail"], "Internal server error");
    }

    #[tokio::test]
    async fn test_unauthorized_sets_challenge() {
        let response = AppError::from(BearerRejection::Missing).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get("www-authenticate").unwrap(),
            "Bearer"
        );
    }

    #[tokio::test]
    async fn test_coupon_message() {
        let (status, json) = body(CouponError::InvalidCoupon.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], "Invalid or expired coupon");
    }
}
