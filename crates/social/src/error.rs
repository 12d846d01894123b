//! Unified error handling with Sentry integration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use threefold_platform::auth::{AuthError, BearerRejection};
use threefold_platform::http::detail;

use crate::db::RepositoryError;
use crate::services::{FriendshipError, NotificationError, PostError};

/// Application-level error type for the social service.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Unauthorized: {}", .0.detail())]
    Unauthorized(BearerRejection),

    #[error(transparent)]
    Post(#[from] PostError),

    #[error(transparent)]
    Friendship(#[from] FriendshipError),

    #[error(transparent)]
    Notification(#[from] NotificationError),
}

impl From<BearerRejection> for AppError {
    fn from(rejection: BearerRejection) -> Self {
        Self::Unauthorized(rejection)
    }
}

impl AppError {
    fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::Auth(AuthError::Repository(_) | AuthError::PasswordHash | AuthError::Token(_))
                | Self::Post(PostError::Repository(_))
                | Self::Friendship(FriendshipError::Repository(_))
                | Self::Notification(NotificationError::Repository(_))
        )
    }

    fn status(&self) -> StatusCode {
        if self.is_server_error() {
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
        match self {
            Self::Auth(AuthError::InvalidCredentials) | Self::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Post(PostError::Forbidden) | Self::Friendship(FriendshipError::Forbidden) => {
                StatusCode::FORBIDDEN
            }
            Self::Post(PostError::PostNotFound | PostError::CommentNotFound)
            | Self::Friendship(FriendshipError::UserNotFound) => StatusCode::NOT_FOUND,
            Self::Auth(AuthError::UserAlreadyExists)
            | Self::Post(PostError::AlreadyLiked)
            | Self::Friendship(
                FriendshipError::AlreadyExists
                | FriendshipError::NotPending(_)
                | FriendshipError::AlreadyDecided,
            ) => StatusCode::CONFLICT,
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

pub type Result<T> = std::result::Result<T, AppError>;
