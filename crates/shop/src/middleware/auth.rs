//! Authentication extractors.
//!
//! [`CurrentUser`] verifies the bearer token and loads the user it names.
//! [`AdminUser`] additionally requires the admin flag.

use axum::{extract::FromRequestParts, http::request::Parts};

use threefold_platform::auth::{BearerClaims, BearerRejection};
use threefold_platform::telemetry::set_sentry_user;

use crate::db::UserRepository;
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

/// The authenticated caller.
///
/// A valid token for a user that no longer exists is treated like an
/// invalid token.
///
/// # Example
///
/// ```rust,ignore
/// async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
///     Json(user)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let BearerClaims(claims) = BearerClaims::from_request_parts(parts, state).await?;

        let user_id = claims
            .user_id()
            .map_err(|_| BearerRejection::Invalid)?;

        let user = UserRepository::new(state.pool())
            .get_by_id(user_id)
            .await?
            .ok_or(BearerRejection::Invalid)?;

        set_sentry_user(&user.id, &user.username);
        Ok(Self(user))
    }
}

/// An authenticated caller with the admin flag.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(AppError::Forbidden);
        }
        Ok(Self(user))
    }
}
