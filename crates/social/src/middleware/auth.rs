//! Authentication extractor.

use axum::{extract::FromRequestParts, http::request::Parts};

use threefold_platform::auth::{BearerClaims, BearerRejection};
use threefold_platform::telemetry::set_sentry_user;

use crate::db::UserRepository;
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

/// The authenticated caller. Tokens naming a deleted user are rejected as
/// invalid.
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
