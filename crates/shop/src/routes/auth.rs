//! Signup, login and the current user.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use threefold_platform::http::{JsonBody, Message, message};

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::User;
use crate::services::AuthService;
use crate::state::AppState;

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Register a new account.
#[tracing::instrument(skip(state, form), fields(username = %form.username))]
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<SignupRequest>,
) -> Result<Json<Message>> {
    AuthService::new(state.pool(), state.tokens())
        .register(
            &form.username,
            &form.email,
            &form.password,
            state.config().signup_grants_admin,
        )
        .await?;

    Ok(message("User registered successfully"))
}

/// Exchange email and password for a bearer token.
#[tracing::instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let (user, access_token) = AuthService::new(state.pool(), state.tokens())
        .login(&form.email, &form.password)
        .await?;

    tracing::info!(user_id = %user.id, "login succeeded");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// The authenticated user's profile.
pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}
