//! Signup and login.

use sqlx::SqlitePool;

use threefold_core::Email;
use threefold_platform::auth::{
    AuthError, TokenService, hash_password, validate_password, verify_password,
};

use crate::db::{RepositoryError, UserRepository};
use crate::models::User;

/// Longest accepted username.
const MAX_USERNAME_LENGTH: usize = 50;

/// Authentication service.
///
/// Handles user registration and password login.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, tokens: &'a TokenService) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens,
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername`, `AuthError::InvalidEmail` or
    /// `AuthError::WeakPassword` for bad input, and
    /// `AuthError::UserAlreadyExists` if the username or email is taken.
    #[tracing::instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        is_admin: bool,
    ) -> Result<User, AuthError> {
        let username = validate_username(username)?;
        let email = Email::parse(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(username, &email, &password_hash, is_admin)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Verify email and password and issue an access token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email or a
    /// wrong password.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = self.tokens.issue(user.id, &user.username)?;
        Ok((user, token))
    }
}

fn validate_username(username: &str) -> Result<&str, AuthError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(AuthError::InvalidUsername("username cannot be empty".into()));
    }
    if trimmed.chars().count() > MAX_USERNAME_LENGTH {
        return Err(AuthError::InvalidUsername(format!(
            "username must be at most {MAX_USERNAME_LENGTH} characters"
        )));
    }
    Ok(trimmed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::testing;
    use secrecy::SecretString;
    use threefold_platform::auth::JwtConfig;

    fn tokens() -> TokenService {
        TokenService::new(&JwtConfig {
            secret: SecretString::from("N4$eR7!tY0@uI3#oP6%aS9^dF2&gH5*j"),
            ttl: chrono::Duration::minutes(30),
        })
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let pool = testing::pool().await;
        let tokens = tokens();
        let auth = AuthService::new(&pool, &tokens);

        let user = auth
            .register("kim", "Kim@Shop.test", "hunter22", false)
            .await
            .unwrap();
        assert_eq!(user.email.as_str(), "kim@shop.test");

        let (logged_in, token) = auth.login("kim@shop.test", "hunter22").await.unwrap();
        assert_eq!(logged_in.id, user.id);

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.username, "kim");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let pool = testing::pool().await;
        let tokens = tokens();
        let auth = AuthService::new(&pool, &tokens);
        auth.register("lee", "lee@shop.test", "hunter22", false)
            .await
            .unwrap();

        assert!(matches!(
            auth.login("lee@shop.test", "wrong-password").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("ghost@shop.test", "hunter22").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_register_validation() {
        let pool = testing::pool().await;
        let tokens = tokens();
        let auth = AuthService::new(&pool, &tokens);

        assert!(matches!(
            auth.register("  ", "a@b.c", "hunter22", false).await,
            Err(AuthError::InvalidUsername(_))
        ));
        assert!(matches!(
            auth.register("max", "not-an-email", "hunter22", false).await,
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            auth.register("max", "max@shop.test", "short", false).await,
            Err(AuthError::WeakPassword(_))
        ));

        auth.register("max", "max@shop.test", "hunter22", false)
            .await
            .unwrap();
        assert!(matches!(
            auth.register("max", "other@shop.test", "hunter22", false).await,
            Err(AuthError::UserAlreadyExists)
        ));
    }
}
