//! HS256 access tokens.
//!
//! A token carries the user's id in `sub`, the username, and `iat`/`exp`
//! timestamps. Signing parameters come from an explicit [`JwtConfig`] rather
//! than process-wide constants, so each service (and each test) can use its
//! own secret and lifetime.

use std::fmt;
use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use threefold_core::UserId;

use super::TokenError;
use crate::config::{ConfigError, parse_env, validated_secret};

/// Default access token lifetime in minutes.
pub const DEFAULT_TTL_MINUTES: i64 = 30;

/// Token signing configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC signing secret
    pub secret: SecretString,
    /// Lifetime of issued tokens
    pub ttl: Duration,
}

impl JwtConfig {
    /// Read `<prefix>_JWT_SECRET` and `<prefix>_TOKEN_TTL_MINUTES`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the secret is missing or weak, or the TTL is
    /// not a positive number of minutes.
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let secret_key = format!("{prefix}_JWT_SECRET");
        let ttl_key = format!("{prefix}_TOKEN_TTL_MINUTES");

        let secret = validated_secret(&secret_key)?;
        let minutes: i64 = parse_env(&ttl_key, DEFAULT_TTL_MINUTES)?;
        if minutes <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                ttl_key,
                "must be a positive number of minutes".to_string(),
            ));
        }
        let ttl = Duration::try_minutes(minutes).ok_or_else(|| {
            ConfigError::InvalidEnvVar(ttl_key, "out of range".to_string())
        })?;

        Ok(Self { secret, ttl })
    }
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a decimal string.
    pub sub: String,
    pub username: String,
    /// Issued at (seconds since the epoch).
    pub iat: i64,
    /// Expiry (seconds since the epoch).
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into a [`UserId`].
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` if `sub` is not an integer.
    pub fn user_id(&self) -> Result<UserId, TokenError> {
        self.sub
            .parse::<i64>()
            .map(UserId::new)
            .map_err(|_| TokenError::Invalid)
    }
}

/// Issues and verifies access tokens.
///
/// Cheap to clone; the keys live behind an `Arc`.
#[derive(Clone)]
pub struct TokenService {
    inner: Arc<TokenKeys>,
}

struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Build a token service from its configuration.
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();
        Self {
            inner: Arc::new(TokenKeys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
                validation: Validation::new(Algorithm::HS256),
                ttl: config.ttl,
            }),
        }
    }

    /// Lifetime of tokens issued by this service.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Issue a signed token for a user.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encode` if signing fails.
    pub fn issue(&self, user_id: UserId, username: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_owned(),
            iat: now.timestamp(),
            exp: (now + self.inner.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.inner.encoding)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` for expired tokens and
    /// `TokenError::Invalid` for anything else that fails validation.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.inner.decoding, &self.inner.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;

        // A token whose subject is not a user id is as good as forged.
        data.claims.user_id()?;
        Ok(data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("keys", &"[REDACTED]")
            .field("ttl", &self.inner.ttl)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service(secret: &str, ttl: Duration) -> TokenService {
        TokenService::new(&JwtConfig {
            secret: SecretString::from(secret),
            ttl,
        })
    }

    #[test]
    fn test_issue_then_verify() {
        let tokens = service("k3#Vd9!pQ2@xZ7$mR4%tY8^wB1&nC6*e", Duration::minutes(30));
        let token = tokens.issue(UserId::new(42), "alice").unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.user_id().unwrap(), UserId::new(42));
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_expired_token_rejected() {
        // Beyond the default 60s validation leeway.
        let tokens = service("k3#Vd9!pQ2@xZ7$mR4%tY8^wB1&nC6*e", Duration::minutes(-5));
        let token = tokens.issue(UserId::new(1), "bob").unwrap();

        assert_eq!(tokens.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = service("k3#Vd9!pQ2@xZ7$mR4%tY8^wB1&nC6*e", Duration::minutes(30));
        let verifier = service("a different signing key 0987654321", Duration::minutes(30));
        let token = issuer.issue(UserId::new(1), "bob").unwrap();

        assert_eq!(verifier.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_rejected() {
        let tokens = service("k3#Vd9!pQ2@xZ7$mR4%tY8^wB1&nC6*e", Duration::minutes(30));
        assert_eq!(tokens.verify("not.a.jwt"), Err(TokenError::Invalid));
        assert_eq!(tokens.verify(""), Err(TokenError::Invalid));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let tokens = service("k3#Vd9!pQ2@xZ7$mR4%tY8^wB1&nC6*e", Duration::minutes(30));
        let debug = format!("{tokens:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("k3#Vd9"));
    }
}
