//! Bearer token extractor.
//!
//! [`BearerClaims`] only proves the token is authentic. Services wrap it in
//! their own `CurrentUser` extractor that also loads the user row.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, HeaderValue, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};

use super::{Claims, TokenService};
use crate::http::detail;

/// Verified claims of the request's bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn whoami(BearerClaims(claims): BearerClaims) -> String {
///     claims.username
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BearerClaims(pub Claims);

/// Why a request failed bearer authentication. Both render as 401 with a
/// `WWW-Authenticate: Bearer` challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearerRejection {
    /// No `Authorization: Bearer` header.
    Missing,
    /// Token present but invalid, expired, or for an unknown user.
    Invalid,
}

impl BearerRejection {
    /// Client-facing reason.
    #[must_use]
    pub const fn detail(self) -> &'static str {
        match self {
            Self::Missing => "Not authenticated",
            Self::Invalid => "Could not validate credentials",
        }
    }
}

impl IntoResponse for BearerRejection {
    fn into_response(self) -> Response {
        let mut response = detail(StatusCode::UNAUTHORIZED, self.detail());
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        response
    }
}

impl<S> FromRequestParts<S> for BearerClaims
where
    TokenService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BearerRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(BearerRejection::Missing)?;

        TokenService::from_ref(state)
            .verify(token)
            .map(Self)
            .map_err(|err| {
                tracing::debug!(error = %err, "bearer token rejected");
                BearerRejection::Invalid
            })
    }
}

/// Pull the token out of `Authorization: Bearer <token>`. The scheme is
/// matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use axum::{Router, body::Body, http::Request, routing::get};
    use secrecy::SecretString;
    use threefold_core::UserId;
    use tower::ServiceExt;

    fn tokens() -> TokenService {
        TokenService::new(&JwtConfig {
            secret: SecretString::from("u7&Hj2!Lq9@Zx4#Wc8$Rv1%Tb6^Np3*M"),
            ttl: chrono::Duration::minutes(5),
        })
    }

    fn app(tokens: TokenService) -> Router {
        Router::new()
            .route(
                "/me",
                get(|BearerClaims(claims): BearerClaims| async move { claims.username }),
            )
            .with_state(tokens)
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer xyz"));
        assert_eq!(bearer_token(&headers), Some("xyz"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[tokio::test]
    async fn test_valid_token_passes() {
        let tokens = tokens();
        let token = tokens.issue(UserId::new(3), "carol").unwrap();

        let response = app(tokens)
            .oneshot(
                Request::get("/me")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"carol");
    }

    #[tokio::test]
    async fn test_missing_header_is_401_with_challenge() {
        let response = app(tokens())
            .oneshot(Request::get("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "Not authenticated");
    }

    #[tokio::test]
    async fn test_bad_token_is_401() {
        let response = app(tokens())
            .oneshot(
                Request::get("/me")
                    .header("authorization", "Bearer forged")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "Could not validate credentials");
    }
}
