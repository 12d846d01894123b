//! Response bodies shared by every service.
//!
//! Errors render as `{"detail": "<reason>"}` and simple acknowledgements as
//! `{"message": "<text>"}`. The [`JsonBody`], [`QueryParams`] and
//! [`PathParam`] extractors wrap axum's own so malformed input gets the same
//! body shape as every other error.

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Acknowledgement body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

/// Render an error response with a `detail` body.
#[must_use]
pub fn detail(status: StatusCode, detail: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            detail: detail.into(),
        }),
    )
        .into_response()
}

/// Build a `{"message": ...}` JSON body.
#[must_use]
pub fn message(text: impl Into<String>) -> Json<Message> {
    Json(Message {
        message: text.into(),
    })
}

/// Rejected request input (bad JSON, query string or path segment).
#[derive(Debug)]
pub struct InputRejection {
    status: StatusCode,
    detail: String,
}

impl IntoResponse for InputRejection {
    fn into_response(self) -> Response {
        detail(self.status, self.detail)
    }
}

impl From<JsonRejection> for InputRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for InputRejection {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for InputRejection {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

/// `axum::Json` with a `{"detail"}` rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(InputRejection))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Query` with a `{"detail"}` rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(InputRejection))]
pub struct QueryParams<T>(pub T);

/// `axum::extract::Path` with a `{"detail"}` rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(InputRejection))]
pub struct PathParam<T>(pub T);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_detail_body_shape() {
        let response = detail(StatusCode::NOT_FOUND, "Item not found");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"detail": "Item not found"}));
    }

    #[tokio::test]
    async fn test_bad_query_renders_detail() {
        use axum::{Router, body::Body, http::Request, routing::get};
        use tower::ServiceExt;

        #[derive(Deserialize)]
        struct Params {
            id: i64,
        }

        let app = Router::new().route(
            "/",
            get(|QueryParams(params): QueryParams<Params>| async move { params.id.to_string() }),
        );

        let response = app
            .oneshot(Request::get("/?id=abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["detail"].as_str().unwrap().contains("id"));
    }

    #[test]
    fn test_message_body_shape() {
        let Json(body) = message("Cart updated");
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({"message": "Cart updated"})
        );
    }
}
