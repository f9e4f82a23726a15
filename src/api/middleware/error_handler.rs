//! Error responses for the API.
//!
//! `AppError` renders as `{"error": <message>}` with its mapped status.
//! [`global_error_handler`] rewrites non-JSON error responses produced
//! outside the handlers (unknown route, wrong method, timeout) into the same
//! envelope.

use axum::{
    Json,
    extract::Request,
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Storage { operation, source } = &self {
            tracing::error!(operation = %operation, error = %source, "Storage operation failed");
        }

        let status = self.status_code();
        (status, Json(ErrorResponse::new(self.public_message()))).into_response()
    }
}

/// Message used when an error response carries no envelope of its own,
/// e.g. `"method not allowed"` for 405.
pub fn envelope_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_lowercase)
        .unwrap_or_else(|| format!("http error {}", status.as_u16()))
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Gives every 4xx/5xx response the JSON error envelope.
///
/// Responses that are already JSON pass through untouched. Others keep
/// their status and headers (such as `Allow` on 405) but get a new body.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) || is_json(&response) {
        return response;
    }

    let (mut parts, _body) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    let envelope = Json(ErrorResponse::new(envelope_message(status)));
    (parts, envelope).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreOperation;
    use crate::repositories::StoreError;
    use axum::{Router, body::Body, middleware, routing::get};
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_client_error_envelope() {
        let response = AppError::InvalidIdentifier.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(is_json(&response));
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "id must be an integer"})
        );
    }

    #[tokio::test]
    async fn test_storage_error_hides_cause() {
        let error = AppError::from_store(
            StoreOperation::Update,
            StoreError::Database {
                operation: "update user".to_string(),
                source: anyhow::anyhow!("password=hunter2 connection refused"),
            },
        );

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({"error": "failed to update user"}));
    }

    #[test]
    fn test_envelope_message() {
        assert_eq!(envelope_message(StatusCode::NOT_FOUND), "not found");
        assert_eq!(
            envelope_message(StatusCode::METHOD_NOT_ALLOWED),
            "method not allowed"
        );
        assert_eq!(
            envelope_message(StatusCode::REQUEST_TIMEOUT),
            "request timeout"
        );
        assert_eq!(
            envelope_message(StatusCode::from_u16(599).unwrap()),
            "http error 599"
        );
    }

    fn app() -> Router {
        Router::new()
            .route("/plain", get(|| async { (StatusCode::CONFLICT, "plain text") }))
            .route("/ok", get(|| async { "fine" }))
            .route(
                "/json",
                get(|| async { AppError::MissingIdentifier }),
            )
            .layer(middleware::from_fn(global_error_handler))
    }

    async fn call(method: &str, uri: &str) -> Response {
        app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_rewrites_plain_errors() {
        let response = call("GET", "/plain").await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await, serde_json::json!({"error": "conflict"}));
    }

    #[tokio::test]
    async fn test_rewrites_unknown_route_and_method() {
        let response = call("GET", "/missing").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, serde_json::json!({"error": "not found"}));

        let response = call("POST", "/ok").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(response.headers().contains_key(header::ALLOW));
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "method not allowed"})
        );
    }

    #[tokio::test]
    async fn test_keeps_existing_envelope_and_success() {
        let response = call("GET", "/json").await;
        assert_eq!(body_json(response).await, serde_json::json!({"error": "id is required"}));

        let response = call("GET", "/ok").await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
