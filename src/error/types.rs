//! API error types

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::UpstreamError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Body could not be read, e.g. it exceeds the size limit
    #[error(transparent)]
    BodyRejected(#[from] BytesRejection),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::BodyRejected(rejection) => rejection.status(),
            ApiError::Upstream(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Upstream(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::MethodNotAllowed => ErrorResponse {
                error: "Method not allowed",
                message: None,
            },
            ApiError::BodyRejected(rejection) => ErrorResponse {
                error: "Invalid request body",
                message: Some(rejection.body_text()),
            },
            ApiError::Upstream(e) if e.is_timeout() => ErrorResponse {
                error: "Upstream timeout",
                message: Some(self.to_string()),
            },
            ApiError::Upstream(_) | ApiError::Internal(_) => ErrorResponse {
                error: "Internal server error",
                message: Some(self.to_string()),
            },
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::Upstream;
    use axum::body::{to_bytes, Body, Bytes};
    use axum::extract::FromRequest;
    use serde_json::{json, Value};
    use std::time::Duration;

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_method_not_allowed_body() {
        let (status, body) = render(ApiError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({"error": "Method not allowed"}));
    }

    #[tokio::test]
    async fn test_oversized_body_uses_json_envelope() {
        let request = axum::http::Request::builder()
            .body(Body::from(vec![b'a'; 3 * 1024 * 1024]))
            .unwrap();
        let rejection = Bytes::from_request(request, &()).await.unwrap_err();

        let (status, body) = render(ApiError::from(rejection)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "Invalid request body");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_upstream_status_is_not_leaked() {
        let err = ApiError::from(UpstreamError::Status {
            upstream: Upstream::OpenAi,
            status: 429,
        });
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Internal server error", "message": "OpenAI error: 429"})
        );
    }

    #[tokio::test]
    async fn test_timeout_is_distinct() {
        let err = ApiError::from(UpstreamError::Timeout {
            upstream: Upstream::Replicate,
            after: Duration::from_secs(60),
        });
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["error"], "Upstream timeout");
        assert_eq!(body["message"], "Replicate did not respond within 60s");
    }

    #[tokio::test]
    async fn test_internal_error_message() {
        let (status, body) = render(ApiError::Internal(anyhow::anyhow!("boom"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "boom");
    }
}
