use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::submission::store::StoreError;

/// Message reported alongside every server-side failure.
pub const SUBMIT_FAILED: &str = "Error submitting form";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client-caused; rendered as `400 {error}`.
    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => {
                tracing::warn!("Rejected submission: {msg}");
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                server_error(e.to_string())
            }
            AppError::Persistence(e) => {
                tracing::error!("Persistence error: {e}");
                server_error(e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                server_error(e.to_string())
            }
        };

        (status, Json(body)).into_response()
    }
}

fn server_error(details: String) -> (StatusCode, serde_json::Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": SUBMIT_FAILED, "details": details }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_renders_bad_request() {
        let (status, body) = render(AppError::Validation("All fields are required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "All fields are required" }));
    }

    #[tokio::test]
    async fn test_persistence_renders_details() {
        let (status, body) = render(AppError::Persistence(StoreError::Unavailable)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], SUBMIT_FAILED);
        assert_eq!(body["details"], "database connection is not available");
    }

    #[tokio::test]
    async fn test_storage_renders_details() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume");
        let (status, body) = render(AppError::Storage(io)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["details"], "read-only volume");
    }
}
