//! API error types and conversions

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ffdash_core::{FilterError, IngestError, StoreError};
use serde::Serialize;
use thiserror::Error;

/// Message returned for any upload that could not be ingested
pub const UPLOAD_FAILED: &str = "Error processing file";

/// API error type that converts to HTTP responses
#[derive(Debug, Error)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("{0}")]
    BadRequest(String),
    /// 413 Payload Too Large
    #[error("{0}")]
    PayloadTooLarge(String),
    /// 500 Internal Server Error
    #[error("{0}")]
    Internal(String),
}

/// Error body: `{"error": "..."}`
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        // Log errors at appropriate levels
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), %message, "API error");
        } else {
            tracing::debug!(status = status.as_u16(), %message, "API client error");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        if err.is_input_error() {
            tracing::warn!(error = %err, "Rejected uploaded workbook");
        } else {
            tracing::error!(error = %err, "Error processing uploaded workbook");
        }
        ApiError::Internal(UPLOAD_FAILED.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::PayloadTooLarge("x".into()).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_filter_error_is_bad_request() {
        let err = ApiError::from(FilterError::InvalidYear("abc".into()));
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "invalid year filter: abc"));
    }

    #[test]
    fn test_ingest_error_hides_detail() {
        let err = ApiError::from(IngestError::WorkbookParse("zip header".into()));
        assert!(matches!(err, ApiError::Internal(ref m) if m == UPLOAD_FAILED));
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::BadRequest("No file uploaded".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "No file uploaded" }));
    }
}
