use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to extract text from {path}: {reason}")]
    Extraction { path: String, reason: String },

    #[error("No {0} were uploaded")]
    EmptyInput(&'static str),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Similarity scorer error: {0}")]
    Scorer(String),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::UnsupportedFormat(path) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FORMAT",
                format!("Unsupported file format: {path}"),
            ),
            AppError::Extraction { path, reason } => {
                tracing::error!("Extraction failed for {path}: {reason}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_FAILED",
                    format!("Could not extract text from {path}"),
                )
            }
            AppError::EmptyInput(side) => (
                StatusCode::BAD_REQUEST,
                "EMPTY_INPUT",
                format!("No {side} were uploaded"),
            ),
            AppError::Upload(msg) => (StatusCode::BAD_REQUEST, "UPLOAD_ERROR", msg.clone()),
            AppError::Scorer(msg) => {
                tracing::error!("Scorer error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SCORER_ERROR",
                    "A scoring error occurred".to_string(),
                )
            }
            AppError::Csv(e) => {
                tracing::error!("CSV export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "Result export failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
