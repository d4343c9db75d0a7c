use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::extract::ExtractionError;
use crate::analysis::validation::ValidationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only request-level problems live here. AI and persistence failures are absorbed
/// inside the pipeline and never reach the HTTP layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Could not read document: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::InvalidInput(e) => {
                let code = match e {
                    ValidationError::InvalidDocumentType { .. } => "INVALID_DOCUMENT_TYPE",
                    ValidationError::InsufficientContent { .. } => "INSUFFICIENT_CONTENT",
                };
                (StatusCode::BAD_REQUEST, code, e.to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Multipart(e) => (e.status(), "MALFORMED_MULTIPART", e.body_text()),
            AppError::Extraction(e) => {
                tracing::warn!("Document extraction failed: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNREADABLE_DOCUMENT",
                    "The uploaded PDF could not be read".to_string(),
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

        // `detail` mirrors `error.message` for clients that read the flat field.
        let body = Json(json!({
            "detail": message,
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
