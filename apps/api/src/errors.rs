use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::processing::store::StoreError;
use crate::processing::ProcessingError;
use crate::scoring::ScoringError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::ApplicationNotFound(_) | ProcessingError::JobNotFound { .. } => {
                AppError::NotFound(err.to_string())
            }
            ProcessingError::Store(e) => AppError::Store(e),
        }
    }
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::InvalidWeights(_) => AppError::Validation(err.to_string()),
            ScoringError::Unavailable(_) => AppError::Internal(err.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_ERROR",
                    "A storage error occurred".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_processing_errors_map_to_status() {
        let missing: AppError = ProcessingError::ApplicationNotFound(Uuid::nil()).into();
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let store: AppError =
            ProcessingError::Store(StoreError::Unavailable("offline".into())).into();
        assert_eq!(store.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);

        let invalid = AppError::Validation("bad".into());
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_scoring_errors_map_to_status() {
        let weights: AppError = ScoringError::InvalidWeights("negative".into()).into();
        assert_eq!(weights.into_response().status(), StatusCode::BAD_REQUEST);

        let offline: AppError = ScoringError::Unavailable("model offline".into()).into();
        assert_eq!(offline.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
