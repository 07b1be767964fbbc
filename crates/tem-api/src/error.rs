//! # Application Error
//!
//! Maps domain errors to structured HTTP responses with proper status
//! codes and error bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use tem_engine::EngineError;
use tem_quota::QuotaError;

/// Application-level error type that maps to HTTP responses.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// The request conflicts with current state (e.g., deciding a
    /// transfer twice, or approving one the balance no longer covers).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({
            "error": {
                "code": status.as_u16(),
                "message": self.to_string(),
            }
        });
        (status, axum::Json(body)).into_response()
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::VesselNotFound(_)
            | EngineError::LandingNotFound(_)
            | EngineError::NoCalculation(_) => AppError::NotFound(err.to_string()),
            EngineError::LandingSuperseded(_) => AppError::Conflict(err.to_string()),
            EngineError::Validation(_) => AppError::Validation(err.to_string()),
            EngineError::Store(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<QuotaError> for AppError {
    fn from(err: QuotaError) -> Self {
        match err {
            QuotaError::UnknownBalance { .. } | QuotaError::TransferNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            QuotaError::InsufficientQuota { .. } | QuotaError::InvalidTransition { .. } => {
                AppError::Conflict(err.to_string())
            }
            QuotaError::SelfTransfer | QuotaError::Validation(_) => {
                AppError::Validation(err.to_string())
            }
        }
    }
}
