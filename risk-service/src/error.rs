//! Error handling
//!
//! Three caller-visible classes: not ready (retry later), malformed request
//! (do not retry), contract violation (operator must fix the artifacts).

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use pregnancy_risk_core::{ErrorKind, PredictError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Model not ready")]
    NotReady,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Contract violation: {0}")]
    ContractViolation(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::NotReady => (StatusCode::SERVICE_UNAVAILABLE, "Model not loaded, retry later"),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::ContractViolation(msg) => {
                tracing::error!("Prediction contract violation: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed: model artifacts are inconsistent")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        match err.kind() {
            ErrorKind::NotReady => AppError::NotReady,
            ErrorKind::ContractViolation => AppError::ContractViolation(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
