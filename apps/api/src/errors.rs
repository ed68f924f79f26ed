use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::prediction::catalog::UnknownRole;
use crate::prediction::validation::FieldError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid submission: {} field(s) rejected", .0.len())]
    InvalidSubmission(Vec<FieldError>),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(StoreError),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<UnknownRole> for AppError {
    fn from(err: UnknownRole) -> Self {
        AppError::UnknownRole(err.0)
    }
}

/// A stored record naming a role outside the catalog is a configuration
/// problem, not an outage, so it keeps its own error.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownRole(role) => role.into(),
            other => AppError::StoreUnavailable(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::InvalidSubmission(fields) => {
                let body = Json(json!({
                    "error": {
                        "code": "INVALID_SUBMISSION",
                        "message": "Submission is missing or has malformed required fields",
                        "details": fields,
                    }
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::StoreUnavailable(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    "Prediction history is temporarily unavailable, please retry".to_string(),
                )
            }
            AppError::UnknownRole(role) => {
                tracing::error!("Role catalog divergence: unknown role '{role}'");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UNKNOWN_ROLE",
                    "An internal configuration error occurred".to_string(),
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
