use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::modules::kv::KvError;
use crate::shared::types::{ErrorResponse, FieldError};
use crate::shared::validation::flatten_errors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A form submission could not be persisted; the label names the form
    #[error("Intake failed: {label}: {source}")]
    Intake {
        label: &'static str,
        #[source]
        source: KvError,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(flatten_errors(&errors))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg, None)),
            AppError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    details: Some(details),
                    ..ErrorResponse::new("Validation Error", Some("Invalid input data".to_string()))
                },
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Bad Request", Some(msg)),
            ),
            AppError::Intake { label, ref source } => {
                tracing::error!("{} error: {:?}", label, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        format!("Failed to {}", label),
                        Some("Please try again later".to_string()),
                    ),
                )
            }
            AppError::Serialization(ref e) => {
                tracing::error!("Serialization error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Internal Server Error",
                        Some("Something went wrong".to_string()),
                    ),
                )
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Internal Server Error",
                        Some("Something went wrong".to_string()),
                    ),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
