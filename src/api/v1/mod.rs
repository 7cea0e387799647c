//! V1 API handlers.

mod categories;
mod posts;
mod seed;
mod system;


pub use categories::*;
pub use posts::*;
pub use seed::*;
pub use system::*;

use axum::{Json, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use crate::blog::{BlogError, FieldError};

/// Field-level validation failure
#[derive(Debug, Serialize, ToSchema)]
pub struct FieldErrorResponse {
    #[schema(example = "category_ids")]
    pub field: String,
    #[schema(example = "Select at least one category")]
    pub message: String,
}

impl From<FieldError> for FieldErrorResponse {
    fn from(e: FieldError) -> Self {
        Self {
            field: e.field,
            message: e.message,
        }
    }
}

/// Error response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Post not found: hello-world")]
    pub error: String,
    /// Per-field details for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldErrorResponse>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a blog error to its HTTP status and body.
pub fn error_response(e: BlogError) -> ApiError {
    match e {
        BlogError::Validation(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(errors.0.into_iter().map(FieldErrorResponse::from).collect()),
            }),
        ),
        BlogError::NotFound { .. } => (StatusCode::NOT_FOUND, Json(ErrorResponse::new(e.to_string()))),
        BlogError::Conflict { .. } => (StatusCode::CONFLICT, Json(ErrorResponse::new(e.to_string()))),
        BlogError::Backend { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string())),
        ),
    }
}
