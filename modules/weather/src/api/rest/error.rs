//! Maps domain errors onto the HTTP error contract:
//! `{"error_code": ..., "details": [{"field": ..., "error": ...}]}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::error::DomainError;
use crate::domain::validate::FieldViolation;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorDetail {
    pub field: String,
    pub error: String,
}

impl From<FieldViolation> for ErrorDetail {
    fn from(v: FieldViolation) -> Self {
        Self {
            field: v.field.to_owned(),
            error: v.error,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error_code: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,
}

/// Transport-level error carrying the status and wire body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, error_code: &'static str) -> Self {
        Self {
            status,
            body: ErrorBody {
                error_code,
                details: Vec::new(),
            },
        }
    }

    /// Malformed path id or body.
    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST")
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation { violations } => {
                let mut err = Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                err.body.details = violations.into_iter().map(Into::into).collect();
                err
            }
            DomainError::NotFound { .. } => {
                tracing::debug!(error = %e, "Entity not found");
                Self::new(StatusCode::NOT_FOUND, "NOT_FOUND")
            }
            DomainError::Database { .. } => {
                tracing::error!(error = %e, "Database error occurred");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
