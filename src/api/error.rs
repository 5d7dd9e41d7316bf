//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::helpdesk::HelpdeskError;
use crate::reports::ReportsError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A feature's upstream settings are absent from server configuration
    #[error("The {0} integration is not configured")]
    Unconfigured(&'static str),

    /// Helpdesk upstream error
    #[error("Helpdesk error: {0}")]
    Helpdesk(#[from] HelpdeskError),

    /// Usage/reporting upstream error
    #[error("Reports error: {0}")]
    Reports(ReportsError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ReportsError> for ApiError {
    fn from(e: ReportsError) -> Self {
        match e {
            ReportsError::InvalidMonth(_) => ApiError::Validation(e.to_string()),
            other => ApiError::Reports(other),
        }
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Unconfigured(_) => (StatusCode::SERVICE_UNAVAILABLE, "NOT_CONFIGURED"),
            ApiError::Helpdesk(HelpdeskError::Unavailable) => {
                (StatusCode::SERVICE_UNAVAILABLE, "HELPDESK_UNAVAILABLE")
            }
            ApiError::Helpdesk(_) => (StatusCode::BAD_GATEWAY, "HELPDESK_ERROR"),
            ApiError::Reports(ReportsError::Unavailable) => {
                (StatusCode::SERVICE_UNAVAILABLE, "REPORTS_UNAVAILABLE")
            }
            ApiError::Reports(_) => (StatusCode::BAD_GATEWAY, "REPORTS_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        // Log the error
        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
