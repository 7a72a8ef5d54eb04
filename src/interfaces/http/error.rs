//! HTTP error responses
//!
//! Every failure leaves the API as `{"error": "...", "details": ...}` with
//! the status code fixed by the variant.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required parameters")]
    MissingParameters,

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Unauthorized, API key missing or incorrect")]
    MissingApiKey,

    #[error("Unauthorized, invalid API key")]
    InvalidApiKey,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Request timed out")]
    RequestTimeout,

    #[error("Internal server error")]
    Internal,
}

/// Error body returned by every endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    fn new(error: &str, details: Option<String>) -> Self {
        Self {
            error: error.to_string(),
            details,
        }
    }
}

impl ApiError {
    pub fn invalid(details: impl Into<String>) -> Self {
        Self::InvalidParameters(details.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameters | Self::InvalidParameters(_) => StatusCode::BAD_REQUEST,
            Self::MissingApiKey | Self::InvalidApiKey => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self) -> ErrorBody {
        match self {
            Self::MissingParameters => ErrorBody::new("Missing required parameters", None),
            Self::InvalidParameters(details) => ErrorBody::new("Invalid parameters", Some(details)),
            Self::MissingApiKey => {
                ErrorBody::new("Unauthorized, API key missing or incorrect", None)
            }
            Self::InvalidApiKey => ErrorBody::new("Unauthorized, invalid API key", None),
            Self::NotFound(details) => ErrorBody::new("Not found", Some(details)),
            Self::Conflict(details) => {
                ErrorBody::new("Cabins already booked for these dates", Some(details))
            }
            Self::RequestTimeout => ErrorBody::new("Request timed out", None),
            Self::Internal => ErrorBody::new("Internal server error", None),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(self.body())).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let transient = err.is_transient();
        match err {
            DomainError::NotFound { .. } => Self::NotFound(err.to_string()),
            DomainError::Validation(msg) => Self::InvalidParameters(msg),
            DomainError::Conflict(msg) => Self::Conflict(msg),
            DomainError::Database(e) => {
                error!(error = %e, transient, "Database failure");
                Self::Internal
            }
        }
    }
}
