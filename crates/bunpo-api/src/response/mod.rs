//! Response types and error handling for API endpoints
//!
//! Every JSON body uses the same envelope:
//! `{ "status", "message", "data"?, "errors"? }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bunpo_common::AppError;
use bunpo_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("missing authorization header")]
    MissingAuth,
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Service(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MissingAuth => StatusCode::UNAUTHORIZED,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::MissingAuth => "MISSING_AUTHORIZATION",
        }
    }

    /// Create a bad request error shown as-is
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Message safe to return to clients
    fn public_message(&self, status: StatusCode) -> String {
        match status {
            StatusCode::BAD_GATEWAY => "failed to reach identity provider".to_string(),
            s if s.is_server_error() => "internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Envelope status field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// Response envelope shared by all endpoints
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: EnvelopeStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorDetail>,
}

/// Error detail for API responses
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().to_string();
        let message = self.public_message(status);

        // Log server errors
        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        // Build details for validation errors
        let details = if let Self::Validation(errors) = &self {
            Some(serde_json::to_value(errors).unwrap_or_default())
        } else {
            None
        };

        let body: Envelope<()> = Envelope {
            status: EnvelopeStatus::Error,
            message,
            data: None,
            errors: Some(ErrorDetail { code, details }),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Successful response wrapped in the envelope
pub struct ApiSuccess<T> {
    status: StatusCode,
    message: &'static str,
    data: T,
}

impl<T> ApiSuccess<T> {
    /// 200 OK with a message and data
    pub fn ok(message: &'static str, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            message,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        let body = Envelope {
            status: EnvelopeStatus::Success,
            message: self.message.to_string(),
            data: Some(self.data),
            errors: None,
        };
        (self.status, Json(body)).into_response()
    }
}
