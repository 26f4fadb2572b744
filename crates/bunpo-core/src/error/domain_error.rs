//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::UserId;
use crate::value_objects::ReferenceError;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("invalid user reference")]
    InvalidReference,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("unauthorize")]
    AccountNotPermitted,

    // =========================================================================
    // Upstream Errors
    // =========================================================================
    #[error("Identity provider error: {0}")]
    ProviderError(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidReference => "INVALID_REFERENCE",
            Self::AccountNotPermitted => "UNAUTHORIZE",
            Self::ProviderError(_) => "PROVIDER_ERROR",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidReference)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::AccountNotPermitted)
    }

    /// Check if the failure came from the identity provider
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::ProviderError(_))
    }
}

impl From<ReferenceError> for DomainError {
    fn from(err: ReferenceError) -> Self {
        match err {
            ReferenceError::Malformed => Self::InvalidReference,
            other => Self::InternalError(other.to_string()),
        }
    }
}
