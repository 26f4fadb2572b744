//! Request DTOs for API endpoints

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Query parameters of the OAuth callback
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackRequest {
    pub code: Option<String>,
    pub state: Option<String>,
}

impl CallbackRequest {
    /// Authorization code, if present and not blank
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

/// Optional logout body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LogoutRequest {
    #[validate(length(max = 500, message = "Detail must be at most 500 characters"))]
    pub detail: Option<String>,
}

impl LogoutRequest {
    /// Detail to record, falling back to the default message
    pub fn detail_or_default(&self) -> &str {
        self.detail
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or("user initiated logout")
    }
}
