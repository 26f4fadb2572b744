//! Entity to DTO mappers
//!
//! Log entries convert with `From`. User conversions need the reference
//! encoder and can fail, so they are plain constructors.

use bunpo_core::entities::{LogEntry, User};
use bunpo_core::{mask_email, ReferenceEncoder, ReferenceError};

use super::responses::{CurrentUserResponse, LogResponse, UserResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl UserResponse {
    /// Public listing view: opaque reference and masked email
    pub fn from_user(user: &User, encoder: &ReferenceEncoder) -> Result<Self, ReferenceError> {
        Ok(Self {
            reference: encoder.encode(user.id)?,
            email: mask_email(&user.email),
            name: user.name.clone(),
            picture_url: user.picture_url.clone().filter(|url| !url.is_empty()),
            last_login_at: user.last_login_at,
            created_at: user.created_at,
            provider: user.provider.clone(),
        })
    }
}

impl CurrentUserResponse {
    /// Full view for the user who just signed in
    pub fn from_user(user: &User, encoder: &ReferenceEncoder) -> Result<Self, ReferenceError> {
        Ok(Self {
            reference: encoder.encode(user.id)?,
            email: user.email.clone(),
            name: user.name.clone(),
            picture_url: user.picture_url.clone().filter(|url| !url.is_empty()),
            provider: user.provider.clone(),
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        })
    }
}

// ============================================================================
// Log Mappers
// ============================================================================

impl From<LogEntry> for LogResponse {
    fn from(entry: LogEntry) -> Self {
        Self {
            user_name: entry.user_name.unwrap_or_default(),
            action: entry.action,
            detail: entry.detail,
            created_at: entry.created_at,
        }
    }
}
