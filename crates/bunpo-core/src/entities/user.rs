//! User entity - an account created through an OAuth provider

use chrono::{DateTime, Utc};
use std::fmt;

/// Database identifier of a user
///
/// Never exposed as-is through the public API; see
/// [`ReferenceEncoder`](crate::value_objects::ReferenceEncoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Persisted user account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub provider: String,
    pub provider_id: String,
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

impl User {
    /// Whether the stored picture is missing and should be backfilled
    pub fn needs_picture(&self) -> bool {
        self.picture_url.as_deref().map_or(true, str::is_empty)
    }
}

/// Values for creating a user on first login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub provider: String,
    pub provider_id: String,
    pub picture_url: Option<String>,
}
