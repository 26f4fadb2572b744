//! Audit log entry - append-only record of a user action

use chrono::{DateTime, Utc};
use std::fmt;

use super::user::UserId;

/// Actions recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogAction {
    Login,
    Logout,
}

impl LogAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
        }
    }
}

impl fmt::Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored log entry joined with its owner's display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: i64,
    pub user_id: UserId,
    /// `None` when the owning user no longer exists
    pub user_name: Option<String>,
    pub action: String,
    pub detail: String,
    pub created_at: DateTime<Utc>,
}

/// Values for appending a log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLogEntry {
    pub user_id: UserId,
    pub action: LogAction,
    pub detail: String,
}

impl NewLogEntry {
    pub fn new(user_id: UserId, action: LogAction, detail: impl Into<String>) -> Self {
        Self {
            user_id,
            action,
            detail: detail.into(),
        }
    }
}
