//! Log entry database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of `user_logs` joined with the owning user's name
#[derive(Debug, Clone, FromRow)]
pub struct LogEntryModel {
    pub id: i64,
    pub user_id: i64,
    /// NULL when the user row is gone
    pub user_name: Option<String>,
    pub action: String,
    pub detail: String,
    pub created_at: DateTime<Utc>,
}
