//! Log entry entity <-> model mapper

use bunpo_core::entities::{LogEntry, NewLogEntry, UserId};

use crate::models::LogEntryModel;

impl From<LogEntryModel> for LogEntry {
    fn from(model: LogEntryModel) -> Self {
        LogEntry {
            id: model.id,
            user_id: UserId::new(model.user_id),
            user_name: model.user_name,
            action: model.action,
            detail: model.detail,
            created_at: model.created_at,
        }
    }
}

/// Values for appending a log row
pub struct LogEntryInsert<'a> {
    pub user_id: i64,
    pub action: &'static str,
    pub detail: &'a str,
}

impl<'a> LogEntryInsert<'a> {
    pub fn new(entry: &'a NewLogEntry) -> Self {
        Self {
            user_id: entry.user_id.into_inner(),
            action: entry.action.as_str(),
            detail: &entry.detail,
        }
    }
}
