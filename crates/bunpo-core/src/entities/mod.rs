//! Domain entities - core business objects

mod log_entry;
mod user;

pub use log_entry::{LogAction, LogEntry, NewLogEntry};
pub use user::{NewUser, User, UserId};
