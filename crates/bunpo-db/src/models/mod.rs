//! Database models - SQLx-compatible structs for PostgreSQL tables

mod log_entry;
mod user;

pub use log_entry::LogEntryModel;
pub use user::UserModel;
