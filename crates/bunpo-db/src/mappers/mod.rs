//! Entity to model mappers
//!
//! Conversions between domain entities (bunpo-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database operations

mod log_entry;
mod user;

pub use log_entry::LogEntryInsert;
pub use user::UserInsert;
