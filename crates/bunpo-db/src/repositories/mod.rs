//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in bunpo-core.

mod error;
mod log;
mod user;

pub use log::PgLogRepository;
pub use user::PgUserRepository;
