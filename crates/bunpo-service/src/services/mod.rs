//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of a
//! request and orchestrates repository calls.

pub mod auth;
pub mod bunpo;
pub mod context;
pub mod error;
pub mod log;
pub mod user;

// Re-export all services for convenience
pub use auth::{generate_state, AuthService, LoginPolicy};
pub use bunpo::BunpoService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use log::LogService;
pub use user::UserService;

#[cfg(test)]
mod testing;
