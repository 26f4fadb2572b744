//! # bunpo-core
//!
//! Domain layer containing entities, value objects, repository traits and the
//! identity provider port. This crate has zero dependencies on infrastructure
//! (database, web framework, HTTP clients).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{LogAction, LogEntry, NewLogEntry, NewUser, User, UserId};
pub use error::DomainError;
pub use traits::{
    IdentityProvider, LogRepository, ProviderProfile, RepoResult, UserRepository,
};
pub use value_objects::{
    mask_email, PageRequest, ReferenceEncoder, ReferenceError, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
