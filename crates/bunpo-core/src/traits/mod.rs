//! Ports implemented by the infrastructure crates

mod identity;
mod repositories;

pub use identity::{IdentityProvider, ProviderProfile};
pub use repositories::{LogRepository, RepoResult, UserRepository};
