//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{LogEntry, NewLogEntry, NewUser, User, UserId};
use crate::error::DomainError;
use crate::value_objects::PageRequest;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by provider name and the provider's subject id
    async fn find_by_provider(&self, provider: &str, provider_id: &str)
        -> RepoResult<Option<User>>;

    /// Create a new user, returning the stored row
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Stamp `last_login_at` and fill in the picture when the stored one is empty
    async fn record_login(&self, id: UserId, picture_url: Option<&str>) -> RepoResult<User>;

    /// List all users, newest first
    async fn list_all(&self) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Log Repository
// ============================================================================

#[async_trait]
pub trait LogRepository: Send + Sync {
    /// Fetch a page of log entries, newest first, plus the total count
    async fn find_page(
        &self,
        page: PageRequest,
        user_id: Option<UserId>,
    ) -> RepoResult<(Vec<LogEntry>, i64)>;

    /// Append a log entry
    async fn create(&self, entry: &NewLogEntry) -> RepoResult<()>;
}
