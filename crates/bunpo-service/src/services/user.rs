//! User service
//!
//! Lists accounts with masked emails and opaque references.

use tracing::instrument;

use bunpo_core::DomainError;

use crate::dto::{UserListResponse, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All users, newest first
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> ServiceResult<UserListResponse> {
        let users = self.ctx.user_repo().list_all().await?;
        let encoder = self.ctx.reference_encoder();

        let users = users
            .iter()
            .map(|user| UserResponse::from_user(user, encoder))
            .collect::<Result<Vec<_>, _>>()
            .map_err(DomainError::from)?;

        Ok(UserListResponse::new(users))
    }
}
