//! Audit log service

use tracing::instrument;

use bunpo_core::entities::{LogAction, NewLogEntry, UserId};
use bunpo_core::{DomainError, PageRequest};

use crate::dto::{LogResponse, PaginatedResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Audit log service
pub struct LogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LogService<'a> {
    /// Create a new LogService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// A page of log entries, optionally for the user behind `reference`
    #[instrument(skip(self))]
    pub async fn list_logs(
        &self,
        page: PageRequest,
        reference: Option<&str>,
    ) -> ServiceResult<PaginatedResponse<LogResponse>> {
        let user_id = reference
            .map(|r| self.ctx.reference_encoder().decode(r))
            .transpose()
            .map_err(DomainError::from)?;

        let (entries, total) = self.ctx.log_repo().find_page(page, user_id).await?;
        let items = entries.into_iter().map(LogResponse::from).collect();

        Ok(PaginatedResponse::new(items, page, total))
    }

    /// Append an entry to the audit trail
    #[instrument(skip(self, detail))]
    pub async fn record(
        &self,
        user_id: UserId,
        action: LogAction,
        detail: impl Into<String>,
    ) -> ServiceResult<()> {
        self.ctx
            .log_repo()
            .create(&NewLogEntry::new(user_id, action, detail))
            .await?;
        Ok(())
    }
}
