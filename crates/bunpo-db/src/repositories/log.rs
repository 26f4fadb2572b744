//! PostgreSQL implementation of LogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use bunpo_core::entities::{LogEntry, NewLogEntry, UserId};
use bunpo_core::traits::{LogRepository, RepoResult};
use bunpo_core::value_objects::PageRequest;

use crate::mappers::LogEntryInsert;
use crate::models::LogEntryModel;

use super::error::map_db_error;

/// PostgreSQL implementation of LogRepository
#[derive(Clone)]
pub struct PgLogRepository {
    pool: PgPool,
}

impl PgLogRepository {
    /// Create a new PgLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, user_id: Option<UserId>) -> RepoResult<i64> {
        match user_id {
            Some(user_id) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_logs WHERE user_id = $1")
                    .bind(user_id.into_inner())
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_logs")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(map_db_error)
    }
}

#[async_trait]
impl LogRepository for PgLogRepository {
    #[instrument(skip(self))]
    async fn find_page(
        &self,
        page: PageRequest,
        user_id: Option<UserId>,
    ) -> RepoResult<(Vec<LogEntry>, i64)> {
        let results = match user_id {
            Some(user_id) => {
                sqlx::query_as::<_, LogEntryModel>(
                    r"
                    SELECT l.id, l.user_id, u.name AS user_name, l.action,
                           COALESCE(l.detail, '') AS detail, l.created_at
                    FROM user_logs l
                    LEFT JOIN users u ON u.id = l.user_id
                    WHERE l.user_id = $1
                    ORDER BY l.created_at DESC, l.id DESC
                    LIMIT $2 OFFSET $3
                    ",
                )
                .bind(user_id.into_inner())
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, LogEntryModel>(
                    r"
                    SELECT l.id, l.user_id, u.name AS user_name, l.action,
                           COALESCE(l.detail, '') AS detail, l.created_at
                    FROM user_logs l
                    LEFT JOIN users u ON u.id = l.user_id
                    ORDER BY l.created_at DESC, l.id DESC
                    LIMIT $1 OFFSET $2
                    ",
                )
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        let total = self.count(user_id).await?;

        Ok((results.into_iter().map(LogEntry::from).collect(), total))
    }

    #[instrument(skip(self, entry), fields(user_id = %entry.user_id, action = %entry.action))]
    async fn create(&self, entry: &NewLogEntry) -> RepoResult<()> {
        let insert = LogEntryInsert::new(entry);

        sqlx::query(
            r"
            INSERT INTO user_logs (user_id, action, detail)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(insert.user_id)
        .bind(insert.action)
        .bind(insert.detail)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
