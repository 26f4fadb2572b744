//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use bunpo_core::entities::{NewUser, User, UserId};
use bunpo_core::error::DomainError;
use bunpo_core::traits::{RepoResult, UserRepository};

use crate::mappers::UserInsert;
use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_provider(
        &self,
        provider: &str,
        provider_id: &str,
    ) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, name, provider, provider_id, picture_url, created_at,
                   COALESCE(last_login_at, created_at) AS last_login_at
            FROM users
            WHERE provider = $1 AND provider_id = $2
            LIMIT 1
            ",
        )
        .bind(provider)
        .bind(provider_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, user), fields(provider = %user.provider))]
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let insert = UserInsert::new(user);

        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (email, name, provider, provider_id, picture_url, created_at, last_login_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING id, email, name, provider, provider_id, picture_url, created_at,
                      COALESCE(last_login_at, created_at) AS last_login_at
            ",
        )
        .bind(insert.email)
        .bind(insert.name)
        .bind(insert.provider)
        .bind(insert.provider_id)
        .bind(insert.picture_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::DatabaseError("user already exists for this provider".to_string())
            })
        })?;

        Ok(User::from(model))
    }

    #[instrument(skip(self, picture_url))]
    async fn record_login(&self, id: UserId, picture_url: Option<&str>) -> RepoResult<User> {
        let model = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET last_login_at = NOW(),
                picture_url = CASE
                    WHEN COALESCE(picture_url, '') = '' AND COALESCE($2::TEXT, '') <> '' THEN $2::TEXT
                    ELSE picture_url
                END
            WHERE id = $1
            RETURNING id, email, name, provider, provider_id, picture_url, created_at,
                      COALESCE(last_login_at, created_at) AS last_login_at
            ",
        )
        .bind(id.into_inner())
        .bind(picture_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        model.map(User::from).ok_or_else(|| user_not_found(id))
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, name, provider, provider_id, picture_url, created_at,
                   COALESCE(last_login_at, created_at) AS last_login_at
            FROM users
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }
}
