//! Schema verification and migrations
//!
//! The service refuses to start against a database that is missing the
//! tables or indexes its queries depend on.

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;
use std::path::Path;
use tracing::{info, instrument};

const REQUIRED_TABLES: [&str; 2] = ["users", "user_logs"];
const REQUIRED_INDEXES: [&str; 3] = [
    "users_provider_provider_id_idx",
    "user_logs_user_id_idx",
    "user_logs_created_at_idx",
];

/// Schema check and migration failures
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("{0} table not found; please run database migrations")]
    MissingTable(&'static str),

    #[error("index {0} not found; please run database migrations")]
    MissingIndex(&'static str),

    #[error("schema check failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] MigrateError),
}

/// Check that every table and index the repositories rely on exists
#[instrument(skip(pool))]
pub async fn verify_schema(pool: &PgPool) -> Result<(), SchemaError> {
    for table in REQUIRED_TABLES {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = 'public' AND table_name = $1
            )
            ",
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        if !exists {
            return Err(SchemaError::MissingTable(table));
        }
    }

    for index in REQUIRED_INDEXES {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM pg_indexes
                WHERE schemaname = 'public' AND indexname = $1
            )
            ",
        )
        .bind(index)
        .fetch_one(pool)
        .await?;

        if !exists {
            return Err(SchemaError::MissingIndex(index));
        }
    }

    Ok(())
}

/// Apply the SQL migrations found in `dir`
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &PgPool, dir: &Path) -> Result<(), SchemaError> {
    let migrator = Migrator::new(dir).await?;
    migrator.run(pool).await?;

    info!(migrations = migrator.iter().count(), "Database migrations applied");
    Ok(())
}
