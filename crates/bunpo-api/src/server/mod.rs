//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use bunpo_common::{AppConfig, AppError, JwtService};
use bunpo_core::ReferenceEncoder;
use bunpo_db::{create_pool, run_migrations, verify_schema, PgLogRepository, PgUserRepository};
use bunpo_service::{GoogleIdentityProvider, LoginPolicy, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Directory holding the SQL migrations, relative to the working directory
const MIGRATIONS_DIR: &str = "migrations";

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = apply_middleware(create_router(), &state.config().cors);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        info!(dir = MIGRATIONS_DIR, "Running database migrations");
        run_migrations(&pool, Path::new(MIGRATIONS_DIR))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    verify_schema(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let identity_provider =
        GoogleIdentityProvider::new(&config.google).map_err(|e| AppError::Config(e.to_string()))?;
    let reference_encoder = ReferenceEncoder::new(&config.references.salt)
        .map_err(|e| AppError::Config(e.to_string()))?;

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .log_repo(Arc::new(PgLogRepository::new(pool)))
        .identity_provider(Arc::new(identity_provider))
        .jwt_service(Arc::new(JwtService::new(
            &config.jwt.secret,
            config.jwt.ttl_minutes,
        )))
        .reference_encoder(Arc::new(reference_encoder))
        .login_policy(LoginPolicy::new(config.auth.allowed_display_name.clone()))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Serve the application on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address().to_string();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, app).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
