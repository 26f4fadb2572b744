//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, bunpo, health, logs, users};
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .nest("/api", api_routes())
        .merge(bunpo_routes())
        .merge(health_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/google/login", get(auth::google_login))
        .route("/auth/google/callback", get(auth::google_callback))
        .route("/auth/logout", post(auth::logout))
}

/// User and audit log routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/logs", get(logs::list_logs))
        .route("/users/:reference/logs", get(logs::list_user_logs))
}

fn bunpo_routes() -> Router<AppState> {
    Router::new().route("/bunpo/test", get(bunpo::test))
}
