//! User handlers

use axum::extract::State;
use bunpo_service::{UserListResponse, UserService};

use crate::response::{ApiResult, ApiSuccess};
use crate::state::AppState;

/// List all users
///
/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<ApiSuccess<UserListResponse>> {
    let response = UserService::new(state.service_context()).list_users().await?;
    Ok(ApiSuccess::ok("users retrieved successfully", response))
}
