//! Audit log handlers

use axum::extract::State;
use bunpo_service::{LogResponse, LogService, PaginatedResponse};

use crate::extractors::{PageQuery, ReferencePath};
use crate::response::{ApiResult, ApiSuccess};
use crate::state::AppState;

const LOGS_MESSAGE: &str = "user logs retrieved successfully";

/// List log entries, optionally filtered by `?reference=`
///
/// GET /api/users/logs
pub async fn list_logs(
    State(state): State<AppState>,
    query: PageQuery,
) -> ApiResult<ApiSuccess<PaginatedResponse<LogResponse>>> {
    let response = LogService::new(state.service_context())
        .list_logs(query.page, query.reference.as_deref())
        .await?;
    Ok(ApiSuccess::ok(LOGS_MESSAGE, response))
}

/// List log entries of one user
///
/// GET /api/users/:reference/logs
pub async fn list_user_logs(
    State(state): State<AppState>,
    ReferencePath(reference): ReferencePath,
    query: PageQuery,
) -> ApiResult<ApiSuccess<PaginatedResponse<LogResponse>>> {
    let response = LogService::new(state.service_context())
        .list_logs(query.page, Some(&reference))
        .await?;
    Ok(ApiSuccess::ok(LOGS_MESSAGE, response))
}
