//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Numeric user ids
//! never appear here; users are identified by their opaque reference.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bunpo_core::PageRequest;

// ============================================================================
// Common Response Types
// ============================================================================

/// Page of items with offset pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, page: PageRequest, total_items: i64) -> Self {
        Self {
            items,
            meta: PaginationMeta::new(page, total_items),
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(page: PageRequest, total_items: i64) -> Self {
        Self {
            page: page.page(),
            page_size: page.page_size(),
            total_items,
            total_pages: page.total_pages(total_items),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// The signed-in user, returned after login
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub reference: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    pub provider: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

/// Successful OAuth login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: CurrentUserResponse,
}

/// Acknowledgement of a recorded logout
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub status: &'static str,
}

impl LogoutResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Public listing entry for a user
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub reference: String,
    /// Masked email
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    pub last_login_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub provider: String,
}

/// All users plus their count
#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub count: usize,
}

impl UserListResponse {
    pub fn new(users: Vec<UserResponse>) -> Self {
        Self {
            count: users.len(),
            users,
        }
    }
}

// ============================================================================
// Log Responses
// ============================================================================

/// Audit log entry as listed
#[derive(Debug, Clone, Serialize)]
pub struct LogResponse {
    /// Empty when the user no longer exists
    pub user_name: String,
    pub action: String,
    pub detail: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Bunpo Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BunpoResponse {
    pub message: String,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION"),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
