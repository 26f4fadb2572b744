//! # bunpo-service
//!
//! Application layer containing business logic, services, DTOs and the
//! Google OAuth2 identity provider.

pub mod dto;
pub mod oauth;
pub mod services;

pub use dto::{
    BunpoResponse, CallbackRequest, CurrentUserResponse, HealthResponse, LogResponse,
    LoginResponse, LogoutRequest, LogoutResponse, PaginatedResponse, PaginationMeta,
    ReadinessResponse, UserListResponse, UserResponse,
};
pub use oauth::GoogleIdentityProvider;
pub use services::{
    generate_state, AuthService, BunpoService, LogService, LoginPolicy, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
