//! Authentication service
//!
//! Handles the Google OAuth2 login round trip and logout auditing.

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use tracing::{info, instrument, warn};
use validator::Validate;

use bunpo_core::entities::{LogAction, NewUser, User, UserId};
use bunpo_core::traits::ProviderProfile;
use bunpo_core::DomainError;

use crate::dto::{CallbackRequest, CurrentUserResponse, LoginResponse, LogoutRequest, LogoutResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::log::LogService;

/// Ceiling for the whole provider round trip and user upsert
const LOGIN_TIMEOUT: Duration = Duration::from_secs(10);

const LOGIN_DETAIL: &str = "authenticated via Google OAuth";

/// Generate a random OAuth state value
pub fn generate_state() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Single-account allow-list applied to every login
#[derive(Debug, Clone)]
pub struct LoginPolicy {
    allowed_display_name: String,
}

impl LoginPolicy {
    pub fn new(allowed_display_name: impl Into<String>) -> Self {
        Self {
            allowed_display_name: allowed_display_name.into(),
        }
    }

    pub fn allowed_display_name(&self) -> &str {
        &self.allowed_display_name
    }

    /// Exact, case-sensitive comparison
    pub fn permits(&self, display_name: &str) -> bool {
        display_name == self.allowed_display_name
    }
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Consent screen URL for the given state
    pub fn login_url(&self, state: &str) -> String {
        self.ctx.identity_provider().authorization_url(state)
    }

    /// Check the callback parameters against the state cookie
    ///
    /// Returns the authorization code on success.
    pub fn verify_callback<'r>(
        &self,
        request: &'r CallbackRequest,
        cookie_state: Option<&str>,
    ) -> ServiceResult<&'r str> {
        let code = request
            .code()
            .ok_or_else(|| ServiceError::bad_request("authorization code is required"))?;

        let expected = cookie_state
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ServiceError::bad_request("missing oauth state"))?;

        if request.state.as_deref() != Some(expected) {
            warn!("OAuth callback state mismatch");
            return Err(ServiceError::bad_request("state mismatch"));
        }

        Ok(code)
    }

    /// Exchange the code, upsert the user, audit the login and mint a token
    #[instrument(skip(self, code))]
    pub async fn complete_login(&self, code: &str) -> ServiceResult<LoginResponse> {
        let login = tokio::time::timeout(LOGIN_TIMEOUT, self.login_with_code(code)).await;

        let user = match login {
            Ok(result) => result?,
            Err(_) => {
                warn!("OAuth login timed out");
                return Err(ServiceError::upstream("login timed out"));
            }
        };

        let token = self.ctx.jwt_service().issue(&user)?;
        let user_response = CurrentUserResponse::from_user(&user, self.ctx.reference_encoder())
            .map_err(DomainError::from)?;

        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            token,
            user: user_response,
        })
    }

    async fn login_with_code(&self, code: &str) -> ServiceResult<User> {
        let profile = self.ctx.identity_provider().exchange_code(code).await?;

        let display_name = profile.display_name();
        if !self.ctx.login_policy().permits(display_name) {
            warn!(display_name, "Login refused: account not allowed");
            return Err(DomainError::AccountNotPermitted.into());
        }

        let user = self.find_or_create(&profile).await?;

        let picture = profile.picture.as_deref().filter(|_| user.needs_picture());
        let user = self.ctx.user_repo().record_login(user.id, picture).await?;

        LogService::new(self.ctx)
            .record(user.id, LogAction::Login, LOGIN_DETAIL)
            .await?;

        Ok(user)
    }

    async fn find_or_create(&self, profile: &ProviderProfile) -> ServiceResult<User> {
        let provider = self.ctx.identity_provider().provider_name();

        if let Some(user) = self
            .ctx
            .user_repo()
            .find_by_provider(provider, &profile.provider_id)
            .await?
        {
            if !self.ctx.login_policy().permits(&user.name) {
                warn!(user_id = %user.id, "Login refused: stored name not allowed");
                return Err(DomainError::AccountNotPermitted.into());
            }
            return Ok(user);
        }

        let user = self
            .ctx
            .user_repo()
            .create(&NewUser {
                email: profile.email.clone(),
                name: profile.display_name().to_string(),
                provider: provider.to_string(),
                provider_id: profile.provider_id.clone(),
                picture_url: profile.picture.clone().filter(|p| !p.is_empty()),
            })
            .await?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Record a logout in the audit trail
    #[instrument(skip(self, request))]
    pub async fn logout(
        &self,
        user_id: UserId,
        request: &LogoutRequest,
    ) -> ServiceResult<LogoutResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        LogService::new(self.ctx)
            .record(user_id, LogAction::Logout, request.detail_or_default())
            .await?;

        info!(user_id = %user_id, "User logged out");
        Ok(LogoutResponse::ok())
    }
}
