//! Service context - dependency container for services
//!
//! Holds the repositories, the identity provider and the token/reference
//! helpers needed by services.

use std::sync::Arc;

use bunpo_common::auth::JwtService;
use bunpo_core::traits::{IdentityProvider, LogRepository, UserRepository};
use bunpo_core::ReferenceEncoder;
use bunpo_db::PgPool;

use super::auth::LoginPolicy;
use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The OAuth identity provider
/// - JWT service for authentication
/// - Reference encoder for public user ids
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    log_repo: Arc<dyn LogRepository>,

    // External identity
    identity_provider: Arc<dyn IdentityProvider>,

    // Helpers
    jwt_service: Arc<JwtService>,
    reference_encoder: Arc<ReferenceEncoder>,
    login_policy: Arc<LoginPolicy>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: PgPool,
        user_repo: Arc<dyn UserRepository>,
        log_repo: Arc<dyn LogRepository>,
        identity_provider: Arc<dyn IdentityProvider>,
        jwt_service: Arc<JwtService>,
        reference_encoder: Arc<ReferenceEncoder>,
        login_policy: Arc<LoginPolicy>,
    ) -> Self {
        Self {
            pool,
            user_repo,
            log_repo,
            identity_provider,
            jwt_service,
            reference_encoder,
            login_policy,
        }
    }

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the log repository
    pub fn log_repo(&self) -> &dyn LogRepository {
        self.log_repo.as_ref()
    }

    /// Get the OAuth identity provider
    pub fn identity_provider(&self) -> &dyn IdentityProvider {
        self.identity_provider.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the user reference encoder
    pub fn reference_encoder(&self) -> &ReferenceEncoder {
        self.reference_encoder.as_ref()
    }

    /// Get the login allow-list policy
    pub fn login_policy(&self) -> &LoginPolicy {
        self.login_policy.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("identity_provider", &self.identity_provider.provider_name())
            .field("jwt_service", &self.jwt_service)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    log_repo: Option<Arc<dyn LogRepository>>,
    identity_provider: Option<Arc<dyn IdentityProvider>>,
    jwt_service: Option<Arc<JwtService>>,
    reference_encoder: Option<Arc<ReferenceEncoder>>,
    login_policy: Option<Arc<LoginPolicy>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn log_repo(mut self, repo: Arc<dyn LogRepository>) -> Self {
        self.log_repo = Some(repo);
        self
    }

    pub fn identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity_provider = Some(provider);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn reference_encoder(mut self, encoder: Arc<ReferenceEncoder>) -> Self {
        self.reference_encoder = Some(encoder);
        self
    }

    pub fn login_policy(mut self, policy: LoginPolicy) -> Self {
        self.login_policy = Some(Arc::new(policy));
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext::new(
            required(self.pool, "pool")?,
            required(self.user_repo, "user_repo")?,
            required(self.log_repo, "log_repo")?,
            required(self.identity_provider, "identity_provider")?,
            required(self.jwt_service, "jwt_service")?,
            required(self.reference_encoder, "reference_encoder")?,
            required(self.login_policy, "login_policy")?,
        ))
    }
}
