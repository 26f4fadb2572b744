//! In-memory fakes shared by the service unit tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;

use bunpo_common::auth::JwtService;
use bunpo_core::entities::{LogEntry, NewLogEntry, NewUser, User, UserId};
use bunpo_core::traits::{IdentityProvider, LogRepository, ProviderProfile, RepoResult, UserRepository};
use bunpo_core::{DomainError, PageRequest, ReferenceEncoder};

use super::auth::LoginPolicy;
use super::context::{ServiceContext, ServiceContextBuilder};

pub const ALLOWED_NAME: &str = "Ada Lovelace";

#[derive(Default)]
pub struct MemoryUsers {
    pub users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_provider(&self, provider: &str, provider_id: &str) -> RepoResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.provider == provider && u.provider_id == provider_id)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let mut users = self.users.lock().unwrap();
        let now = Utc::now();
        let created = User {
            id: UserId::new(users.len() as i64 + 1),
            email: user.email.clone(),
            name: user.name.clone(),
            provider: user.provider.clone(),
            provider_id: user.provider_id.clone(),
            picture_url: user.picture_url.clone(),
            created_at: now,
            last_login_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn record_login(&self, id: UserId, picture_url: Option<&str>) -> RepoResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.last_login_at = Utc::now();
        if user.needs_picture() {
            if let Some(picture) = picture_url.filter(|p| !p.is_empty()) {
                user.picture_url = Some(picture.to_string());
            }
        }
        Ok(user.clone())
    }

    async fn list_all(&self) -> RepoResult<Vec<User>> {
        let mut users = self.users.lock().unwrap().clone();
        users.reverse();
        Ok(users)
    }
}

#[derive(Default)]
pub struct MemoryLogs {
    pub entries: Mutex<Vec<NewLogEntry>>,
}

#[async_trait]
impl LogRepository for MemoryLogs {
    async fn find_page(
        &self,
        page: PageRequest,
        user_id: Option<UserId>,
    ) -> RepoResult<(Vec<LogEntry>, i64)> {
        let entries = self.entries.lock().unwrap();
        let matching: Vec<LogEntry> = entries
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, e)| user_id.map_or(true, |id| e.user_id == id))
            .map(|(i, e)| LogEntry {
                id: i as i64 + 1,
                user_id: e.user_id,
                user_name: Some(format!("user-{}", e.user_id)),
                action: e.action.to_string(),
                detail: e.detail.clone(),
                created_at: Utc::now(),
            })
            .collect();
        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok((items, total))
    }

    async fn create(&self, entry: &NewLogEntry) -> RepoResult<()> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

/// Provider returning a fixed profile, or failing when `profile` is `None`
pub struct StubProvider {
    pub profile: Option<ProviderProfile>,
}

impl StubProvider {
    pub fn returning(name: &str) -> Self {
        Self {
            profile: Some(ProviderProfile {
                provider_id: "g-1".to_string(),
                email: "ada@example.com".to_string(),
                name: Some(name.to_string()),
                given_name: None,
                picture: Some("https://example.com/ada.png".to_string()),
            }),
        }
    }
}

#[async_trait]
impl IdentityProvider for StubProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    fn authorization_url(&self, state: &str) -> String {
        format!("https://accounts.example.com/auth?state={state}")
    }

    async fn exchange_code(&self, _code: &str) -> Result<ProviderProfile, DomainError> {
        self.profile
            .clone()
            .ok_or_else(|| DomainError::ProviderError("token exchange failed".to_string()))
    }
}

pub struct Harness {
    pub users: Arc<MemoryUsers>,
    pub logs: Arc<MemoryLogs>,
    pub ctx: ServiceContext,
}

/// Build a context around the fakes; must run inside a tokio runtime
pub fn harness(provider: StubProvider) -> Harness {
    let users = Arc::new(MemoryUsers::default());
    let logs = Arc::new(MemoryLogs::default());
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/bunpo_unused")
        .unwrap();

    let ctx = ServiceContextBuilder::new()
        .pool(pool)
        .user_repo(users.clone())
        .log_repo(logs.clone())
        .identity_provider(Arc::new(provider))
        .jwt_service(Arc::new(JwtService::new("test-secret", 60)))
        .reference_encoder(Arc::new(ReferenceEncoder::new("test-salt").unwrap()))
        .login_policy(LoginPolicy::new(ALLOWED_NAME))
        .build()
        .unwrap();

    Harness { users, logs, ctx }
}
