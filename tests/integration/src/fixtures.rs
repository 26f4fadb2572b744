//! Test fixtures: in-memory repositories and a fake Google OAuth server

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use bunpo_core::entities::{LogEntry, NewLogEntry, NewUser, User, UserId};
use bunpo_core::traits::{LogRepository, RepoResult, UserRepository};
use bunpo_core::{DomainError, PageRequest};
use chrono::Utc;
use serde_json::json;
use tokio::net::TcpListener;

/// Authorization code the fake provider accepts
pub const GOOD_CODE: &str = "good-code";

const ACCESS_TOKEN: &str = "fake-access-token";

// ============================================================================
// In-memory repositories
// ============================================================================

/// User store keyed by insertion order
#[derive(Default)]
pub struct MemoryUsers {
    users: Mutex<Vec<User>>,
}

impl MemoryUsers {
    pub fn snapshot(&self) -> Vec<User> {
        self.users.lock().map(|u| u.clone()).unwrap_or_default()
    }

    fn name_of(&self, id: UserId) -> Option<String> {
        self.snapshot().into_iter().find(|u| u.id == id).map(|u| u.name)
    }
}

fn poisoned<T>(_: T) -> DomainError {
    DomainError::DatabaseError("lock poisoned".to_string())
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_provider(&self, provider: &str, provider_id: &str) -> RepoResult<Option<User>> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users
            .iter()
            .find(|u| u.provider == provider && u.provider_id == provider_id)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let mut users = self.users.lock().map_err(poisoned)?;
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
        let mut users = self.users.lock().map_err(poisoned)?;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.last_login_at = Utc::now();
        if user.needs_picture() {
            user.picture_url = picture_url.filter(|p| !p.is_empty()).map(String::from);
        }
        Ok(user.clone())
    }

    async fn list_all(&self) -> RepoResult<Vec<User>> {
        let mut users = self.users.lock().map_err(poisoned)?.clone();
        users.reverse();
        Ok(users)
    }
}

/// Log store that joins user names like the SQL query does
pub struct MemoryLogs {
    users: Arc<MemoryUsers>,
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogs {
    pub fn new(users: Arc<MemoryUsers>) -> Self {
        Self {
            users,
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LogRepository for MemoryLogs {
    async fn find_page(
        &self,
        page: PageRequest,
        user_id: Option<UserId>,
    ) -> RepoResult<(Vec<LogEntry>, i64)> {
        let entries = self.entries.lock().map_err(poisoned)?.clone();
        let matching: Vec<LogEntry> = entries
            .into_iter()
            .rev()
            .filter(|e| user_id.map_or(true, |id| e.user_id == id))
            .map(|mut e| {
                e.user_name = self.users.name_of(e.user_id);
                e
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
        let mut entries = self.entries.lock().map_err(poisoned)?;
        let id = entries.len() as i64 + 1;
        entries.push(LogEntry {
            id,
            user_id: entry.user_id,
            user_name: None,
            action: entry.action.to_string(),
            detail: entry.detail.clone(),
            created_at: Utc::now(),
        });
        Ok(())
    }
}

// ============================================================================
// Fake Google
// ============================================================================

/// Profile the fake provider hands out
#[derive(Debug, Clone)]
pub struct FakeProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

impl FakeProfile {
    pub fn named(name: &str) -> Self {
        Self {
            id: "google-1001".to_string(),
            email: "ada.lovelace@example.com".to_string(),
            name: name.to_string(),
            picture: Some("https://example.com/ada.png".to_string()),
        }
    }
}

/// Running fake Google OAuth server
pub struct FakeGoogle {
    pub addr: SocketAddr,
}

impl FakeGoogle {
    pub async fn start(profile: FakeProfile) -> Result<Self> {
        let app = Router::new()
            .route("/token", post(token))
            .route("/userinfo", get(userinfo))
            .with_state(Arc::new(profile));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self { addr })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

async fn token(Form(form): Form<HashMap<String, String>>) -> Response {
    let valid = form.get("grant_type").map(String::as_str) == Some("authorization_code")
        && form.get("code").map(String::as_str) == Some(GOOD_CODE);

    if !valid {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "invalid_grant" }))).into_response();
    }

    Json(json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3599,
    }))
    .into_response()
}

async fn userinfo(State(profile): State<Arc<FakeProfile>>, headers: HeaderMap) -> Response {
    let expected = format!("Bearer {ACCESS_TOKEN}");
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str());

    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    Json(json!({
        "id": profile.id,
        "email": profile.email,
        "verified_email": true,
        "name": profile.name,
        "given_name": profile.name.split(' ').next(),
        "picture": profile.picture,
    }))
    .into_response()
}
