//! Google OAuth2 authorization-code provider

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use bunpo_common::config::GoogleOAuthConfig;
use bunpo_core::traits::{IdentityProvider, ProviderProfile};
use bunpo_core::DomainError;

const PROVIDER_NAME: &str = "google";
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    id: String,
    #[serde(default)]
    email: String,
    name: Option<String>,
    given_name: Option<String>,
    picture: Option<String>,
}

impl From<GoogleUserInfo> for ProviderProfile {
    fn from(info: GoogleUserInfo) -> Self {
        Self {
            provider_id: info.id,
            email: info.email,
            name: info.name,
            given_name: info.given_name,
            picture: info.picture,
        }
    }
}

/// Google identity provider backed by `reqwest`
#[derive(Clone)]
pub struct GoogleIdentityProvider {
    client: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: Url,
    token_url: String,
    userinfo_url: String,
    scopes: String,
}

impl GoogleIdentityProvider {
    /// Create a provider from configuration
    ///
    /// # Errors
    /// Returns an error if the authorization URL is invalid or the HTTP
    /// client cannot be built
    pub fn new(config: &GoogleOAuthConfig) -> Result<Self, DomainError> {
        let auth_url = Url::parse(&config.auth_url).map_err(|e| {
            DomainError::InternalError(format!("invalid Google auth url: {e}"))
        })?;

        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| DomainError::InternalError(format!("http client: {e}")))?;

        Ok(Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            auth_url,
            token_url: config.token_url.clone(),
            userinfo_url: config.userinfo_url.clone(),
            scopes: config.scopes.join(" "),
        })
    }

    async fn fetch_access_token(&self, code: &str) -> Result<String, DomainError> {
        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::ProviderError(format!("token exchange failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::ProviderError(format!(
                "token exchange returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            DomainError::ProviderError(format!("token response parse failed: {e}"))
        })?;

        Ok(token.access_token)
    }

    async fn fetch_userinfo(&self, access_token: &str) -> Result<GoogleUserInfo, DomainError> {
        let response = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| DomainError::ProviderError(format!("userinfo fetch failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(DomainError::ProviderError(format!(
                "userinfo returned {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::ProviderError(format!("userinfo parse failed: {e}")))
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }

    fn authorization_url(&self, state: &str) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.scopes)
            .append_pair("state", state)
            .append_pair("access_type", "offline")
            .append_pair("prompt", "select_account")
            .append_pair("include_granted_scopes", "true");
        url.into()
    }

    #[instrument(skip(self, code))]
    async fn exchange_code(&self, code: &str) -> Result<ProviderProfile, DomainError> {
        let access_token = self.fetch_access_token(code).await?;
        let info = self.fetch_userinfo(&access_token).await?;
        debug!(provider_id = %info.id, "Fetched Google profile");
        Ok(info.into())
    }
}
