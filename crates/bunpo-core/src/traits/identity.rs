//! Identity provider port

use async_trait::async_trait;

use crate::error::DomainError;

/// Profile returned by an identity provider after a successful code exchange
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderProfile {
    /// Stable subject id at the provider
    pub provider_id: String,
    pub email: String,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub picture: Option<String>,
}

impl ProviderProfile {
    /// Name shown for the account
    ///
    /// Falls back from the full name to the given name, then to the email.
    pub fn display_name(&self) -> &str {
        [self.name.as_deref(), self.given_name.as_deref()]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .unwrap_or(self.email.as_str())
    }
}

/// OAuth2 authorization-code identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Provider name stored on user rows (e.g. `google`)
    fn provider_name(&self) -> &str;

    /// Consent screen URL carrying the given state value
    fn authorization_url(&self, state: &str) -> String;

    /// Exchange an authorization code for the user's profile
    async fn exchange_code(&self, code: &str) -> Result<ProviderProfile, DomainError>;
}
