//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use std::env;
use url::Url;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub google: GoogleOAuthConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
    pub references: ReferenceConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Deployment environment from `APP_ENV` (after loading `.env`)
    ///
    /// Lets the binary install its log subscriber before the full
    /// configuration is parsed.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        env::var("APP_ENV")
            .ok()
            .and_then(|s| Self::parse(s.trim()))
            .unwrap_or_default()
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    addr: String,
}

impl ServerConfig {
    /// Accepts `host:port` or the bare `:port` form
    #[must_use]
    pub fn new(addr: &str) -> Self {
        let addr = if addr.starts_with(':') {
            format!("{}{addr}", default_host())
        } else {
            addr.to_string()
        };
        Self { addr }
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.addr
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Apply `./migrations` at startup
    pub run_migrations: bool,
}

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish_non_exhaustive()
    }
}

/// Google OAuth2 client configuration
#[derive(Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub scopes: Vec<String>,
}

impl std::fmt::Debug for GoogleOAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleOAuthConfig")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("userinfo_url", &self.userinfo_url)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

/// Login policy and post-login redirects
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// The only display name allowed to sign in
    pub allowed_display_name: String,
    pub success_redirect_url: Option<Url>,
    pub failure_redirect_url: Option<Url>,
    /// Mark the OAuth state cookie `Secure`
    pub secure_cookies: bool,
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Salt for opaque user references
///
/// Falls back to the JWT secret when `USER_REFERENCE_SALT` is unset.
#[derive(Clone)]
pub struct ReferenceConfig {
    pub salt: String,
}

impl std::fmt::Debug for ReferenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceConfig").finish_non_exhaustive()
    }
}

// Default value functions
fn default_app_name() -> String {
    "bunpo-backend".to_string()
}

fn default_host() -> &'static str {
    "0.0.0.0"
}

fn default_http_addr() -> String {
    format!("{}:8080", default_host())
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_token_ttl_minutes() -> i64 {
    60
}

/// Longest accepted token lifetime (one year)
const MAX_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 365;

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const GOOGLE_SCOPES: [&str; 3] = [
    "https://www.googleapis.com/auth/userinfo.email",
    "https://www.googleapis.com/auth/userinfo.profile",
    "openid",
];

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| get(key).ok_or(ConfigError::MissingVar(key));

        let env = get("APP_ENV")
            .and_then(|s| Environment::parse(&s))
            .unwrap_or_default();

        let jwt_secret = required("JWT_SECRET")?;

        Ok(Self {
            app: AppSettings {
                name: get("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            server: ServerConfig::new(&get("APP_HTTP_ADDR").unwrap_or_else(default_http_addr)),
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parse_or(
                    "DATABASE_MAX_CONNECTIONS",
                    get("DATABASE_MAX_CONNECTIONS"),
                    default_max_connections(),
                )?,
                min_connections: parse_or(
                    "DATABASE_MIN_CONNECTIONS",
                    get("DATABASE_MIN_CONNECTIONS"),
                    default_min_connections(),
                )?,
                run_migrations: parse_bool(
                    "DATABASE_RUN_MIGRATIONS",
                    get("DATABASE_RUN_MIGRATIONS"),
                )?,
            },
            jwt: JwtConfig {
                ttl_minutes: token_ttl_minutes(get("JWT_TOKEN_TTL_MINUTES")),
                secret: jwt_secret.clone(),
            },
            google: GoogleOAuthConfig {
                client_id: required("GOOGLE_CLIENT_ID")?,
                client_secret: required("GOOGLE_CLIENT_SECRET")?,
                redirect_uri: required("GOOGLE_REDIRECT_URI")?,
                auth_url: get("GOOGLE_AUTH_URL").unwrap_or_else(|| GOOGLE_AUTH_URL.to_string()),
                token_url: get("GOOGLE_TOKEN_URL").unwrap_or_else(|| GOOGLE_TOKEN_URL.to_string()),
                userinfo_url: get("GOOGLE_USERINFO_URL")
                    .unwrap_or_else(|| GOOGLE_USERINFO_URL.to_string()),
                scopes: GOOGLE_SCOPES.iter().map(ToString::to_string).collect(),
            },
            auth: AuthConfig {
                allowed_display_name: required("AUTH_ALLOWED_DISPLAY_NAME")?,
                success_redirect_url: parse_url(
                    "AUTH_SUCCESS_REDIRECT_URL",
                    get("AUTH_SUCCESS_REDIRECT_URL"),
                )?,
                failure_redirect_url: parse_url(
                    "AUTH_FAILURE_REDIRECT_URL",
                    get("AUTH_FAILURE_REDIRECT_URL"),
                )?,
                secure_cookies: env.is_production(),
            },
            cors: CorsConfig {
                allowed_origins: get("APP_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect::<Vec<_>>()
                    })
                    .filter(|origins| !origins.is_empty())
                    .unwrap_or_else(default_allowed_origins),
            },
            references: ReferenceConfig {
                salt: get("USER_REFERENCE_SALT").unwrap_or(jwt_secret),
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default),
    }
}

fn parse_bool(key: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::to_lowercase).as_deref() {
        None => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(ConfigError::InvalidValue(key, other.to_string())),
    }
}

fn parse_url(key: &'static str, value: Option<String>) -> Result<Option<Url>, ConfigError> {
    value
        .map(|raw| Url::parse(&raw).map_err(|e| ConfigError::InvalidValue(key, e.to_string())))
        .transpose()
}

/// Token lifetime; a bad value is not fatal
fn token_ttl_minutes(value: Option<String>) -> i64 {
    let Some(raw) = value else {
        return default_token_ttl_minutes();
    };

    match raw.parse::<i64>() {
        Ok(minutes) if (1..=MAX_TOKEN_TTL_MINUTES).contains(&minutes) => minutes,
        _ => {
            tracing::warn!(
                value = %raw,
                default = default_token_ttl_minutes(),
                "Invalid JWT_TOKEN_TTL_MINUTES, using default"
            );
            default_token_ttl_minutes()
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
