//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFAKE_BASE_DOMAIN` - Domain tenants are served under (e.g., shopifake.com)
//! - `SITES_API_URL` - Base URL of the sites REST service
//!
//! ## Optional
//! - `SHOPIFAKE_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOPIFAKE_PORT` - Listen port (default: 3000)
//! - `SHOPIFAKE_PUBLIC_URL` - Public URL of the main site (default: http://localhost:3000)
//! - `SITES_API_TOKEN` - Bearer token for the sites REST service
//! - `SITES_CACHE_TTL_SECS` - Site lookup cache TTL, 0 disables (default: 30)
//! - `SHOPIFAKE_LOOKUP_WAIT_MS` - How long a page waits for a tenant lookup before
//!   serving the loading page (default: 2000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public URL of the main (non-tenant) site
    pub public_url: String,
    /// Domain tenant subdomains hang off, normalised to lowercase without dots at the ends
    pub base_domain: String,
    /// Sites REST service configuration
    pub sites: SitesApiConfig,
    /// How long a page waits for a tenant lookup before rendering the loading page
    pub lookup_wait: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Sites REST service configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct SitesApiConfig {
    /// Base URL; lookups go to `{url}/sites/slug/{slug}`
    pub url: Url,
    /// Bearer token sent with every request
    pub token: Option<SecretString>,
    /// How long found sites stay cached; zero disables caching
    pub cache_ttl: Duration,
}

impl std::fmt::Debug for SitesApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SitesApiConfig")
            .field("url", &self.url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid, or
    /// if the API token looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SHOPIFAKE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPIFAKE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SHOPIFAKE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPIFAKE_PORT".to_string(), e.to_string()))?;
        let public_url = get_env_or_default("SHOPIFAKE_PUBLIC_URL", "http://localhost:3000");
        let base_domain = normalize_base_domain(&get_required_env("SHOPIFAKE_BASE_DOMAIN")?)
            .ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "SHOPIFAKE_BASE_DOMAIN".to_string(),
                    "must not be empty".to_string(),
                )
            })?;

        let sites = SitesApiConfig::from_env()?;

        let lookup_wait = get_env_or_default("SHOPIFAKE_LOOKUP_WAIT_MS", "2000")
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPIFAKE_LOOKUP_WAIT_MS".to_string(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            public_url,
            base_domain,
            sites,
            lookup_wait,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.public_url.starts_with("https://")
    }
}

impl SitesApiConfig {
    /// Load the sites service settings on their own.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `SITES_API_URL` is missing or invalid, or if
    /// the token looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = Url::parse(&get_required_env("SITES_API_URL")?)
            .map_err(|e| ConfigError::InvalidEnvVar("SITES_API_URL".to_string(), e.to_string()))?;

        let token = get_optional_env("SITES_API_TOKEN")
            .map(|value| {
                validate_not_placeholder(&value, "SITES_API_TOKEN")?;
                Ok(SecretString::from(value))
            })
            .transpose()?;

        let cache_ttl = get_env_or_default("SITES_CACHE_TTL_SECS", "30")
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SITES_CACHE_TTL_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            url,
            token,
            cache_ttl,
        })
    }

    /// Exposes the bearer token for building request headers.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_ref().map(|token| token.expose_secret())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Lowercase and strip surrounding whitespace and dots; `None` when nothing is left.
#[must_use]
pub fn normalize_base_domain(raw: &str) -> Option<String> {
    let domain = raw.trim().trim_matches('.').to_ascii_lowercase();
    (!domain.is_empty()).then_some(domain)
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating an empty value as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reject secrets that look like copy-pasted placeholders.
fn validate_not_placeholder(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            public_url: "http://localhost:3000".to_string(),
            base_domain: "shopifake.com".to_string(),
            sites: SitesApiConfig {
                url: Url::parse("http://localhost:8080").unwrap(),
                token: Some(SecretString::from("s3cr3t-t0k3n-value")),
                cache_ttl: Duration::from_secs(30),
            },
            lookup_wait: Duration::from_secs(2),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    #[test]
    fn test_normalize_base_domain() {
        assert_eq!(
            normalize_base_domain(" .ShopiFake.com. ").as_deref(),
            Some("shopifake.com")
        );
        assert_eq!(normalize_base_domain("..."), None);
        assert_eq!(normalize_base_domain(""), None);
    }

    #[test]
    fn test_placeholder_token_rejected() {
        let result = validate_not_placeholder("your-token-here", "SITES_API_TOKEN");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
        assert!(validate_not_placeholder("a8f3k2m9q1", "SITES_API_TOKEN").is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let addr = sample_config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_is_secure_follows_public_url() {
        let mut config = sample_config();
        assert!(!config.is_secure());
        config.public_url = "https://shopifake.com".to_string();
        assert!(config.is_secure());
    }

    #[test]
    fn test_sites_config_debug_redacts_token() {
        let debug_output = format!("{:?}", sample_config().sites);
        assert!(debug_output.contains("localhost:8080"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("s3cr3t-t0k3n-value"));
    }
}
