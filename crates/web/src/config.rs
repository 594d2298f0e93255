//! Web application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TAVOLO_GATEWAY_URL` - Deployed script endpoint that owns all
//!   persistence and business rules
//!
//! ## Optional
//! - `TAVOLO_HOST` - Bind address (default: 127.0.0.1)
//! - `TAVOLO_PORT` - Listen port (default: 3000)
//! - `TAVOLO_BASE_URL` - Public URL for the site (default: http://localhost:3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Blocklist of common placeholder patterns (case-insensitive).
///
/// A gateway URL still carrying one of these is a deployment that was never
/// configured; refusing to start beats failing on every action at runtime.
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "your_",
    "changeme",
    "replace",
    "placeholder",
    "script-id",
    "script_id",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "paste",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Gateway endpoint {0} is not configured: {1}")]
    UnconfiguredGateway(String, String),
}

/// Web application configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Deployed gateway endpoint. The URL embeds the script deployment id,
    /// which acts as a bearer capability, so it stays out of Debug output.
    pub gateway_url: SecretString,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("gateway_url", &"[REDACTED]")
            .field("sentry_dsn", &self.sentry_dsn)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the gateway endpoint looks like an unconfigured placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("TAVOLO_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("TAVOLO_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("TAVOLO_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("TAVOLO_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("TAVOLO_BASE_URL", "http://localhost:3000");

        let gateway_url = get_required_env("TAVOLO_GATEWAY_URL")?;
        validate_gateway_url(&gateway_url, "TAVOLO_GATEWAY_URL")?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            base_url,
            gateway_url: SecretString::from(gateway_url),
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// The gateway endpoint as a plain string, for building requests.
    #[must_use]
    pub fn gateway_endpoint(&self) -> &str {
        self.gateway_url.expose_secret()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that the gateway endpoint is a usable http(s) URL and not a
/// placeholder left over from setup.
fn validate_gateway_url(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    let lower = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::UnconfiguredGateway(
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

    #[test]
    fn test_validate_gateway_url_valid() {
        let result = validate_gateway_url(
            "https://script.google.com/macros/s/AKfycbz9q8L1xW/exec",
            "TEST_VAR",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_gateway_url_placeholder() {
        let result = validate_gateway_url(
            "https://script.google.com/macros/s/YOUR_SCRIPT_ID/exec",
            "TEST_VAR",
        );
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::UnconfiguredGateway(_, _)));
    }

    #[test]
    fn test_validate_gateway_url_not_a_url() {
        let result = validate_gateway_url("not a url", "TEST_VAR");
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidEnvVar(_, _)
        ));
    }

    #[test]
    fn test_validate_gateway_url_bad_scheme() {
        let result = validate_gateway_url("ftp://somewhere.net/exec", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            gateway_url: SecretString::from("https://script.google.com/macros/s/AK123/exec"),
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_config_debug_redacts_gateway_url() {
        let config = AppConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            gateway_url: SecretString::from("https://script.google.com/macros/s/AKsecret/exec"),
            sentry_dsn: None,
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("AKsecret"));
    }
}
