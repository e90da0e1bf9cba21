//! Admin dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ADMIN_API_BASE_URL` - Admin REST API base URL; falls back to
//!   `KUSHI_API_BASE_URL`, then `http://localhost:8080`
//! - `ADMIN_HTTP_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin dashboard configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Admin REST API base URL
    pub api_base_url: Url,
    /// Per-request HTTP timeout
    pub http_timeout: Duration,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present. The
    /// dashboard usually talks to the same backend as the storefront, so the
    /// base URL falls back to `KUSHI_API_BASE_URL` when no admin-specific
    /// override is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_optional_env("ADMIN_API_BASE_URL")
            .or_else(|| get_optional_env("KUSHI_API_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = Url::parse(&api_base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("ADMIN_API_BASE_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_base_url,
            http_timeout: get_duration_secs("ADMIN_HTTP_TIMEOUT_SECS", 10)?,
        })
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            // The literal is known-valid.
            #[allow(clippy::unwrap_used)]
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).unwrap(),
            http_timeout: Duration::from_secs(10),
        }
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get a duration, in whole seconds, with a default.
fn get_duration_secs(key: &str, default: u64) -> Result<Duration, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdminConfig::default();
        assert_eq!(config.api_base_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.http_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_duration_fallback() {
        assert_eq!(
            get_duration_secs("ADMIN_TEST_UNSET_DURATION", 9).unwrap(),
            Duration::from_secs(9)
        );
    }
}
