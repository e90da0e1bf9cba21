//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `KUSHI_API_BASE_URL` - Backend REST API base URL (default: `http://localhost:8080`)
//! - `KUSHI_HTTP_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)
//! - `KUSHI_SERVICES_CACHE_TTL_SECS` - Catalog cache lifetime (default: 300)
//! - `KUSHI_OFFERS_REFRESH_SECS` - Rotating-offers poll interval (default: 15)
//! - `KUSHI_STORAGE_PATH` - Path for the JSON key-value store; in-memory if unset

use std::path::PathBuf;
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

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Backend REST API base URL
    pub api_base_url: Url,
    /// Per-request HTTP timeout
    pub http_timeout: Duration,
    /// How long a fetched catalog snapshot stays cached
    pub services_cache_ttl: Duration,
    /// How often the rotating offers are re-polled
    pub offers_refresh: Duration,
    /// Backing file for durable storage; `None` keeps state in memory
    pub storage_path: Option<PathBuf>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("KUSHI_API_BASE_URL", DEFAULT_API_BASE_URL);
        let api_base_url = Url::parse(&api_base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("KUSHI_API_BASE_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_base_url,
            http_timeout: get_duration_secs("KUSHI_HTTP_TIMEOUT_SECS", 10)?,
            services_cache_ttl: get_duration_secs("KUSHI_SERVICES_CACHE_TTL_SECS", 300)?,
            offers_refresh: get_duration_secs("KUSHI_OFFERS_REFRESH_SECS", 15)?,
            storage_path: get_optional_env("KUSHI_STORAGE_PATH").map(PathBuf::from),
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            // The literal is known-valid.
            #[allow(clippy::unwrap_used)]
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).unwrap(),
            http_timeout: Duration::from_secs(10),
            services_cache_ttl: Duration::from_secs(300),
            offers_refresh: Duration::from_secs(15),
            storage_path: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
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
