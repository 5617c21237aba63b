//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MINIMART_API_BASE_URL` - Base URL of the REST backend
//!   (default: `http://localhost:3000/api`)
//! - `MINIMART_REQUEST_TIMEOUT_SECS` - Per-request timeout in seconds
//!   (default: 10)

use std::sync::LazyLock;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

static DEFAULT_BASE_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_API_BASE_URL).expect("default base URL is valid"));

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the REST backend (e.g. `http://localhost:3000/api`).
    pub api_base_url: Url,
    /// Timeout applied to each backend request.
    pub request_timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults suitable for local
    /// development against the stock backend.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but does
    /// not parse (malformed URL, non-numeric timeout).
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = match std::env::var("MINIMART_API_BASE_URL") {
            Ok(raw) => Url::parse(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("MINIMART_API_BASE_URL".to_string(), e.to_string())
            })?,
            Err(_) => DEFAULT_BASE_URL.clone(),
        };

        let request_timeout = match std::env::var("MINIMART_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ConfigError::InvalidEnvVar(
                        "MINIMART_REQUEST_TIMEOUT_SECS".to_string(),
                        format!("expected an integer, got {raw:?}"),
                    )
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            api_base_url,
            request_timeout,
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.clone(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}
