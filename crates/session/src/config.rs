//! Session controller configuration.
//!
//! # Environment Variables
//!
//! ## Required
//! - `VERDANT_API_URL` - Base URL of the Verdant backend (e.g., `https://api.verdant.shop`)
//!
//! ## Optional
//! - `VERDANT_REQUEST_TIMEOUT_SECS` - Per-request timeout in seconds (default: 8)

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default per-request timeout, after which a call is treated as a failure.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Session controller configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the backend API.
    pub api_base: Url,
    /// Timeout applied to every backend request.
    pub request_timeout: Duration,
}

impl SessionConfig {
    /// Create a configuration with the default request timeout.
    #[must_use]
    pub const fn new(api_base: Url) -> Self {
        Self {
            api_base,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `VERDANT_API_URL` is missing or not a valid
    /// URL, or if the timeout override does not parse as an integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base = get_required_env("VERDANT_API_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("VERDANT_API_URL".to_string(), e.to_string())
            })?;

        let request_timeout = match get_optional_env("VERDANT_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "VERDANT_REQUEST_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self {
            api_base,
            request_timeout,
        })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
