//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STOREFRONT_CHANNEL_CAPACITY` - Request queue size of each store (default: 32)
//! - `STOREFRONT_CATALOG_DELAY_MS` - Simulated catalog latency (default: 500)
//! - `STOREFRONT_AUTH_DELAY_MS` - Simulated identity provider latency (default: 0)
//! - `STOREFRONT_CHECKOUT_DELAY_MS` - Simulated order submission latency (default: 2000)

use std::time::Duration;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Capacity of each store's request channel
    pub channel_capacity: usize,
    pub catalog_delay: Duration,
    pub auth_delay: Duration,
    pub checkout_delay: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            catalog_delay: Duration::from_millis(500),
            auth_delay: Duration::ZERO,
            checkout_delay: Duration::from_millis(2000),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but is not a valid number.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let channel_capacity = match lookup("STOREFRONT_CHANNEL_CAPACITY") {
            Some(raw) => parse_capacity("STOREFRONT_CHANNEL_CAPACITY", &raw)?,
            None => defaults.channel_capacity,
        };
        Ok(Self {
            channel_capacity,
            catalog_delay: get_delay(&lookup, "STOREFRONT_CATALOG_DELAY_MS", defaults.catalog_delay)?,
            auth_delay: get_delay(&lookup, "STOREFRONT_AUTH_DELAY_MS", defaults.auth_delay)?,
            checkout_delay: get_delay(
                &lookup,
                "STOREFRONT_CHECKOUT_DELAY_MS",
                defaults.checkout_delay,
            )?,
        })
    }

    /// No simulated latency anywhere. Used by tests.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            catalog_delay: Duration::ZERO,
            auth_delay: Duration::ZERO,
            checkout_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

fn parse_capacity(key: &str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be at least 1".to_string(),
        )),
        Ok(capacity) => Ok(capacity),
        Err(e) => Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}

fn get_delay(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
