//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CART_API_URL` - Base URL of the catalog/stock API (default: `http://localhost:3333`)
//! - `CART_STORAGE_PATH` - File backing the persisted store (default: `cart-storage.json`)
//! - `CART_STORAGE_KEY` - Key the cart is stored under (default: `@RocketShoes:cart`)
//! - `CART_REQUEST_TIMEOUT_SECS` - Timeout for each API request (default: 10)
//! - `CART_CHANNEL_CAPACITY` - Request queue size of the cart actor (default: 32)

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use crate::storage::DEFAULT_CART_KEY;

const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_STORAGE_PATH: &str = "cart-storage.json";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Base URL for `/products/{id}` and `/stock/{id}`
    pub api_url: Url,
    /// File holding the key-value store
    pub storage_path: PathBuf,
    /// Key the cart is stored under
    pub storage_key: String,
    /// Per-request timeout for API calls
    pub request_timeout: Duration,
    /// Capacity of the cart actor's request channel
    pub channel_capacity: usize,
}

impl CartConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment, a map in tests).
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = parse_url(
            "CART_API_URL",
            &lookup("CART_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        )?;

        let storage_path = lookup("CART_STORAGE_PATH")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);

        let storage_key = match lookup("CART_STORAGE_KEY") {
            Some(key) if key.trim().is_empty() => {
                return Err(invalid("CART_STORAGE_KEY", "must not be empty"));
            }
            Some(key) => key,
            None => DEFAULT_CART_KEY.to_string(),
        };

        let request_timeout = match lookup("CART_REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_positive("CART_REQUEST_TIMEOUT_SECS", &raw)?),
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let channel_capacity = match lookup("CART_CHANNEL_CAPACITY") {
            Some(raw) => usize::try_from(parse_positive("CART_CHANNEL_CAPACITY", &raw)?)
                .map_err(|e| invalid("CART_CHANNEL_CAPACITY", e))?,
            None => DEFAULT_CHANNEL_CAPACITY,
        };

        Ok(Self {
            api_url,
            storage_path,
            storage_key,
            request_timeout,
            channel_capacity,
        })
    }
}

fn invalid(key: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.to_string())
}

fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| invalid(key, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(key, "must be an http(s) URL"));
    }
    Ok(url)
}

fn parse_positive(key: &str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid(key, "must be greater than zero")),
        Ok(value) => Ok(value),
        Err(e) => Err(invalid(key, e)),
    }
}
