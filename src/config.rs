//! API client configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

pub const BASE_URL_ENV: &str = "STUDIO_API_BASE_URL";
pub const TIMEOUT_MS_ENV: &str = "STUDIO_API_TIMEOUT_MS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base URL must start with http:// or https://: {0}")]
    InvalidBaseUrl(String),
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

/// Where the backend lives and how long a single request may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned(), timeout_ms: DEFAULT_TIMEOUT_MS }
    }
}

impl ApiConfig {
    /// Config for an explicit base URL with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, timeout_ms: DEFAULT_TIMEOUT_MS })
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `STUDIO_API_BASE_URL`: default `http://localhost:8000/api`
    /// - `STUDIO_API_TIMEOUT_MS`: default 5000; unparsable values fall back
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the base URL is not http(s) or the timeout is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let timeout_ms = env_parse_u64(TIMEOUT_MS_ENV, DEFAULT_TIMEOUT_MS);
        Self::new(&base_url)?.with_timeout_ms(timeout_ms)
    }

    /// Replace the request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] for a zero timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Result<Self, ConfigError> {
        if timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        self.timeout_ms = timeout_ms;
        Ok(self)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
