//! # PAYMILL Configuration
//!
//! Configuration management for the PAYMILL client.
//! The private API key comes from the environment or a TOML file.

use paymill_core::{PaymillError, PaymillResult};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::Path;

/// Production API endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.paymill.com/v2.1";

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// PAYMILL API configuration
#[derive(Clone, Deserialize)]
pub struct PaymillConfig {
    /// Private API key, sent as the basic-auth user name
    pub api_key: String,

    /// API base URL (for testing/mocking)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl PaymillConfig {
    /// Create config with an explicit key and default endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: default_api_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PAYMILL_API_KEY`
    ///
    /// Optional:
    /// - `PAYMILL_API_URL`
    /// - `PAYMILL_TIMEOUT_SECS`
    pub fn from_env() -> PaymillResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_key = env::var("PAYMILL_API_KEY")
            .map_err(|_| PaymillError::Configuration("PAYMILL_API_KEY not set".to_string()))?;

        let mut config = Self::new(api_key);

        if let Ok(url) = env::var("PAYMILL_API_URL") {
            config = config.with_api_base_url(url);
        }

        if let Ok(raw) = env::var("PAYMILL_TIMEOUT_SECS") {
            let secs = raw.trim().parse().map_err(|_| {
                PaymillError::Configuration(format!(
                    "PAYMILL_TIMEOUT_SECS must be a number of seconds, got {:?}",
                    raw
                ))
            })?;
            config = config.with_timeout_secs(secs);
        }

        config.validate()
    }

    /// Parse a TOML document with `api_key` and optional
    /// `api_base_url` / `timeout_secs` keys
    pub fn from_toml_str(content: &str) -> PaymillResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| PaymillError::Configuration(format!("invalid config: {}", e)))?;
        config.validate()
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> PaymillResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PaymillError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Absolute URL for a path relative to the API base
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Reject an empty key or a zero timeout
    pub(crate) fn validate(self) -> PaymillResult<Self> {
        if self.api_key.trim().is_empty() {
            return Err(PaymillError::Configuration(
                "API key must not be empty".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(PaymillError::Configuration(
                "timeout must be at least one second".to_string(),
            ));
        }
        Ok(self)
    }
}

// Keeps the private key out of logs
impl fmt::Debug for PaymillConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymillConfig")
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PaymillConfig::new("key_123");
        assert_eq!(config.api_base_url, "https://api.paymill.com/v2.1");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let config = PaymillConfig::new("k").with_api_base_url("http://localhost:8080/v2.1/");
        assert_eq!(
            config.endpoint("transactions"),
            "http://localhost:8080/v2.1/transactions"
        );
        assert_eq!(
            config.endpoint("/refunds/tran_1"),
            "http://localhost:8080/v2.1/refunds/tran_1"
        );
    }

    #[test]
    fn test_from_toml_str() {
        let config = PaymillConfig::from_toml_str(
            r#"
            api_key = "key_abc"
            timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.api_key, "key_abc");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_from_toml_rejects_bad_input() {
        assert!(matches!(
            PaymillConfig::from_toml_str("timeout_secs = 5"),
            Err(PaymillError::Configuration(_))
        ));
        assert!(matches!(
            PaymillConfig::from_toml_str("api_key = \"  \""),
            Err(PaymillError::Configuration(_))
        ));
        assert!(matches!(
            PaymillConfig::from_toml_str("api_key = \"k\"\ntimeout_secs = 0"),
            Err(PaymillError::Configuration(_))
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", PaymillConfig::new("super_secret"));
        assert!(!rendered.contains("super_secret"));
    }

    #[test]
    fn test_from_toml_file_missing() {
        assert!(matches!(
            PaymillConfig::from_toml_file("/nonexistent/paymill.toml"),
            Err(PaymillError::Configuration(_))
        ));
    }
}
