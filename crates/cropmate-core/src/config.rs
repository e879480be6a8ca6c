//! Client configuration.

use serde::{Deserialize, Serialize};

/// Base URL used when no configuration file or environment override exists.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Request timeout applied to every dispatch, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for talking to the advisory service.
///
/// Loaded from `config.toml` under the config directory; every field has a
/// default so a missing or partial file still yields a working client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the advisory REST API, without a trailing slash.
    pub api_base_url: String,
    /// Per-request timeout in seconds. Timeouts are classified as
    /// "cannot connect".
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: ClientConfig =
            toml::from_str("api_base_url = \"https://advisory.example/api\"").unwrap();
        assert_eq!(config.api_base_url, "https://advisory.example/api");
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
