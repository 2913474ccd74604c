//! Client configuration, loadable from a TOML file.

use crate::error::ClientError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Configuration for a `LedgerClient`.
///
/// File settings are the base; callers override fields after loading.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the ledger node's JSON-RPC endpoint.
    pub node_url: String,
    /// How long to wait for a submitted transaction to confirm before
    /// giving up with `ClientError::ConfirmationTimeout`.
    pub confirmation_timeout_secs: u64,
    /// Interval between confirmation polls.
    pub poll_interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            node_url: "http://127.0.0.1:9741".to_string(),
            confirmation_timeout_secs: 60,
            poll_interval_ms: 500,
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ClientError::Config(format!("failed to read config file: {e}")))?;
        toml::from_str(&contents)
            .map_err(|e| ClientError::Config(format!("failed to parse config file: {e}")))
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.confirmation_timeout_secs, 60);
        assert_eq!(config.poll_interval_ms, 500);
        assert!(config.node_url.starts_with("http://"));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: ClientConfig = toml::from_str(r#"node_url = "http://10.0.0.5:9741""#).unwrap();
        assert_eq!(config.node_url, "http://10.0.0.5:9741");
        assert_eq!(config.confirmation_timeout_secs, 60);
    }

    #[test]
    fn full_toml() {
        let config: ClientConfig = toml::from_str(
            r#"
            node_url = "http://10.0.0.5:9741"
            confirmation_timeout_secs = 5
            poll_interval_ms = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.confirmation_timeout(), Duration::from_secs(5));
        assert_eq!(config.poll_interval(), Duration::from_millis(50));
    }
}
