//! RPC endpoint configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use stampgate_types::NetworkId;

use crate::ChainError;

/// Where to send block queries for each network.
///
/// An explicit entry in `rpc_urls` wins; otherwise the network id is appended
/// to `rpc_base_url` (`{rpc_base_url}/{network}`), the layout used by
/// multi-chain RPC gateways.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Gateway serving every network under `/{network}`. Empty disables the fallback.
    #[serde(default = "default_rpc_base_url")]
    pub rpc_base_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Per-network endpoint overrides, keyed by network id.
    #[serde(default)]
    pub rpc_urls: BTreeMap<String, String>,
}

fn default_rpc_base_url() -> String {
    "https://rpc.snapshot.org".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl ChainConfig {
    /// A config that only knows the given endpoints.
    pub fn with_endpoints<I, K, V>(endpoints: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            rpc_base_url: String::new(),
            rpc_urls: endpoints
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Resolve the RPC endpoint for `network`.
    pub fn endpoint_for(&self, network: &NetworkId) -> Result<String, ChainError> {
        if let Some(url) = self.rpc_urls.get(network.as_str()) {
            return Ok(url.trim_end_matches('/').to_string());
        }
        // Only plain ids are spliced into the gateway path.
        if self.rpc_base_url.is_empty() || !network.is_valid() {
            return Err(ChainError::UnknownNetwork(network.to_string()));
        }
        Ok(format!("{}/{}", self.rpc_base_url.trim_end_matches('/'), network))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ChainError> {
        let gateway = Some(&self.rpc_base_url).filter(|url| !url.is_empty());
        let urls = gateway.into_iter().chain(self.rpc_urls.values());
        for url in urls {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ChainError::Config(format!(
                    "RPC endpoint must be an http(s) URL, got {url}"
                )));
            }
        }
        if self.request_timeout_ms == 0 {
            return Err(ChainError::Config("request_timeout_ms must be > 0".into()));
        }
        Ok(())
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_base_url: default_rpc_base_url(),
            rpc_urls: BTreeMap::new(),
            request_timeout_ms: default_request_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_gateway() {
        let cfg = ChainConfig::default();
        assert_eq!(
            cfg.endpoint_for(&NetworkId::mainnet()).unwrap(),
            "https://rpc.snapshot.org/1"
        );
    }

    #[test]
    fn test_override_wins() {
        let mut cfg = ChainConfig::default();
        cfg.rpc_urls
            .insert("10".into(), "https://optimism.example/".into());
        assert_eq!(
            cfg.endpoint_for(&NetworkId::new("10")).unwrap(),
            "https://optimism.example"
        );
        assert_eq!(
            cfg.endpoint_for(&NetworkId::new("137")).unwrap(),
            "https://rpc.snapshot.org/137"
        );
    }

    #[test]
    fn test_unknown_network_without_gateway() {
        let cfg = ChainConfig::with_endpoints([("1", "http://localhost:8545")]);
        assert!(cfg.endpoint_for(&NetworkId::mainnet()).is_ok());
        assert!(matches!(
            cfg.endpoint_for(&NetworkId::new("5")),
            Err(ChainError::UnknownNetwork(_))
        ));
    }

    #[test]
    fn test_gateway_rejects_path_like_network_ids() {
        let cfg = ChainConfig::default();
        for id in ["1/../admin", "1?foo=bar", "1#frag", ""] {
            assert!(
                matches!(
                    cfg.endpoint_for(&NetworkId::new(id)),
                    Err(ChainError::UnknownNetwork(_))
                ),
                "{id:?}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_non_http() {
        let cfg = ChainConfig::with_endpoints([("1", "ws://localhost:8546")]);
        assert!(matches!(cfg.validate(), Err(ChainError::Config(_))));
        assert!(ChainConfig::default().validate().is_ok());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let cfg: ChainConfig =
            serde_json::from_str(r#"{"rpc_urls":{"1":"http://localhost:8545"}}"#).unwrap();
        assert_eq!(cfg.rpc_base_url, "https://rpc.snapshot.org");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(10));
    }
}
