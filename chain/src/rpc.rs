//! Ethereum JSON-RPC block provider.
//!
//! Sends `eth_getBlockByNumber(block, false)` to the network's endpoint and
//! reads the header `timestamp` (hex-encoded seconds).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use stampgate_types::{BlockRef, NetworkId, Timestamp};
use tracing::debug;

use crate::{BlockProvider, ChainConfig, ChainError};

/// JSON-RPC request envelope.
#[derive(Debug, Serialize)]
struct RpcRequest {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: serde_json::Value,
}

/// JSON-RPC response envelope. `result` is `null` for unknown blocks.
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<BlockHeader>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// The subset of the block object we read.
#[derive(Debug, Deserialize)]
struct BlockHeader {
    timestamp: String,
}

/// Parse a `0x`-prefixed hex quantity.
pub fn parse_hex_quantity(s: &str) -> Result<u64, ChainError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| ChainError::InvalidResponse(format!("quantity without 0x prefix: {s}")))?;
    if digits.is_empty() {
        return Err(ChainError::InvalidResponse("empty hex quantity".into()));
    }
    u64::from_str_radix(digits, 16)
        .map_err(|e| ChainError::InvalidResponse(format!("bad hex quantity {s}: {e}")))
}

/// HTTP JSON-RPC client resolving block timestamps.
pub struct RpcBlockClient {
    /// Reusable HTTP client.
    client: reqwest::Client,
    config: ChainConfig,
}

impl RpcBlockClient {
    pub fn new(config: ChainConfig) -> Result<Self, ChainError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| ChainError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Fetch the timestamp of `block` on `network`.
    pub async fn fetch_block_timestamp(
        &self,
        network: &NetworkId,
        block: BlockRef,
    ) -> Result<Timestamp, ChainError> {
        let url = self.config.endpoint_for(network)?;
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_getBlockByNumber",
            params: json!([block.to_rpc_param(), false]),
        };
        debug!(%network, %block, "fetching block");

        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChainError::Unreachable(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    ChainError::Unreachable(format!("connection failed: {e}"))
                } else {
                    ChainError::RequestFailed(e.to_string())
                }
            })?;

        if !resp.status().is_success() {
            return Err(ChainError::RequestFailed(format!(
                "HTTP {} from {}",
                resp.status(),
                url
            )));
        }

        let body: RpcResponse = resp
            .json()
            .await
            .map_err(|e| ChainError::InvalidResponse(e.to_string()))?;

        if let Some(err) = body.error {
            return Err(ChainError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        let header = body.result.ok_or_else(|| ChainError::BlockNotFound {
            network: network.to_string(),
            block: block.to_string(),
        })?;

        parse_hex_quantity(&header.timestamp).map(Timestamp::new)
    }
}

#[async_trait]
impl BlockProvider for RpcBlockClient {
    async fn block_timestamp(
        &self,
        network: &NetworkId,
        block: BlockRef,
    ) -> Result<Timestamp, ChainError> {
        self.fetch_block_timestamp(network, block).await
    }

    fn name(&self) -> &str {
        "json-rpc"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_quantity() {
        assert_eq!(parse_hex_quantity("0x0").unwrap(), 0);
        assert_eq!(parse_hex_quantity("0x6553f100").unwrap(), 1_700_000_000);
        assert_eq!(parse_hex_quantity("0XFF").unwrap(), 255);
    }

    #[test]
    fn test_parse_hex_quantity_rejects_bad_input() {
        assert!(parse_hex_quantity("1234").is_err());
        assert!(parse_hex_quantity("0x").is_err());
        assert!(parse_hex_quantity("0xzz").is_err());
    }

    #[test]
    fn test_request_serialization() {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_getBlockByNumber",
            params: json!([BlockRef::Number(16).to_rpc_param(), false]),
        };
        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(encoded["params"], json!(["0x10", false]));
        assert_eq!(encoded["method"], "eth_getBlockByNumber");
    }

    #[test]
    fn test_response_with_null_result() {
        let resp: RpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":null}"#).unwrap();
        assert!(resp.result.is_none());
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_response_with_error() {
        let resp: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"invalid params"}}"#,
        )
        .unwrap();
        let err = resp.error.unwrap();
        assert_eq!(err.code, -32602);
    }

    #[test]
    fn test_client_rejects_bad_config() {
        let config = ChainConfig::with_endpoints([("1", "localhost:8545")]);
        assert!(matches!(RpcBlockClient::new(config), Err(ChainError::Config(_))));
    }
}
