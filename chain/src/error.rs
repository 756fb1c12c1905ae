use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("no RPC endpoint configured for network {0}")]
    UnknownNetwork(String),

    #[error("invalid chain configuration: {0}")]
    Config(String),

    #[error("RPC request failed: {0}")]
    RequestFailed(String),

    #[error("RPC endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("invalid RPC response: {0}")]
    InvalidResponse(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("block {block} not found on network {network}")]
    BlockNotFound { network: String, block: String },
}
