//! Chain-data provider.
//!
//! The eligibility check anchors credential validity to the timestamp of a
//! proposal's snapshot block. This crate resolves `(network, block)` to that
//! timestamp, over Ethereum JSON-RPC by default.

pub mod config;
pub mod error;
pub mod rpc;

pub use config::ChainConfig;
pub use error::ChainError;
pub use rpc::RpcBlockClient;

use async_trait::async_trait;
use stampgate_types::{BlockRef, NetworkId, Timestamp};

/// Trait for resolving block timestamps.
#[async_trait]
pub trait BlockProvider: Send + Sync {
    /// Timestamp of `block` on `network`.
    async fn block_timestamp(
        &self,
        network: &NetworkId,
        block: BlockRef,
    ) -> Result<Timestamp, ChainError>;

    /// Human-readable name of this provider.
    fn name(&self) -> &str;
}
