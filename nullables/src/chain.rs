//! Nullable block provider with scripted block timestamps.

use async_trait::async_trait;
use stampgate_chain::{BlockProvider, ChainError};
use stampgate_types::{BlockRef, NetworkId, Timestamp};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// A deterministic block provider for testing.
///
/// Returns the timestamp registered for `(network, block)`, falling back to a
/// constant when one is set.
pub struct NullBlockProvider {
    blocks: Mutex<HashMap<(String, BlockRef), Timestamp>>,
    fallback: Option<Timestamp>,
    unavailable: AtomicBool,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl NullBlockProvider {
    pub fn new() -> Self {
        Self {
            blocks: Mutex::new(HashMap::new()),
            fallback: None,
            unavailable: AtomicBool::new(false),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every block on every network has timestamp `secs`.
    pub fn constant(secs: u64) -> Self {
        Self {
            fallback: Some(Timestamp::new(secs)),
            ..Self::new()
        }
    }

    pub fn with_block(self, network: &str, block: BlockRef, secs: u64) -> Self {
        self.blocks
            .lock()
            .unwrap()
            .insert((network.to_string(), block), Timestamp::new(secs));
        self
    }

    /// Delay every call, to exercise timeouts and concurrency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make every call fail with [`ChainError::Unreachable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for NullBlockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlockProvider for NullBlockProvider {
    async fn block_timestamp(
        &self,
        network: &NetworkId,
        block: BlockRef,
    ) -> Result<Timestamp, ChainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ChainError::Unreachable("null block provider is unavailable".into()));
        }
        self.blocks
            .lock()
            .unwrap()
            .get(&(network.to_string(), block))
            .copied()
            .or(self.fallback)
            .ok_or_else(|| ChainError::BlockNotFound {
                network: network.to_string(),
                block: block.to_string(),
            })
    }

    fn name(&self) -> &str {
        "null-block-provider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_block() {
        let provider = NullBlockProvider::new().with_block("1", BlockRef::Number(10), 150);
        let ts = provider
            .block_timestamp(&NetworkId::mainnet(), BlockRef::Number(10))
            .await
            .unwrap();
        assert_eq!(ts, Timestamp::new(150));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unscripted_block_not_found() {
        let provider = NullBlockProvider::new();
        let result = provider
            .block_timestamp(&NetworkId::mainnet(), BlockRef::Latest)
            .await;
        assert!(matches!(result, Err(ChainError::BlockNotFound { .. })));
    }

    #[tokio::test]
    async fn test_constant_answers_everything() {
        let provider = NullBlockProvider::constant(42);
        let ts = provider
            .block_timestamp(&NetworkId::new("137"), BlockRef::Number(9))
            .await
            .unwrap();
        assert_eq!(ts, Timestamp::new(42));
    }
}
