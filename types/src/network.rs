//! Network identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the chain a proposal's snapshot was taken on.
///
/// The host passes chain ids as strings (`"1"` for Ethereum mainnet,
/// `"10"` for Optimism, ...), so the id is kept as an opaque string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkId(String);

impl NetworkId {
    /// Ethereum mainnet.
    pub fn mainnet() -> Self {
        Self("1".to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Plain chain-id text: non-empty ASCII alphanumerics, safe as a URL path segment.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NetworkId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
