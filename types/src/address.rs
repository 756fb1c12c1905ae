//! Account address of the proposal author.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An account address as supplied by the host, e.g. `0xAbC...`.
///
/// The value is kept exactly as given; the scoring service is responsible for
/// any case normalisation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// The hex prefix every account address carries.
    pub const PREFIX: &'static str = "0x";

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is `0x` followed by at least one hex digit.
    pub fn is_valid(&self) -> bool {
        match self.0.strip_prefix(Self::PREFIX) {
            Some(rest) => !rest.is_empty() && rest.chars().all(|c| c.is_ascii_hexdigit()),
            None => false,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        assert!(Address::new("0xABC").is_valid());
        assert!(Address::new("0x00000000000000000000000000000000deadbeef").is_valid());
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(!Address::new("").is_valid());
        assert!(!Address::new("0x").is_valid());
        assert!(!Address::new("abc").is_valid());
        assert!(!Address::new("0xZZZ").is_valid());
    }

    #[test]
    fn test_serde_transparent() {
        let addr: Address = serde_json::from_str(r#""0xabc""#).unwrap();
        assert_eq!(addr.as_str(), "0xabc");
    }
}
