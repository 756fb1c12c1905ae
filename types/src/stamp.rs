//! Passport and stamp model.
//!
//! A passport is the bundle of raw stamps the scoring service holds for an
//! address. Raw stamps are only trusted once the service has verified them
//! and returned a [`VerifiedStamp`] with its validity window.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::Address;
use crate::time::Timestamp;

/// A stamp entry as stored in a passport, before verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStamp {
    /// Service-assigned identifier of this stamp.
    pub id: String,
    /// Credential type, e.g. `"Google"`.
    pub provider: String,
}

impl RawStamp {
    pub fn to_ref(&self) -> StampRef {
        StampRef {
            id: self.id.clone(),
        }
    }
}

/// The credential bundle held for an address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passport {
    pub address: Address,
    pub stamps: Vec<RawStamp>,
}

impl Passport {
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Raw stamps whose provider is one of `providers`, in passport order.
    pub fn stamps_for<'a, S>(&'a self, providers: &'a [S]) -> impl Iterator<Item = &'a RawStamp>
    where
        S: AsRef<str>,
    {
        self.stamps
            .iter()
            .filter(move |s| providers.iter().any(|p| p.as_ref() == s.provider))
    }
}

/// Reference to a raw stamp sent for verification.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StampRef {
    pub id: String,
}

/// Half-open validity window `[issued_at, expires_at)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityWindow {
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
}

impl ValidityWindow {
    pub fn new(issued_at: Timestamp, expires_at: Timestamp) -> Self {
        Self {
            issued_at,
            expires_at,
        }
    }

    /// Whether `at` falls inside the window. Expiration is exclusive.
    pub fn covers(&self, at: Timestamp) -> bool {
        self.issued_at <= at && at < self.expires_at
    }
}

impl fmt::Display for ValidityWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.issued_at, self.expires_at)
    }
}

/// A stamp the scoring service has cryptographically verified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedStamp {
    /// Credential type, matched against required stamp identifiers.
    pub provider: String,
    pub window: ValidityWindow,
}

impl VerifiedStamp {
    pub fn new(provider: impl Into<String>, issued_at: u64, expires_at: u64) -> Self {
        Self {
            provider: provider.into(),
            window: ValidityWindow::new(Timestamp::new(issued_at), Timestamp::new(expires_at)),
        }
    }

    pub fn is_valid_at(&self, at: Timestamp) -> bool {
        self.window.covers(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_boundaries() {
        let stamp = VerifiedStamp::new("Google", 100, 200);
        assert!(!stamp.is_valid_at(Timestamp::new(99)));
        assert!(stamp.is_valid_at(Timestamp::new(100)));
        assert!(stamp.is_valid_at(Timestamp::new(150)));
        assert!(stamp.is_valid_at(Timestamp::new(199)));
        assert!(!stamp.is_valid_at(Timestamp::new(200)));
    }

    #[test]
    fn test_inverted_window_covers_nothing() {
        let window = ValidityWindow::new(Timestamp::new(200), Timestamp::new(100));
        assert!(!window.covers(Timestamp::new(150)));
        assert!(!window.covers(Timestamp::new(200)));
    }

    #[test]
    fn test_stamps_for_filters_by_provider() {
        let passport = Passport {
            address: Address::new("0xabc"),
            stamps: vec![
                RawStamp { id: "1".into(), provider: "Google".into() },
                RawStamp { id: "2".into(), provider: "Discord".into() },
                RawStamp { id: "3".into(), provider: "Twitter".into() },
            ],
        };
        let required = ["Twitter", "Google"];
        let ids: Vec<&str> = passport
            .stamps_for(&required)
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
