//! Timestamp type used for block times and credential validity bounds.
//!
//! Timestamps are Unix epoch seconds (UTC). Credentials carry RFC 3339 dates
//! on the wire; a fractional second rounds up to the next whole second, so
//! comparisons against whole-second block times keep their meaning.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypeError;

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Parse an RFC 3339 date such as `2023-05-01T12:00:00.000Z`.
    ///
    /// Sub-second dates round up: for a whole-second `t`,
    /// `date <= t` iff `ceil(date) <= t` and `t < date` iff `t < ceil(date)`.
    pub fn from_rfc3339(s: &str) -> Result<Self, TypeError> {
        let parsed = DateTime::parse_from_rfc3339(s.trim())
            .map_err(|e| TypeError::InvalidTimestamp(format!("{s}: {e}")))?;
        let secs = u64::try_from(parsed.timestamp())
            .map_err(|_| TypeError::InvalidTimestamp(format!("{s}: before Unix epoch")))?;
        if parsed.timestamp_subsec_nanos() == 0 {
            return Ok(Self(secs));
        }
        secs.checked_add(1)
            .map(Self)
            .ok_or_else(|| TypeError::InvalidTimestamp(format!("{s}: out of range")))
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rfc3339() {
        let ts = Timestamp::from_rfc3339("2023-01-01T00:00:00Z").unwrap();
        assert_eq!(ts.as_secs(), 1_672_531_200);
    }

    #[test]
    fn test_from_rfc3339_fraction_rounds_up() {
        let ts = Timestamp::from_rfc3339("2023-01-01T02:00:00.750+02:00").unwrap();
        assert_eq!(ts.as_secs(), 1_672_531_201);
        let ts = Timestamp::from_rfc3339("2023-01-01T00:00:00.000Z").unwrap();
        assert_eq!(ts.as_secs(), 1_672_531_200);
        let ts = Timestamp::from_rfc3339("2023-01-01T00:00:00.000000001Z").unwrap();
        assert_eq!(ts.as_secs(), 1_672_531_201);
    }

    #[test]
    fn test_fractional_bounds_against_whole_seconds() {
        let issued = Timestamp::from_rfc3339("2023-01-01T00:00:00.500Z").unwrap();
        let expires = Timestamp::from_rfc3339("2023-04-01T00:00:00.500Z").unwrap();
        // 00:00:00 is before issuance; 00:00:00 on the expiry day is still valid.
        assert!(Timestamp::new(1_672_531_200) < issued);
        assert!(Timestamp::new(1_672_531_201) >= issued);
        assert!(Timestamp::new(1_680_307_200) < expires);
        assert!(Timestamp::new(1_680_307_201) >= expires);
    }

    #[test]
    fn test_from_rfc3339_rejects_garbage() {
        assert!(Timestamp::from_rfc3339("yesterday").is_err());
        assert!(Timestamp::from_rfc3339("1969-12-31T23:59:59Z").is_err());
    }
}
