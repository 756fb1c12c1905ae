//! Pure decision logic: validity filtering and operator combination.

use std::collections::BTreeSet;

use stampgate_types::{Operator, Timestamp, VerifiedStamp};

/// Providers of the stamps whose validity window covers `at`.
pub fn valid_providers(verified: &[VerifiedStamp], at: Timestamp) -> BTreeSet<&str> {
    verified
        .iter()
        .filter(|stamp| stamp.is_valid_at(at))
        .map(|stamp| stamp.provider.as_str())
        .collect()
}

/// Whether the required stamps are satisfied by `valid` under `operator`.
///
/// AND needs every required stamp, OR at least one. No required stamps is
/// never satisfied.
pub fn stamps_satisfied(required: &[&str], valid: &BTreeSet<&str>, operator: Operator) -> bool {
    operator.combine(required.iter().map(|stamp| valid.contains(stamp)))
}

/// Normalised score threshold: `None` disables the check.
///
/// Zero or negative thresholds disable it; NaN is rejected.
pub fn score_threshold(raw: Option<f64>) -> Result<Option<f64>, f64> {
    match raw {
        None => Ok(None),
        Some(t) if t.is_nan() => Err(t),
        Some(t) if t <= 0.0 => Ok(None),
        Some(t) => Ok(Some(t)),
    }
}
