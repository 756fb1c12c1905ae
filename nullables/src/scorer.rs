//! Nullable scoring service with scripted passports, verifications and scores.

use async_trait::async_trait;
use stampgate_scorer::{ScorerError, ScoringService};
use stampgate_types::{Address, Passport, RawStamp, StampRef, VerifiedStamp};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// A call made against [`NullScorer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScorerCall {
    FetchPassport(String),
    /// Address and the stamp ids sent for verification.
    VerifyStamps(String, Vec<String>),
    Score(String),
}

/// An in-memory scoring service for testing.
///
/// Verification returns the scripted verified stamps whose provider matches
/// one of the requested raw stamps, mirroring the real service.
pub struct NullScorer {
    passports: Mutex<HashMap<String, Passport>>,
    verified: Mutex<HashMap<String, Vec<VerifiedStamp>>>,
    scores: Mutex<HashMap<String, f64>>,
    calls: Mutex<Vec<ScorerCall>>,
    unavailable: AtomicBool,
    delay: Option<Duration>,
}

impl NullScorer {
    pub fn new() -> Self {
        Self {
            passports: Mutex::new(HashMap::new()),
            verified: Mutex::new(HashMap::new()),
            scores: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            unavailable: AtomicBool::new(false),
            delay: None,
        }
    }

    /// Register a passport holding `(id, provider)` stamps.
    pub fn with_passport(self, address: &str, stamps: &[(&str, &str)]) -> Self {
        let passport = Passport {
            address: Address::new(address),
            stamps: stamps
                .iter()
                .map(|(id, provider)| RawStamp {
                    id: id.to_string(),
                    provider: provider.to_string(),
                })
                .collect(),
        };
        self.passports
            .lock()
            .unwrap()
            .insert(address.to_string(), passport);
        self
    }

    /// Register a stamp the service will report as verified for `address`.
    pub fn with_verified(self, address: &str, stamp: VerifiedStamp) -> Self {
        self.verified
            .lock()
            .unwrap()
            .entry(address.to_string())
            .or_default()
            .push(stamp);
        self
    }

    pub fn with_score(self, address: &str, score: f64) -> Self {
        self.scores.lock().unwrap().insert(address.to_string(), score);
        self
    }

    /// Delay every call, to exercise timeouts and concurrency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make every call fail with [`ScorerError::Unreachable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// All calls made so far (for assertions).
    pub fn calls(&self) -> Vec<ScorerCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(&self, call: ScorerCall) -> Result<(), ScorerError> {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ScorerError::Unreachable("null scorer is unavailable".into()));
        }
        Ok(())
    }
}

impl Default for NullScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScoringService for NullScorer {
    async fn fetch_passport(&self, address: &Address) -> Result<Option<Passport>, ScorerError> {
        self.enter(ScorerCall::FetchPassport(address.to_string()))
            .await?;
        Ok(self.passports.lock().unwrap().get(address.as_str()).cloned())
    }

    async fn verify_stamps(
        &self,
        address: &Address,
        stamps: &[StampRef],
    ) -> Result<Vec<VerifiedStamp>, ScorerError> {
        let ids: Vec<String> = stamps.iter().map(|s| s.id.clone()).collect();
        self.enter(ScorerCall::VerifyStamps(address.to_string(), ids.clone()))
            .await?;

        let requested: Vec<String> = self
            .passports
            .lock()
            .unwrap()
            .get(address.as_str())
            .map(|p| {
                p.stamps
                    .iter()
                    .filter(|s| ids.contains(&s.id))
                    .map(|s| s.provider.clone())
                    .collect()
            })
            .unwrap_or_default();

        Ok(self
            .verified
            .lock()
            .unwrap()
            .get(address.as_str())
            .map(|stamps| {
                stamps
                    .iter()
                    .filter(|s| requested.contains(&s.provider))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn passport_score(&self, address: &Address) -> Result<f64, ScorerError> {
        self.enter(ScorerCall::Score(address.to_string())).await?;
        self.scores
            .lock()
            .unwrap()
            .get(address.as_str())
            .copied()
            .ok_or_else(|| ScorerError::ScoreFailed(format!("no score for {address}")))
    }

    fn name(&self) -> &str {
        "null-scorer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_passport_is_none() {
        let scorer = NullScorer::new();
        let passport = scorer.fetch_passport(&Address::new("0x1")).await.unwrap();
        assert!(passport.is_none());
        assert_eq!(scorer.calls(), vec![ScorerCall::FetchPassport("0x1".into())]);
    }

    #[tokio::test]
    async fn test_verify_only_returns_requested_providers() {
        let scorer = NullScorer::new()
            .with_passport("0x1", &[("a", "Google"), ("b", "Twitter")])
            .with_verified("0x1", VerifiedStamp::new("Google", 1, 2))
            .with_verified("0x1", VerifiedStamp::new("Twitter", 1, 2));

        let verified = scorer
            .verify_stamps(&Address::new("0x1"), &[StampRef { id: "b".into() }])
            .await
            .unwrap();
        assert_eq!(verified, vec![VerifiedStamp::new("Twitter", 1, 2)]);
    }

    #[tokio::test]
    async fn test_unavailable_fails_every_call() {
        let scorer = NullScorer::new().with_score("0x1", 10.0);
        scorer.set_unavailable(true);
        assert!(scorer.passport_score(&Address::new("0x1")).await.is_err());
        scorer.set_unavailable(false);
        assert_eq!(scorer.passport_score(&Address::new("0x1")).await.unwrap(), 10.0);
    }
}
