//! Identity-scoring service client.
//!
//! The scoring service holds a "passport" of stamps per address and can
//! cryptographically verify those stamps. It also computes an aggregate
//! passport score against a configured scorer.
//!
//! API contract (all requests carry the `X-API-Key` header):
//! - `GET  /registry/passport/{address}` → `{ stamps: [{id, provider}] }`, 404 when unknown
//! - `POST /registry/verify-stamps/{address}` `{scorer_id, stamps: [{id}]}` → `{ items: [...] }`
//! - `POST /registry/submit-passport` `{address, scorer_id}` → score response
//! - `GET  /registry/score/{scorer_id}/{address}` → score response

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::ScorerClient;
pub use config::ScorerConfig;
pub use error::ScorerError;
pub use types::{ScoreResponse, ScoreStatus};

use async_trait::async_trait;
use stampgate_types::{Address, Passport, StampRef, VerifiedStamp};

/// The operations the eligibility check needs from a scoring service.
#[async_trait]
pub trait ScoringService: Send + Sync {
    /// Fetch the passport held for `address`. `Ok(None)` when none exists.
    async fn fetch_passport(&self, address: &Address) -> Result<Option<Passport>, ScorerError>;

    /// Verify the given raw stamps and return the ones that verified.
    async fn verify_stamps(
        &self,
        address: &Address,
        stamps: &[StampRef],
    ) -> Result<Vec<VerifiedStamp>, ScorerError>;

    /// Submit the passport for scoring and return the resulting score.
    async fn passport_score(&self, address: &Address) -> Result<f64, ScorerError>;

    /// Human-readable name of this service.
    fn name(&self) -> &str;
}
