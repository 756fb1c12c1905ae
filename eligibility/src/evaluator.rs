//! The eligibility evaluator.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use stampgate_chain::{BlockProvider, RpcBlockClient};
use stampgate_scorer::{ScorerClient, ScoringService};
use stampgate_types::{
    Address, BlockRef, NetworkId, Operator, RawStamp, StampRef, Timestamp, VerifiedStamp,
};
use tracing::{debug, info, warn};

use crate::config::EvaluatorConfig;
use crate::decision::{score_threshold, stamps_satisfied, valid_providers};
use crate::error::{Denial, EligibilityError};
use crate::params::EvaluationRequest;

/// Default bound on each outbound collaborator call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(15);

/// A pluggable eligibility check, registered with the host by name.
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Name the host refers to this evaluator by.
    fn name(&self) -> &str;

    /// Whether the request's author is eligible. Every failure answers `false`.
    async fn evaluate(&self, request: &EvaluationRequest) -> bool;
}

/// Gates eligibility on verified passport stamps (and optionally the passport score).
pub struct PassportEvaluator {
    scorer: Arc<dyn ScoringService>,
    blocks: Arc<dyn BlockProvider>,
    call_timeout: Duration,
}

impl PassportEvaluator {
    /// Registry name of this evaluator.
    pub const NAME: &'static str = "passport-gated";

    pub fn new(scorer: Arc<dyn ScoringService>, blocks: Arc<dyn BlockProvider>) -> Self {
        Self {
            scorer,
            blocks,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Build with HTTP clients for both collaborators.
    pub fn from_config(config: &EvaluatorConfig) -> Result<Self, EligibilityError> {
        config.validate()?;
        let scorer = ScorerClient::new(config.scorer.clone())?;
        let blocks = RpcBlockClient::new(config.chain.clone())?;
        Ok(Self::new(Arc::new(scorer), Arc::new(blocks)).with_call_timeout(config.call_timeout()))
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Decide eligibility, returning the reason on denial.
    ///
    /// Passport resolution and the snapshot block lookup are independent and
    /// run concurrently.
    pub async fn check(&self, request: &EvaluationRequest) -> Result<(), Denial> {
        let params = &request.params;
        let operator: Operator = params
            .operator
            .parse()
            .map_err(|_| Denial::UnsupportedOperator(params.operator.clone()))?;
        let threshold =
            score_threshold(params.score_threshold).map_err(Denial::InvalidScoreThreshold)?;
        if !request.author.is_valid() {
            return Err(Denial::InvalidAddress(request.author.to_string()));
        }
        let required = params.required_stamps();
        if required.is_empty() {
            return Err(Denial::NoStampsConfigured);
        }

        let (verified, reference) = tokio::join!(
            self.verified_stamps(&request.author, &required),
            self.reference_timestamp(&request.network, request.snapshot),
        );
        let verified = verified?;
        let reference = reference?;

        let valid = valid_providers(&verified, reference);
        let stamps_ok = stamps_satisfied(&required, &valid, operator);
        debug!(
            author = %request.author,
            %operator,
            %reference,
            valid = ?valid,
            stamps_ok,
            "stamps evaluated"
        );

        let not_satisfied = || Denial::StampsNotSatisfied {
            operator,
            valid: valid.iter().map(|p| p.to_string()).collect(),
        };

        let Some(threshold) = threshold else {
            return if stamps_ok { Ok(()) } else { Err(not_satisfied()) };
        };

        match (operator, stamps_ok) {
            (Operator::And, false) => Err(not_satisfied()),
            (Operator::Or, true) => Ok(()),
            _ => self.check_score(&request.author, threshold).await,
        }
    }

    /// Fetch the passport and verify the raw stamps matching `required`.
    async fn verified_stamps(
        &self,
        author: &Address,
        required: &[&str],
    ) -> Result<Vec<VerifiedStamp>, Denial> {
        let passport = self
            .bounded("passport fetch", self.scorer.fetch_passport(author))
            .await?
            .ok_or_else(|| Denial::NoPassportFound(author.to_string()))?;
        if passport.is_empty() {
            return Err(Denial::EmptyPassport(author.to_string()));
        }

        let refs: Vec<StampRef> = passport.stamps_for(required).map(RawStamp::to_ref).collect();
        if refs.is_empty() {
            return Err(Denial::NoMatchingStamps);
        }

        let verified = self
            .bounded("stamp verification", self.scorer.verify_stamps(author, &refs))
            .await?;
        if verified.is_empty() {
            return Err(Denial::NoVerifiedStamps);
        }
        Ok(verified)
    }

    async fn reference_timestamp(
        &self,
        network: &NetworkId,
        snapshot: BlockRef,
    ) -> Result<Timestamp, Denial> {
        self.bounded("snapshot block fetch", self.blocks.block_timestamp(network, snapshot))
            .await
    }

    async fn check_score(&self, author: &Address, threshold: f64) -> Result<(), Denial> {
        let score = self
            .bounded("passport score", self.scorer.passport_score(author))
            .await?;
        debug!(%author, score, threshold, "passport scored");
        if score >= threshold {
            Ok(())
        } else {
            Err(Denial::ScoreBelowThreshold { score, threshold })
        }
    }

    /// Run a collaborator call under the call timeout; any failure is an
    /// [`Denial::UpstreamFetchFailure`].
    async fn bounded<T, E, F>(&self, what: &str, call: F) -> Result<T, Denial>
    where
        E: fmt::Display,
        F: Future<Output = Result<T, E>>,
    {
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(Denial::UpstreamFetchFailure(format!("{what}: {e}"))),
            Err(_) => Err(Denial::UpstreamFetchFailure(format!(
                "{what}: timed out after {:?}",
                self.call_timeout
            ))),
        }
    }
}

#[async_trait]
impl Evaluator for PassportEvaluator {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn evaluate(&self, request: &EvaluationRequest) -> bool {
        match self.check(request).await {
            Ok(()) => {
                info!(author = %request.author, snapshot = %request.snapshot, "author eligible");
                true
            }
            Err(denial) if denial.is_upstream_failure() => {
                warn!(author = %request.author, %denial, "eligibility denied");
                false
            }
            Err(denial) => {
                debug!(author = %request.author, %denial, "eligibility denied");
                false
            }
        }
    }
}
