use stampgate_chain::ChainError;
use stampgate_scorer::ScorerError;
use stampgate_types::Operator;
use thiserror::Error;

/// Why an author was found ineligible.
///
/// Never surfaced through [`crate::Evaluator::evaluate`], which only answers
/// `false`; kept distinct for logging and for hosts calling `check`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Denial {
    #[error("unsupported operator {0:?}")]
    UnsupportedOperator(String),

    #[error("invalid author address {0:?}")]
    InvalidAddress(String),

    #[error("no required stamps configured")]
    NoStampsConfigured,

    #[error("invalid score threshold {0}")]
    InvalidScoreThreshold(f64),

    #[error("no passport found for {0}")]
    NoPassportFound(String),

    #[error("passport for {0} holds no stamps")]
    EmptyPassport(String),

    #[error("passport holds none of the required stamps")]
    NoMatchingStamps,

    #[error("no required stamp passed verification")]
    NoVerifiedStamps,

    #[error("upstream fetch failed: {0}")]
    UpstreamFetchFailure(String),

    #[error("required stamps not satisfied under {operator}: valid at snapshot {valid:?}")]
    StampsNotSatisfied { operator: Operator, valid: Vec<String> },

    #[error("passport score {score} below threshold {threshold}")]
    ScoreBelowThreshold { score: f64, threshold: f64 },
}

impl Denial {
    /// Whether the denial stems from a collaborator failure rather than the
    /// author's credentials.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(self, Self::UpstreamFetchFailure(_))
    }
}

/// Errors building or registering evaluators.
#[derive(Debug, Error)]
pub enum EligibilityError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("evaluator {0} is already registered")]
    DuplicateEvaluator(String),

    #[error("scorer: {0}")]
    Scorer(#[from] ScorerError),

    #[error("chain: {0}")]
    Chain(#[from] ChainError),
}
