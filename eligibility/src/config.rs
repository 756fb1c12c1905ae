//! Evaluator configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use stampgate_chain::ChainConfig;
use stampgate_scorer::ScorerConfig;
use stampgate_utils::LogFormat;

use crate::error::EligibilityError;

/// Configuration for a [`crate::PassportEvaluator`].
///
/// Built by the host, either programmatically or via
/// [`EvaluatorConfig::from_toml_file`]:
///
/// ```toml
/// call_timeout_ms = 15000
///
/// [scorer]
/// api_key = "..."
/// scorer_id = "335"
///
/// [chain.rpc_urls]
/// "1" = "https://eth.example"
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Upper bound on each collaborator call, in milliseconds.
    #[serde(default = "default_call_timeout_ms")]
    pub call_timeout_ms: u64,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Scoring service credentials and transport settings.
    pub scorer: ScorerConfig,

    /// RPC endpoints for snapshot block lookups.
    #[serde(default)]
    pub chain: ChainConfig,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_call_timeout_ms() -> u64 {
    15_000
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl EvaluatorConfig {
    pub fn new(scorer: ScorerConfig) -> Self {
        Self {
            scorer,
            chain: ChainConfig::default(),
            call_timeout_ms: default_call_timeout_ms(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, EligibilityError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| EligibilityError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, EligibilityError> {
        toml::from_str(s).map_err(|e| EligibilityError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, EligibilityError> {
        toml::to_string_pretty(self).map_err(|e| EligibilityError::Config(e.to_string()))
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), EligibilityError> {
        self.scorer.validate()?;
        self.chain.validate()?;
        if self.call_timeout_ms == 0 {
            return Err(EligibilityError::Config("call_timeout_ms must be > 0".into()));
        }
        Ok(())
    }

    /// Install the global tracing subscriber described by this config.
    /// `false` when the host already installed one.
    pub fn init_logging(&self) -> bool {
        stampgate_utils::init_logging(self.log_format, &self.log_level)
    }
}
