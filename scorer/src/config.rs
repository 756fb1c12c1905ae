//! Scoring service configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::ScorerError;

/// Credentials and transport settings for the scoring service.
///
/// Injected by the host; nothing here is read from the environment.
#[derive(Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Base URL of the scoring API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as `X-API-Key`.
    pub api_key: String,

    /// Scorer the passport is verified and scored against.
    pub scorer_id: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// How many times to read the score while it is still processing.
    #[serde(default = "default_score_poll_attempts")]
    pub score_poll_attempts: u32,

    /// Delay between score reads in milliseconds.
    #[serde(default = "default_score_poll_interval_ms")]
    pub score_poll_interval_ms: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_base_url() -> String {
    "https://api.scorer.gitcoin.co".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

fn default_score_poll_attempts() -> u32 {
    5
}

fn default_score_poll_interval_ms() -> u64 {
    1_000
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ScorerConfig {
    pub fn new(api_key: impl Into<String>, scorer_id: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            api_key: api_key.into(),
            scorer_id: scorer_id.into(),
            request_timeout_ms: default_request_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            score_poll_attempts: default_score_poll_attempts(),
            score_poll_interval_ms: default_score_poll_interval_ms(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn score_poll_interval(&self) -> Duration {
        Duration::from_millis(self.score_poll_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ScorerError> {
        if self.api_key.trim().is_empty() {
            return Err(ScorerError::Config("api_key must not be empty".into()));
        }
        if self.scorer_id.trim().is_empty() {
            return Err(ScorerError::Config("scorer_id must not be empty".into()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ScorerError::Config(format!(
                "base_url must be an http(s) URL, got {}",
                self.base_url
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(ScorerError::Config("request_timeout_ms must be > 0".into()));
        }
        Ok(())
    }
}

// The API key never reaches logs.
impl fmt::Debug for ScorerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScorerConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("scorer_id", &self.scorer_id)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("score_poll_attempts", &self.score_poll_attempts)
            .field("score_poll_interval_ms", &self.score_poll_interval_ms)
            .finish()
    }
}
