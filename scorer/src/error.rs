use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("invalid scorer configuration: {0}")]
    Config(String),

    #[error("HTTP request to scoring service failed: {0}")]
    RequestFailed(String),

    #[error("scoring service rejected the API key (HTTP {0})")]
    Unauthorized(u16),

    #[error("invalid response from scoring service: {0}")]
    InvalidResponse(String),

    #[error("scoring service unreachable: {0}")]
    Unreachable(String),

    #[error("scoring failed: {0}")]
    ScoreFailed(String),

    #[error("score still processing after {attempts} attempts")]
    ScorePending { attempts: u32 },
}
