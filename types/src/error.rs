//! Parse errors for the shared types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("invalid block reference: {0}")]
    InvalidBlockRef(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
