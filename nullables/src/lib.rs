//! Nullable infrastructure for deterministic testing.
//!
//! Both external collaborators of the eligibility check (the scoring service
//! and the chain-data provider) are abstracted behind traits. This crate
//! provides test-friendly implementations that:
//! - Return scripted values
//! - Can be switched into failure modes programmatically
//! - Record every call for assertions
//! - Never touch the network
//!
//! Usage: swap real clients for nullables in tests.

pub mod chain;
pub mod scorer;

pub use chain::NullBlockProvider;
pub use scorer::{NullScorer, ScorerCall};
