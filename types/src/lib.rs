//! Fundamental types for passport-gated eligibility checks.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! addresses, chain/block references, timestamps, the combination operator and
//! the stamp/credential model returned by the identity-scoring service.

pub mod address;
pub mod block;
pub mod error;
pub mod network;
pub mod operator;
pub mod stamp;
pub mod time;

pub use address::Address;
pub use block::BlockRef;
pub use error::TypeError;
pub use network::NetworkId;
pub use operator::Operator;
pub use stamp::{Passport, RawStamp, StampRef, ValidityWindow, VerifiedStamp};
pub use time::Timestamp;
