//! Passport-gated voting eligibility.
//!
//! Decides whether a proposal author may take part, based on the identity
//! stamps their passport holds at the proposal's snapshot block:
//! 1. **Passport**: fetch the author's raw stamps from the scoring service.
//! 2. **Verification**: have the service verify the stamps matching the required providers.
//! 3. **Validity**: keep stamps whose `[issuance, expiration)` window covers the snapshot block time.
//! 4. **Combination**: AND requires every required stamp, OR at least one. An optional
//!    passport score threshold joins the combination with the same operator.
//!
//! Every failure denies eligibility. Hosts see a plain boolean through
//! [`Evaluator::evaluate`]; [`PassportEvaluator::check`] exposes the [`Denial`] reason.

pub mod config;
pub mod decision;
pub mod error;
pub mod evaluator;
pub mod params;
pub mod registry;

pub use config::EvaluatorConfig;
pub use error::{Denial, EligibilityError};
pub use evaluator::{Evaluator, PassportEvaluator};
pub use params::{EvaluationRequest, ValidationParams};
pub use registry::EvaluatorRegistry;
