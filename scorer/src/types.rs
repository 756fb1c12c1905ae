//! Wire types of the scoring API and their mapping to the domain model.
//!
//! Payloads are mapped to typed structures here; anything that does not
//! parse is reported as [`ScorerError::InvalidResponse`].

use serde::{Deserialize, Serialize};
use stampgate_types::{RawStamp, StampRef, Timestamp, TypeError, ValidityWindow, VerifiedStamp};

use crate::ScorerError;

/// `GET /registry/passport/{address}` body.
#[derive(Debug, Deserialize)]
pub(crate) struct PassportResponse {
    #[serde(default)]
    pub stamps: Vec<RawStamp>,
}

/// `POST /registry/verify-stamps/{address}` body.
#[derive(Debug, Serialize)]
pub(crate) struct VerifyRequest<'a> {
    pub scorer_id: &'a str,
    pub stamps: &'a [StampRef],
}

/// `POST /registry/verify-stamps/{address}` response.
#[derive(Debug, Deserialize)]
pub(crate) struct VerifyResponse {
    #[serde(default)]
    pub items: Vec<VerifiedStampEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifiedStampEntry {
    pub provider: String,
    /// Absent means the service returned it as verified.
    #[serde(default = "default_verified")]
    pub verified: bool,
    pub credential: CredentialEntry,
}

fn default_verified() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(crate) struct CredentialEntry {
    #[serde(rename = "issuanceDate")]
    pub issuance_date: WireTime,
    #[serde(rename = "expirationDate")]
    pub expiration_date: WireTime,
}

/// Credential dates arrive either as RFC 3339 strings or Unix seconds.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireTime {
    Secs(u64),
    Date(String),
}

impl WireTime {
    fn to_timestamp(&self) -> Result<Timestamp, TypeError> {
        match self {
            Self::Secs(secs) => Ok(Timestamp::new(*secs)),
            Self::Date(date) => Timestamp::from_rfc3339(date),
        }
    }
}

impl VerifiedStampEntry {
    /// Map to a [`VerifiedStamp`]; `None` when the service flagged it unverified.
    pub(crate) fn into_verified(self) -> Result<Option<VerifiedStamp>, ScorerError> {
        if !self.verified {
            return Ok(None);
        }
        let invalid = |e: TypeError| {
            ScorerError::InvalidResponse(format!("stamp {}: {e}", self.provider))
        };
        let issued_at = self.credential.issuance_date.to_timestamp().map_err(invalid)?;
        let expires_at = self.credential.expiration_date.to_timestamp().map_err(invalid)?;
        Ok(Some(VerifiedStamp {
            provider: self.provider,
            window: ValidityWindow::new(issued_at, expires_at),
        }))
    }
}

/// `POST /registry/submit-passport` body.
#[derive(Debug, Serialize)]
pub(crate) struct SubmitPassportRequest<'a> {
    pub address: &'a str,
    pub scorer_id: &'a str,
}

/// Scoring progress reported by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreStatus {
    Done,
    Processing,
    Error,
}

/// Score response returned by both submit and read endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct ScoreResponse {
    pub status: ScoreStatus,
    #[serde(default)]
    score: Option<ScoreValue>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The service encodes scores as decimal strings; numbers are accepted too.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum ScoreValue {
    Number(f64),
    Text(String),
}

impl ScoreResponse {
    /// The numeric score, if present and well-formed.
    pub fn score(&self) -> Option<f64> {
        let value = match self.score.as_ref()? {
            ScoreValue::Number(n) => Some(*n),
            ScoreValue::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|s| s.is_finite())
    }
}
