//! Parameters the host passes with every evaluation.

use serde::{Deserialize, Serialize};
use stampgate_types::{Address, BlockRef, NetworkId};

/// Validation parameters as configured on a governance space.
///
/// `operator` stays a raw string: an unsupported value must deny at
/// evaluation time rather than fail to parse.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationParams {
    /// Required stamp providers, e.g. `["Google", "Twitter"]`.
    #[serde(default)]
    pub stamps: Vec<String>,
    /// `"AND"` or `"OR"`.
    #[serde(default)]
    pub operator: String,
    /// Minimum passport score; absent or `0` disables the score check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_threshold: Option<f64>,
}

impl ValidationParams {
    pub fn new(stamps: &[&str], operator: &str) -> Self {
        Self {
            stamps: stamps.iter().map(|s| s.to_string()).collect(),
            operator: operator.to_string(),
            score_threshold: None,
        }
    }

    pub fn with_score_threshold(mut self, threshold: f64) -> Self {
        self.score_threshold = Some(threshold);
        self
    }

    /// Required stamps in configured order, blanks and duplicates removed.
    pub fn required_stamps(&self) -> Vec<&str> {
        let mut required: Vec<&str> = Vec::with_capacity(self.stamps.len());
        for stamp in &self.stamps {
            let stamp = stamp.as_str();
            if !stamp.trim().is_empty() && !required.contains(&stamp) {
                required.push(stamp);
            }
        }
        required
    }
}

/// Everything one eligibility decision needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// The proposal author.
    pub author: Address,
    pub network: NetworkId,
    /// Snapshot block whose timestamp anchors stamp validity.
    pub snapshot: BlockRef,
    pub params: ValidationParams,
}

impl EvaluationRequest {
    pub fn new(
        author: impl Into<Address>,
        network: impl Into<NetworkId>,
        snapshot: BlockRef,
        params: ValidationParams,
    ) -> Self {
        Self {
            author: author.into(),
            network: network.into(),
            snapshot,
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_stamps_dedup_and_blank() {
        let params = ValidationParams::new(&["Google", "", "Twitter", "Google", "  "], "AND");
        assert_eq!(params.required_stamps(), vec!["Google", "Twitter"]);
    }

    #[test]
    fn test_deserialize_host_payload() {
        let json = r#"{
            "author": "0xABC",
            "network": "1",
            "snapshot": 17000000,
            "params": {"stamps": ["Google"], "operator": "OR", "scoreThreshold": 20}
        }"#;
        let request: EvaluationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.author.as_str(), "0xABC");
        assert_eq!(request.snapshot, BlockRef::Number(17_000_000));
        assert_eq!(request.params.operator, "OR");
        assert_eq!(request.params.score_threshold, Some(20.0));
    }

    #[test]
    fn test_deserialize_missing_params_fields() {
        let json = r#"{"author":"0x1","network":"10","snapshot":"latest","params":{}}"#;
        let request: EvaluationRequest = serde_json::from_str(json).unwrap();
        assert!(request.params.stamps.is_empty());
        assert!(request.params.operator.is_empty());
        assert_eq!(request.snapshot, BlockRef::Latest);
    }
}
