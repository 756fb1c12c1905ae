//! Evaluator registry: how the host discovers eligibility checks by name.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::error::EligibilityError;
use crate::evaluator::Evaluator;
use crate::params::EvaluationRequest;

/// Registry of evaluators keyed by [`Evaluator::name`].
pub struct EvaluatorRegistry {
    evaluators: HashMap<String, Arc<dyn Evaluator>>,
}

impl EvaluatorRegistry {
    pub fn new() -> Self {
        Self {
            evaluators: HashMap::new(),
        }
    }

    /// Register an evaluator. Names are unique.
    pub fn register(&mut self, evaluator: Arc<dyn Evaluator>) -> Result<(), EligibilityError> {
        let name = evaluator.name().to_string();
        if self.evaluators.contains_key(&name) {
            return Err(EligibilityError::DuplicateEvaluator(name));
        }
        self.evaluators.insert(name, evaluator);
        Ok(())
    }

    /// Look up an evaluator by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Evaluator>> {
        self.evaluators.get(name).cloned()
    }

    /// Remove an evaluator.
    pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn Evaluator>> {
        self.evaluators.remove(name)
    }

    /// Names of all registered evaluators, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.evaluators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Evaluate with the named evaluator. An unknown name is not eligible.
    pub async fn evaluate(&self, name: &str, request: &EvaluationRequest) -> bool {
        match self.evaluators.get(name) {
            Some(evaluator) => evaluator.evaluate(request).await,
            None => {
                warn!(evaluator = name, "unknown evaluator");
                false
            }
        }
    }
}

impl Default for EvaluatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use stampgate_types::BlockRef;

    use crate::params::ValidationParams;

    struct Fixed(&'static str, bool);

    #[async_trait]
    impl Evaluator for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        async fn evaluate(&self, _request: &EvaluationRequest) -> bool {
            self.1
        }
    }

    fn request() -> EvaluationRequest {
        EvaluationRequest::new(
            "0xabc",
            "1",
            BlockRef::Latest,
            ValidationParams::new(&["Google"], "AND"),
        )
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = EvaluatorRegistry::new();
        registry.register(Arc::new(Fixed("allow", true))).unwrap();
        registry.register(Arc::new(Fixed("deny", false))).unwrap();
        assert!(registry.get("allow").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.names(), vec!["allow", "deny"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = EvaluatorRegistry::new();
        registry.register(Arc::new(Fixed("allow", true))).unwrap();
        let result = registry.register(Arc::new(Fixed("allow", false)));
        assert!(matches!(result, Err(EligibilityError::DuplicateEvaluator(_))));
    }

    #[test]
    fn test_unregister() {
        let mut registry = EvaluatorRegistry::new();
        registry.register(Arc::new(Fixed("allow", true))).unwrap();
        assert!(registry.unregister("allow").is_some());
        assert!(registry.names().is_empty());
    }

    #[tokio::test]
    async fn test_evaluate_dispatches_by_name() {
        let mut registry = EvaluatorRegistry::new();
        registry.register(Arc::new(Fixed("allow", true))).unwrap();
        registry.register(Arc::new(Fixed("deny", false))).unwrap();
        assert!(registry.evaluate("allow", &request()).await);
        assert!(!registry.evaluate("deny", &request()).await);
        assert!(!registry.evaluate("missing", &request()).await);
    }
}
