//! `classify(text) -> (priority, source)`.

use cp_core::{Classification, FallbackClassifier};
use cp_rules::RuleTable;
use std::sync::Arc;
use tracing::debug;

/// Rules first, fallback on a miss. Stateless; share it freely across threads.
#[derive(Clone)]
pub struct DecisionEngine {
    rules: Arc<RuleTable>,
    fallback: Arc<dyn FallbackClassifier>,
}

impl DecisionEngine {
    pub fn new(rules: Arc<RuleTable>, fallback: Arc<dyn FallbackClassifier>) -> Self {
        Self { rules, fallback }
    }

    pub fn classify(&self, text: &str) -> Classification {
        if let Some(m) = self.rules.match_rules(text) {
            debug!(trigger = m.trigger, kind = ?m.kind, priority = %m.priority, "rule decision");
            return m.into();
        }
        // The fallback is only reached on a rule miss.
        let priority = self.fallback.predict(text);
        debug!(priority = %priority, "fallback decision");
        Classification::from_model(priority)
    }

    pub fn classify_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Classification> {
        texts.iter().map(|t| self.classify(t.as_ref())).collect()
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }
}
