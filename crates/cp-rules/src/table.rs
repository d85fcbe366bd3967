//! Resolved, immutable rule table.
//!
//! Duplicate triggers: the label of the **last** definition wins, and the
//! trigger keeps the scan position of its **first** definition. With the
//! canonical definition this makes `lab` a Medium keyword checked between
//! `copy checking` and `practical`. Every such override is recorded.

use crate::definitions::{RuleDefinition, RuleEntry};
use crate::matcher::{match_rules, RuleMatch};
use cp_core::{Priority, TriggerKind};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

/// A single resolved trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub trigger: String,
    pub priority: Priority,
}

/// A duplicate trigger whose label was replaced by a later definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOverride {
    pub trigger: String,
    pub kind: TriggerKind,
    pub superseded: Priority,
    pub effective: Priority,
}

#[derive(Debug, Clone)]
pub struct RuleTable {
    version: String,
    phrases: Vec<Rule>,
    keywords: Vec<Rule>,
    overrides: Vec<RuleOverride>,
}

fn resolve(entries: &[RuleEntry], kind: TriggerKind, overrides: &mut Vec<RuleOverride>) -> Vec<Rule> {
    let mut rules: Vec<Rule> = Vec::with_capacity(entries.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let trigger = entry.trigger.to_lowercase();
        if trigger.is_empty() {
            // An empty trigger is a substring of every text.
            warn!(?kind, "skipping empty rule trigger");
            continue;
        }
        match positions.get(&trigger) {
            Some(&pos) => {
                let rule = &mut rules[pos];
                if rule.priority != entry.priority {
                    warn!(
                        trigger = %trigger,
                        superseded = %rule.priority,
                        effective = %entry.priority,
                        "duplicate rule trigger; last definition wins"
                    );
                    overrides.push(RuleOverride {
                        trigger: trigger.clone(),
                        kind,
                        superseded: rule.priority,
                        effective: entry.priority,
                    });
                }
                rule.priority = entry.priority;
            }
            None => {
                positions.insert(trigger.clone(), rules.len());
                rules.push(Rule { trigger, priority: entry.priority });
            }
        }
    }
    rules
}

impl RuleTable {
    pub fn from_definition(def: &RuleDefinition) -> Self {
        let mut overrides = Vec::new();
        let phrases = resolve(&def.phrases, TriggerKind::Phrase, &mut overrides);
        let keywords = resolve(&def.keywords, TriggerKind::Keyword, &mut overrides);
        debug!(
            version = %def.version,
            phrases = phrases.len(),
            keywords = keywords.len(),
            overrides = overrides.len(),
            "rule table built"
        );
        Self { version: def.version.clone(), phrases, keywords, overrides }
    }

    pub fn canonical() -> Self {
        Self::from_definition(&RuleDefinition::canonical())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Phrase rules in scan order.
    pub fn phrase_rules(&self) -> &[Rule] {
        &self.phrases
    }

    /// Keyword rules in scan order, duplicates resolved.
    pub fn keyword_rules(&self) -> &[Rule] {
        &self.keywords
    }

    pub fn overrides(&self) -> &[RuleOverride] {
        &self.overrides
    }

    pub fn len(&self) -> usize {
        self.phrases.len() + self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn match_rules(&self, text: &str) -> Option<RuleMatch<'_>> {
        match_rules(text, self)
    }

    pub fn match_priority(&self, text: &str) -> Option<Priority> {
        self.match_rules(text).map(|m| m.priority)
    }
}

/// The canonical table, built on first use. Clone the `Arc` to share it.
pub static RULE_TABLE: LazyLock<Arc<RuleTable>> = LazyLock::new(|| Arc::new(RuleTable::canonical()));
