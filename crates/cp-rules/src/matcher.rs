//! Phrase-then-keyword substring matcher.
//!
//! Matching is literal substring containment on lowercased text. A keyword can
//! therefore fire inside an unrelated word: `ac` matches "space", `project`
//! matches "projector". This is kept as-is; tests pin it.

use crate::table::RuleTable;
use cp_core::{Classification, Priority, TriggerKind};

/// A rule hit, borrowing the trigger from its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    pub priority: Priority,
    pub trigger: &'a str,
    pub kind: TriggerKind,
}

impl From<RuleMatch<'_>> for Classification {
    fn from(m: RuleMatch<'_>) -> Self {
        Classification::from_rule(m.priority, m.trigger, m.kind)
    }
}

/// Lowercase only. No stemming, no punctuation stripping.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// First phrase hit in definition order; failing that, first keyword hit.
pub fn match_rules<'a>(text: &str, table: &'a RuleTable) -> Option<RuleMatch<'a>> {
    let text = normalize(text);

    if let Some(rule) = table.phrase_rules().iter().find(|r| text.contains(r.trigger.as_str())) {
        return Some(RuleMatch { priority: rule.priority, trigger: &rule.trigger, kind: TriggerKind::Phrase });
    }

    table
        .keyword_rules()
        .iter()
        .find(|r| text.contains(r.trigger.as_str()))
        .map(|rule| RuleMatch { priority: rule.priority, trigger: &rule.trigger, kind: TriggerKind::Keyword })
}
