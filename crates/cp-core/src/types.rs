use serde::{Deserialize, Serialize};
use std::fmt;

/// Complaint priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Every label, in tie-break order.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Parse a label, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything outside {High, Medium, Low}; callers decide
    /// how to report it.
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|p| p.as_str().eq_ignore_ascii_case(s))
    }

    /// Position in [`Priority::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance tag: which mechanism produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Rule,
    Ml,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rule => "rule",
            Self::Ml => "ml",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of rule trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    Phrase,
    Keyword,
}

/// Result of classifying one complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub priority: Priority,
    pub source: Source,
    /// Trigger that fired, for rule decisions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TriggerKind>,
}

impl Classification {
    pub fn from_rule(priority: Priority, trigger: impl Into<String>, kind: TriggerKind) -> Self {
        Self {
            priority,
            source: Source::Rule,
            trigger: Some(trigger.into()),
            kind: Some(kind),
        }
    }

    pub fn from_model(priority: Priority) -> Self {
        Self { priority, source: Source::Ml, trigger: None, kind: None }
    }
}

/// Labeled complaint used for training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub text: String,
    pub priority: Priority,
}

impl ComplaintRecord {
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Self { text: text.into(), priority }
    }
}
