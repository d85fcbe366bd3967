//! Canonical rule definition.
//!
//! Keyword order is scan order. `lab` is defined twice (academic block, then
//! facilities block); see [`crate::table`] for how duplicates resolve.

use cp_core::CpError;
use cp_core::Priority::{self, High, Low, Medium};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Version of the built-in rule definition.
pub const RULESET_VERSION: &str = "2024.1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub trigger: String,
    pub priority: Priority,
}

/// Versioned rule data asset. Entries may repeat a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub version: String,
    pub phrases: Vec<RuleEntry>,
    pub keywords: Vec<RuleEntry>,
}

fn entries(items: &[(&str, Priority)]) -> Vec<RuleEntry> {
    items
        .iter()
        .map(|(trigger, priority)| RuleEntry { trigger: trigger.to_string(), priority: *priority })
        .collect()
}

const PHRASES: &[(&str, Priority)] = &[
    ("assignment deadline", High),
    ("marks not updated", High),
    ("marks not uploaded", High),
    ("marks not given", High),
    ("result not declared", High),
    ("result not published", High),
    ("result delayed", High),
    ("professor not available", High),
    ("teacher not available", High),
    ("class cancelled", High),
    ("lecture cancelled", High),
    ("syllabus not covered", High),
    ("syllabus incomplete", High),
    ("attendance shortage", High),
    ("attendance issue", High),
    ("attendance not marked", High),
    ("unfair grading", High),
    ("unfair marks", High),
    ("unfair evaluation", High),
    ("revaluation not done", High),
    ("rechecking not done", High),
    ("project guide not assigned", High),
    ("lab not conducted", High),
    ("internal marks low", High),
    ("external marks low", High),
    ("subject change", High),
    ("backlog not cleared", High),
    ("paper leak", High),
    ("paper out of syllabus", High),
    ("copy checking issue", High),
    ("copy not checked", High),
    ("practical not held", High),
    ("semester fee issue", High),
    ("academic calendar not followed", High),
    ("university rules not followed", High),
    ("class test not held", High),
    ("sessional not conducted", High),
    ("grades not updated", High),
    ("cgpa issue", High),
    ("gpa issue", High),
    ("credit not given", High),
    ("continuous absence of teacher", High),
    ("faculty absent", High),
    ("no teacher assigned", High),
    ("no professor assigned", High),
    ("class timing issue", High),
    ("academic misconduct", High),
    ("cheating in exam", High),
    ("plagiarism", High),
];

const KEYWORDS: &[(&str, Priority)] = &[
    // Academic, exams, results, attendance, college life
    ("academic", High),
    ("exam", High),
    ("examination", High),
    ("test", High),
    ("marks", High),
    ("result", High),
    ("professor", High),
    ("teacher", High),
    ("faculty", High),
    ("attendance", High),
    ("syllabus", High),
    ("assignment", High),
    ("internal", High),
    ("external", High),
    ("subject", High),
    ("lecture", High),
    ("class", High),
    ("backlog", High),
    ("re-evaluation", High),
    ("revaluation", High),
    ("rechecking", High),
    ("paper", High),
    ("copy checking", High),
    ("lab", High),
    ("practical", High),
    ("project", High),
    ("semester", High),
    ("sessional", High),
    ("grades", High),
    ("cgpa", High),
    ("gpa", High),
    ("credit", High),
    ("unfair grading", High),
    ("continuous absence", High),
    ("class cancellation", High),
    ("academic calendar", High),
    ("university", High),
    ("college", High),
    // Facilities and services
    ("certificate", Low),
    ("library", Low),
    ("infrastructure", Medium),
    ("lab", Medium),
    ("plug", Low),
    ("water", Medium),
    ("emergency", High),
    ("security", High),
    ("guard", High),
    ("food", Low),
    ("canteen", Low),
    ("mess", Low),
    ("clean", High),
    ("insect", High),
    ("mosquito", Medium),
    ("wifi", Medium),
    ("ac", High),
    ("fan", Low),
    ("noise", Medium),
    ("parking", Low),
    ("bathroom", High),
    ("leak", High),
    ("lift", High),
    ("hostel", High),
];

impl RuleDefinition {
    /// The built-in definition shared by training and serving.
    pub fn canonical() -> Self {
        Self {
            version: RULESET_VERSION.to_string(),
            phrases: entries(PHRASES),
            keywords: entries(KEYWORDS),
        }
    }

    pub fn from_json(raw: &str) -> cp_core::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read a JSON definition from disk. Failures are configuration errors.
    pub fn from_json_file(path: &Path) -> cp_core::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CpError::Config(format!("rules {}: {e}", path.display())))?;
        Self::from_json(&raw).map_err(|e| CpError::Config(format!("rules {}: {e}", path.display())))
    }

    pub fn to_json_pretty(&self) -> cp_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
