//! Complaint priority rules: canonical trigger table and substring matcher.
//!
//! One [`RuleTable`] is built at process start and shared read-only by the
//! training pipeline and the server, so both compute identical rule decisions.

pub mod definitions;
pub mod matcher;
pub mod table;

pub use definitions::{RuleDefinition, RuleEntry, RULESET_VERSION};
pub use matcher::{match_rules, normalize, RuleMatch};
pub use table::{Rule, RuleOverride, RuleTable, RULE_TABLE};
