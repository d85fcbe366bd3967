//! Offline training pipeline.

use cp_core::config::TrainingConfig;
use cp_core::{ComplaintRecord, CpError, Priority, Result};
use cp_model::{ModelInfo, PriorityModel};
use cp_rules::RuleTable;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOptions {
    /// Replace each row's label with the rule decision when a rule fires.
    pub prelabel_with_rules: bool,
    pub alpha: f64,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self { prelabel_with_rules: false, alpha: 1.0 }
    }
}

impl From<&TrainingConfig> for TrainingOptions {
    fn from(c: &TrainingConfig) -> Self {
        Self { prelabel_with_rules: c.prelabel_with_rules, alpha: c.alpha }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub samples: usize,
    /// Rows whose label changed through pre-labeling.
    pub relabeled: usize,
    pub label_counts: BTreeMap<Priority, usize>,
    pub rules_version: String,
    pub model: ModelInfo,
}

/// Resolve each row through `rules`. Returns the new rows and how many changed.
pub fn prelabel(records: &[ComplaintRecord], rules: &RuleTable) -> (Vec<ComplaintRecord>, usize) {
    let mut changed = 0;
    let rows = records
        .iter()
        .map(|r| match rules.match_rules(&r.text) {
            Some(m) if m.priority != r.priority => {
                debug!(trigger = m.trigger, from = %r.priority, to = %m.priority, "row relabeled by rule");
                changed += 1;
                ComplaintRecord::new(r.text.clone(), m.priority)
            }
            _ => r.clone(),
        })
        .collect();
    (rows, changed)
}

/// Fit a new model from `records`.
///
/// `rules` must be the same table the server uses; it is only consulted when
/// `options.prelabel_with_rules` is set.
pub fn train(
    records: &[ComplaintRecord],
    rules: &RuleTable,
    options: &TrainingOptions,
) -> Result<(PriorityModel, TrainingReport)> {
    if records.is_empty() {
        return Err(CpError::EmptyCorpus);
    }

    let (rows, relabeled) = if options.prelabel_with_rules {
        prelabel(records, rules)
    } else {
        (records.to_vec(), 0)
    };

    let mut label_counts = BTreeMap::new();
    for r in &rows {
        *label_counts.entry(r.priority).or_insert(0) += 1;
    }

    let model = PriorityModel::fit(&rows, options.alpha)?;
    let report = TrainingReport {
        samples: rows.len(),
        relabeled,
        label_counts,
        rules_version: rules.version().to_string(),
        model: model.info(),
    };
    info!(
        samples = report.samples,
        relabeled = report.relabeled,
        prelabel = options.prelabel_with_rules,
        version = %report.model.version,
        "training finished"
    );
    Ok((model, report))
}
