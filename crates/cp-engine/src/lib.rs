//! Priority decision engine.
//!
//! Rule pass first, statistical fallback only on a miss:
//! 1. [`DecisionEngine`] composes a [`cp_rules::RuleTable`] and a fallback model
//! 2. [`ModelHandle`] holds the serving model and swaps it on reload
//! 3. [`training`] fits a new model, optionally pre-labeling through the rules
//! 4. [`augment`] generates synthetic academic complaints for the corpus

pub mod augment;
pub mod handle;
pub mod orchestrator;
pub mod training;

pub use augment::augment_academic;
pub use handle::{ModelHandle, ReloadOutcome};
pub use orchestrator::DecisionEngine;
pub use training::{prelabel, train, TrainingOptions, TrainingReport};
