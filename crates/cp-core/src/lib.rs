//! Shared types for the complaint priority classifier.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::PriorityConfig;
pub use error::{CpError, Result};
pub use traits::FallbackClassifier;
pub use types::{Classification, ComplaintRecord, Priority, Source, TriggerKind};
