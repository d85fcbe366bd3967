//! Application state shared across all handlers.

use cp_core::Result;
use cp_engine::{DecisionEngine, ModelHandle};
use cp_rules::RuleTable;
use cp_storage::ArtifactStore;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub engine: DecisionEngine,
    pub handle: Arc<ModelHandle>,
    pub store: Arc<dyn ArtifactStore>,
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Wire the engine to `handle`, so reloads are visible to every request.
    pub fn new(rules: Arc<RuleTable>, handle: Arc<ModelHandle>, store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            engine: DecisionEngine::new(rules, handle.clone()),
            handle,
            store,
            start_time: std::time::Instant::now(),
        }
    }

    /// Load the initial model from `store`. A missing artifact is fatal here.
    pub async fn load(rules: Arc<RuleTable>, store: Arc<dyn ArtifactStore>) -> Result<Self> {
        let model = store.load().await?;
        Ok(Self::new(rules, Arc::new(ModelHandle::new(model)), store))
    }
}
