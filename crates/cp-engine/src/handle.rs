//! Serving-side model handle.
//!
//! Reload procedure: train offline, save the artifact, then call
//! [`ModelHandle::reload_from`] (or restart). Each prediction runs on the
//! snapshot it took, so in-flight calls finish on the old version while new
//! calls see the new one. A failed reload leaves the current model in place.

use cp_core::{FallbackClassifier, Priority, Result};
use cp_model::PriorityModel;
use cp_storage::ArtifactStore;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ModelHandle {
    current: Arc<RwLock<Arc<PriorityModel>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReloadOutcome {
    pub previous: Uuid,
    pub current: Uuid,
}

impl ModelHandle {
    pub fn new(model: PriorityModel) -> Self {
        Self { current: Arc::new(RwLock::new(Arc::new(model))) }
    }

    /// Snapshot of the serving model.
    pub fn current(&self) -> Arc<PriorityModel> {
        self.current.read().clone()
    }

    pub fn version(&self) -> Uuid {
        self.current.read().version
    }

    /// Swap in `model`, returning the one it replaced.
    pub fn replace(&self, model: PriorityModel) -> Arc<PriorityModel> {
        let next = Arc::new(model);
        let previous = std::mem::replace(&mut *self.current.write(), next);
        info!(previous = %previous.version, current = %self.version(), "model swapped");
        previous
    }

    pub async fn reload_from(&self, store: &dyn ArtifactStore) -> Result<ReloadOutcome> {
        let model = match store.load().await {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, current = %self.version(), "model reload failed; keeping current model");
                return Err(e);
            }
        };
        let current = model.version;
        let previous = self.replace(model).version;
        Ok(ReloadOutcome { previous, current })
    }
}

impl FallbackClassifier for ModelHandle {
    fn predict(&self, text: &str) -> Priority {
        self.current().predict(text)
    }
}
