//! Trained-artifact store.
//!
//! The model is an opaque JSON blob here; its layout belongs to `cp-model`.

use async_trait::async_trait;
use cp_core::{CpError, Result};
use cp_model::PriorityModel;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tracing::info;

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn save(&self, model: &PriorityModel) -> Result<()>;
    /// Fails with [`CpError::ModelLoad`] when nothing usable is stored.
    async fn load(&self) -> Result<PriorityModel>;
}

/// JSON artifact on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileArtifactStore {
    path: PathBuf,
}

impl FileArtifactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ArtifactStore for FileArtifactStore {
    async fn save(&self, model: &PriorityModel) -> Result<()> {
        let json = model.to_json()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CpError::ModelSave(format!("{}: {e}", parent.display())))?;
        }
        // Write aside, then rename, so readers never see a partial file.
        let staging = self.staging_path();
        tokio::fs::write(&staging, json)
            .await
            .map_err(|e| CpError::ModelSave(format!("{}: {e}", staging.display())))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| CpError::ModelSave(format!("{}: {e}", self.path.display())))?;
        info!(path = %self.path.display(), version = %model.version, "model artifact saved");
        Ok(())
    }

    async fn load(&self) -> Result<PriorityModel> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CpError::ModelLoad(format!("{}: {e}", self.path.display())))?;
        let model = PriorityModel::from_json(&raw)?;
        info!(path = %self.path.display(), version = %model.version, "model artifact loaded");
        Ok(model)
    }
}

/// In-process store holding the serialized artifact.
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    blob: Mutex<Option<String>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.blob.lock().is_none()
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn save(&self, model: &PriorityModel) -> Result<()> {
        let json = model.to_json()?;
        *self.blob.lock() = Some(json);
        Ok(())
    }

    async fn load(&self) -> Result<PriorityModel> {
        let raw = self
            .blob
            .lock()
            .clone()
            .ok_or_else(|| CpError::ModelLoad("no artifact stored".into()))?;
        PriorityModel::from_json(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cp_core::{ComplaintRecord, Priority};

    fn model() -> PriorityModel {
        PriorityModel::fit(
            &[
                ComplaintRecord::new("broken window", Priority::High),
                ComplaintRecord::new("dim corridor light", Priority::Medium),
                ComplaintRecord::new("old posters", Priority::Low),
            ],
            1.0,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_file_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileArtifactStore::new(dir.path().join("nested/model.json"));
        let m = model();
        store.save(&m).await.unwrap();
        assert!(store.path().exists());
        assert!(!store.staging_path().exists());
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.version, m.version);
        assert_eq!(loaded.predict("broken window"), Priority::High);
    }

    #[tokio::test]
    async fn test_file_save_replaces_previous() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileArtifactStore::new(dir.path().join("model.json"));
        store.save(&model()).await.unwrap();
        let second = model();
        store.save(&second).await.unwrap();
        assert_eq!(store.load().await.unwrap().version, second.version);
    }

    #[tokio::test]
    async fn test_file_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileArtifactStore::new(dir.path().join("absent.json"));
        assert!(matches!(store.load().await, Err(CpError::ModelLoad(_))));
    }

    #[tokio::test]
    async fn test_file_load_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{ not a model").unwrap();
        let store = FileArtifactStore::new(path);
        assert!(matches!(store.load().await, Err(CpError::ModelLoad(_))));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryArtifactStore::new();
        assert!(store.is_empty());
        assert!(matches!(store.load().await, Err(CpError::ModelLoad(_))));
        let m = model();
        store.save(&m).await.unwrap();
        assert!(!store.is_empty());
        assert_eq!(store.load().await.unwrap().version, m.version);
    }

    #[tokio::test]
    async fn test_store_as_trait_object() {
        let store: Box<dyn ArtifactStore> = Box::new(MemoryArtifactStore::new());
        store.save(&model()).await.unwrap();
        assert!(store.load().await.is_ok());
    }
}
