use crate::error::{CpError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub training: TrainingConfig,
    pub rules: RulesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub artifact_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub corpus_path: PathBuf,
    /// Relabel corpus rows through the rule table before fitting.
    pub prelabel_with_rules: bool,
    /// Additive smoothing for the Naive Bayes model.
    pub alpha: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    /// JSON rule definition. `None` uses the built-in definition.
    pub definition_path: Option<PathBuf>,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            model: ModelConfig::default(),
            training: TrainingConfig::default(),
            rules: RulesConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 8000 }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { artifact_path: "complaint_priority_model.json".into() }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            corpus_path: "complaints_priority_dataset.csv".into(),
            prelabel_with_rules: false,
            alpha: 1.0,
        }
    }
}

impl PriorityConfig {
    /// Load from a JSON file; missing sections fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CpError::Config(format!("{}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| CpError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.training.alpha > 0.0 && self.training.alpha.is_finite()) {
            return Err(CpError::Config(format!(
                "training.alpha must be positive, got {}",
                self.training.alpha
            )));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let c = PriorityConfig::default();
        assert_eq!(c.bind_addr(), "0.0.0.0:8000");
        assert!(!c.training.prelabel_with_rules);
        assert_eq!(c.training.alpha, 1.0);
        assert!(c.rules.definition_path.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{ "server": {{ "host": "127.0.0.1", "port": 9001 }} }}"#).unwrap();
        let c = PriorityConfig::from_file(f.path()).unwrap();
        assert_eq!(c.bind_addr(), "127.0.0.1:9001");
        assert_eq!(c.training.alpha, 1.0);
    }

    #[test]
    fn test_partial_section_keeps_field_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{ "training": {{ "prelabel_with_rules": true }}, "server": {{ "port": 9002 }} }}"#).unwrap();
        let c = PriorityConfig::from_file(f.path()).unwrap();
        assert!(c.training.prelabel_with_rules);
        assert_eq!(c.training.corpus_path, PathBuf::from("complaints_priority_dataset.csv"));
        assert_eq!(c.training.alpha, 1.0);
        assert_eq!(c.bind_addr(), "0.0.0.0:9002");
    }

    #[test]
    fn test_rejects_bad_alpha() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{ "training": {{ "alpha": 0.0 }} }}"#
        )
        .unwrap();
        let err = PriorityConfig::from_file(f.path()).unwrap_err();
        assert!(matches!(err, CpError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PriorityConfig::from_file(Path::new("/nonexistent/cp.json")).unwrap_err();
        assert!(matches!(err, CpError::Config(_)));
    }
}
