//! Trained priority model artifact.

use crate::naive_bayes::MultinomialNb;
use crate::tfidf::TfidfVectorizer;
use chrono::{DateTime, Utc};
use cp_core::{ComplaintRecord, CpError, FallbackClassifier, Priority, Result};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Serialized artifact layout version. Bump when the JSON shape changes.
pub const ARTIFACT_FORMAT: u32 = 1;

/// Vectorizer + classifier, stamped with a version.
///
/// Read-only once trained. Replace it wholesale to update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityModel {
    pub format: u32,
    pub version: Uuid,
    pub trained_at: DateTime<Utc>,
    pub samples: usize,
    vectorizer: TfidfVectorizer,
    classifier: MultinomialNb,
}

/// Summary for health endpoints and logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub version: Uuid,
    pub trained_at: DateTime<Utc>,
    pub samples: usize,
    pub vocabulary: usize,
    pub classes: Vec<Priority>,
}

impl PriorityModel {
    /// Fit on labeled records. No rule involvement.
    pub fn fit(records: &[ComplaintRecord], alpha: f64) -> Result<Self> {
        if records.is_empty() {
            return Err(CpError::EmptyCorpus);
        }
        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        let labels: Vec<Priority> = records.iter().map(|r| r.priority).collect();

        let vectorizer = TfidfVectorizer::fit(&texts);
        let xs = vectorizer.transform_all(&texts);
        let classifier = MultinomialNb::fit(&xs, &labels, vectorizer.vocabulary_len(), alpha)?;

        let model = Self {
            format: ARTIFACT_FORMAT,
            version: Uuid::new_v4(),
            trained_at: Utc::now(),
            samples: records.len(),
            vectorizer,
            classifier,
        };
        info!(
            version = %model.version,
            samples = model.samples,
            vocabulary = model.vectorizer.vocabulary_len(),
            "priority model trained"
        );
        Ok(model)
    }

    pub fn predict(&self, text: &str) -> Priority {
        self.classifier.predict(&self.vectorizer.transform(text))
    }

    /// Joint log-likelihood per class, for diagnostics.
    pub fn scores(&self, text: &str) -> Vec<(Priority, f64)> {
        self.classifier.joint_log_likelihood(&self.vectorizer.transform(text))
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            version: self.version,
            trained_at: self.trained_at,
            samples: self.samples,
            vocabulary: self.vectorizer.vocabulary_len(),
            classes: self.classifier.classes().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse an artifact. Other layout versions and internally inconsistent
    /// artifacts fail here with [`CpError::ModelLoad`], never at predict time.
    pub fn from_json(raw: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(raw).map_err(|e| CpError::ModelLoad(e.to_string()))?;
        if model.format != ARTIFACT_FORMAT {
            return Err(CpError::ModelLoad(format!(
                "unsupported artifact format {} (expected {ARTIFACT_FORMAT})",
                model.format
            )));
        }
        model.vectorizer.validate()?;
        model.classifier.validate(model.vectorizer.vocabulary_len())?;
        Ok(model)
    }
}

impl FallbackClassifier for PriorityModel {
    fn predict(&self, text: &str) -> Priority {
        PriorityModel::predict(self, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Priority::*;

    fn corpus() -> Vec<ComplaintRecord> {
        vec![
            ComplaintRecord::new("the corridor light flickers at night", Medium),
            ComplaintRecord::new("corridor light is dim", Medium),
            ComplaintRecord::new("broken window in the dorm room", High),
            ComplaintRecord::new("window glass shattered near the stairs", High),
            ComplaintRecord::new("notice board is untidy", Low),
            ComplaintRecord::new("notice board posters are old", Low),
        ]
    }

    #[test]
    fn test_fit_and_predict() {
        let m = PriorityModel::fit(&corpus(), 1.0).unwrap();
        assert_eq!(m.predict("the window is shattered"), High);
        assert_eq!(m.predict("light keeps flickering in the corridor"), Medium);
        assert_eq!(m.predict("old posters on the notice board"), Low);
    }

    #[test]
    fn test_predict_total_on_empty_and_unseen() {
        let m = PriorityModel::fit(&corpus(), 1.0).unwrap();
        assert!(Priority::ALL.contains(&m.predict("")));
        assert!(Priority::ALL.contains(&m.predict("zzz qqq")));
    }

    #[test]
    fn test_predict_deterministic() {
        let m = PriorityModel::fit(&corpus(), 1.0).unwrap();
        let text = "dim light near the window";
        assert_eq!(m.predict(text), m.predict(text));
        assert_eq!(m.scores(text), m.scores(text));
    }

    #[test]
    fn test_fit_empty() {
        assert!(matches!(PriorityModel::fit(&[], 1.0), Err(CpError::EmptyCorpus)));
    }

    #[test]
    fn test_info() {
        let m = PriorityModel::fit(&corpus(), 1.0).unwrap();
        let info = m.info();
        assert_eq!(info.samples, 6);
        assert_eq!(info.classes, vec![High, Medium, Low]);
        assert!(info.vocabulary > 10);
    }

    #[test]
    fn test_json_round_trip_preserves_predictions() {
        let m = PriorityModel::fit(&corpus(), 1.0).unwrap();
        let restored = PriorityModel::from_json(&m.to_json().unwrap()).unwrap();
        assert_eq!(restored.version, m.version);
        for text in ["window shattered", "dim corridor", "", "posters"] {
            assert_eq!(restored.predict(text), m.predict(text));
        }
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(PriorityModel::from_json("not json"), Err(CpError::ModelLoad(_))));
    }

    #[test]
    fn test_from_json_rejects_other_format() {
        let m = PriorityModel::fit(&corpus(), 1.0).unwrap();
        let mut v: serde_json::Value = serde_json::from_str(&m.to_json().unwrap()).unwrap();
        v["format"] = serde_json::json!(ARTIFACT_FORMAT + 1);
        let err = PriorityModel::from_json(&v.to_string()).unwrap_err();
        assert!(matches!(err, CpError::ModelLoad(_)));
    }

    fn load_tampered(edit: impl FnOnce(&mut serde_json::Value)) -> Result<PriorityModel> {
        let m = PriorityModel::fit(&corpus(), 1.0).unwrap();
        let mut v: serde_json::Value = serde_json::from_str(&m.to_json().unwrap()).unwrap();
        edit(&mut v);
        PriorityModel::from_json(&v.to_string())
    }

    #[test]
    fn test_from_json_rejects_idf_length_mismatch() {
        let r = load_tampered(|v| v["vectorizer"]["idf"] = serde_json::json!([]));
        assert!(matches!(r, Err(CpError::ModelLoad(_))));
    }

    #[test]
    fn test_from_json_rejects_vocabulary_index_out_of_range() {
        let r = load_tampered(|v| v["vectorizer"]["vocabulary"]["window"] = serde_json::json!(999));
        assert!(matches!(r, Err(CpError::ModelLoad(_))));
    }

    #[test]
    fn test_from_json_rejects_empty_classes() {
        let r = load_tampered(|v| {
            v["classifier"]["classes"] = serde_json::json!([]);
            v["classifier"]["class_log_prior"] = serde_json::json!([]);
            v["classifier"]["feature_log_prob"] = serde_json::json!([]);
        });
        assert!(matches!(r, Err(CpError::ModelLoad(_))));
    }

    #[test]
    fn test_from_json_rejects_duplicate_classes() {
        let r = load_tampered(|v| v["classifier"]["classes"] = serde_json::json!(["High", "High", "Low"]));
        assert!(matches!(r, Err(CpError::ModelLoad(_))));
    }

    #[test]
    fn test_from_json_rejects_class_count_mismatch() {
        let r = load_tampered(|v| v["classifier"]["classes"] = serde_json::json!(["High", "Low"]));
        assert!(matches!(r, Err(CpError::ModelLoad(_))));
        let r = load_tampered(|v| {
            v["classifier"]["class_log_prior"].as_array_mut().unwrap().pop();
        });
        assert!(matches!(r, Err(CpError::ModelLoad(_))));
    }

    #[test]
    fn test_from_json_rejects_short_feature_row() {
        let r = load_tampered(|v| {
            v["classifier"]["feature_log_prob"][1].as_array_mut().unwrap().pop();
        });
        assert!(matches!(r, Err(CpError::ModelLoad(_))));
    }

    #[test]
    fn test_fallback_trait() {
        let m = PriorityModel::fit(&corpus(), 1.0).unwrap();
        let f: &dyn FallbackClassifier = &m;
        assert_eq!(f.predict("window shattered"), High);
    }
}
