//! Multinomial Naive Bayes over TF-IDF features.

use crate::tfidf::SparseVector;
use cp_core::{CpError, Priority, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    alpha: f64,
    /// Classes seen during training, in [`Priority::ALL`] order.
    classes: Vec<Priority>,
    class_log_prior: Vec<f64>,
    /// `feature_log_prob[class][feature]`
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    pub fn fit(xs: &[SparseVector], ys: &[Priority], n_features: usize, alpha: f64) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(CpError::Corpus(format!(
                "{} feature rows but {} labels",
                xs.len(),
                ys.len()
            )));
        }
        if xs.is_empty() {
            return Err(CpError::EmptyCorpus);
        }

        let mut class_count = [0usize; 3];
        let mut feature_count = vec![vec![0.0f64; n_features]; 3];
        for (x, y) in xs.iter().zip(ys) {
            let c = y.index();
            class_count[c] += 1;
            for &(j, w) in x {
                feature_count[c][j] += w;
            }
        }

        let n = xs.len() as f64;
        let mut classes = Vec::new();
        let mut class_log_prior = Vec::new();
        let mut feature_log_prob = Vec::new();
        for p in Priority::ALL {
            let c = p.index();
            if class_count[c] == 0 {
                continue;
            }
            let total: f64 = feature_count[c].iter().sum();
            let denom = (total + alpha * n_features as f64).ln();
            classes.push(p);
            class_log_prior.push((class_count[c] as f64 / n).ln());
            feature_log_prob.push(feature_count[c].iter().map(|fc| (fc + alpha).ln() - denom).collect());
        }

        Ok(Self { alpha, classes, class_log_prior, feature_log_prob })
    }

    /// Joint log-likelihood per trained class.
    pub fn joint_log_likelihood(&self, x: &SparseVector) -> Vec<(Priority, f64)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(c, &p)| {
                let flp = &self.feature_log_prob[c];
                let score = self.class_log_prior[c]
                    + x.iter().filter(|(j, _)| *j < flp.len()).map(|&(j, w)| w * flp[j]).sum::<f64>();
                (p, score)
            })
            .collect()
    }

    /// Most probable class. Exact ties go to the label that sorts first by
    /// name (High, Low, Medium), the order sorted string labels give.
    pub fn predict(&self, x: &SparseVector) -> Priority {
        let mut best: Option<(Priority, f64)> = None;
        for (p, score) in self.joint_log_likelihood(x) {
            let better = match best {
                None => true,
                Some((bp, s)) => score > s || (score == s && p.as_str() < bp.as_str()),
            };
            if better {
                best = Some((p, score));
            }
        }
        // `fit` and `validate` both guarantee at least one class.
        best.map(|(p, _)| p).unwrap_or(Priority::High)
    }

    /// Check a deserialized classifier against the vectorizer's feature count.
    pub fn validate(&self, n_features: usize) -> Result<()> {
        if self.classes.is_empty() {
            return Err(CpError::ModelLoad("classifier has no classes".into()));
        }
        for (i, c) in self.classes.iter().enumerate() {
            if self.classes[..i].contains(c) {
                return Err(CpError::ModelLoad(format!("class {c} listed twice")));
            }
        }
        if self.class_log_prior.len() != self.classes.len() || self.feature_log_prob.len() != self.classes.len() {
            return Err(CpError::ModelLoad(format!(
                "{} classes but {} priors and {} feature rows",
                self.classes.len(),
                self.class_log_prior.len(),
                self.feature_log_prob.len()
            )));
        }
        if let Some((c, row)) = self.classes.iter().zip(&self.feature_log_prob).find(|(_, r)| r.len() != n_features) {
            return Err(CpError::ModelLoad(format!(
                "class {c} has {} feature weights, vocabulary size is {n_features}",
                row.len()
            )));
        }
        Ok(())
    }

    pub fn classes(&self) -> &[Priority] {
        &self.classes
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Priority::*;

    // features: 0 = "exam", 1 = "fan", 2 = "water"
    fn toy() -> MultinomialNb {
        let xs = vec![
            vec![(0, 1.0)],
            vec![(0, 0.8), (2, 0.6)],
            vec![(1, 1.0)],
            vec![(1, 1.0)],
            vec![(2, 1.0)],
            vec![(1, 0.6), (2, 0.8)],
        ];
        let ys = vec![High, High, Low, Low, Medium, Medium];
        MultinomialNb::fit(&xs, &ys, 3, 1.0).unwrap()
    }

    #[test]
    fn test_predict_by_dominant_feature() {
        let nb = toy();
        assert_eq!(nb.predict(&vec![(0, 1.0)]), High);
        assert_eq!(nb.predict(&vec![(1, 1.0)]), Low);
        assert_eq!(nb.predict(&vec![(2, 1.0)]), Medium);
    }

    #[test]
    fn test_empty_vector_uses_prior() {
        // All three priors tie (2 rows each); High comes first.
        assert_eq!(toy().predict(&vec![]), High);
    }

    #[test]
    fn test_tie_prefers_label_order() {
        let nb = MultinomialNb::fit(&[vec![(0, 1.0)], vec![(0, 1.0)]], &[Medium, Low], 1, 1.0).unwrap();
        assert_eq!(nb.predict(&vec![]), Low);
        assert_eq!(nb.predict(&vec![(0, 1.0)]), Low);
    }

    #[test]
    fn test_validate_trained() {
        assert!(toy().validate(3).is_ok());
        assert!(matches!(toy().validate(4), Err(CpError::ModelLoad(_))));
    }

    #[test]
    fn test_class_log_prior() {
        let nb = toy();
        let jll = nb.joint_log_likelihood(&vec![]);
        assert_eq!(jll.len(), 3);
        for (_, score) in jll {
            assert!((score - (1.0f64 / 3.0).ln()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_feature_log_prob_smoothing() {
        let nb = toy();
        // Low: counts [0, 2, 0], total 2, denom 2 + 3
        let low = nb.classes().iter().position(|p| *p == Low).unwrap();
        assert!((nb.feature_log_prob[low][1] - (3.0f64 / 5.0).ln()).abs() < 1e-12);
        assert!((nb.feature_log_prob[low][0] - (1.0f64 / 5.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_absent_class_never_predicted() {
        let nb = MultinomialNb::fit(&[vec![(0, 1.0)], vec![(1, 1.0)]], &[High, Low], 2, 1.0).unwrap();
        assert_eq!(nb.classes(), &[High, Low]);
        for x in [vec![], vec![(0, 1.0)], vec![(1, 1.0)]] {
            assert_ne!(nb.predict(&x), Medium);
        }
    }

    #[test]
    fn test_fit_rejects_empty() {
        assert!(matches!(MultinomialNb::fit(&[], &[], 0, 1.0), Err(CpError::EmptyCorpus)));
    }

    #[test]
    fn test_fit_rejects_length_mismatch() {
        assert!(matches!(MultinomialNb::fit(&[vec![]], &[], 0, 1.0), Err(CpError::Corpus(_))));
    }
}
