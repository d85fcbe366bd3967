//! TF-IDF vectorizer.
//!
//! Raw term counts weighted by smoothed inverse document frequency
//! `ln((1 + n) / (1 + df)) + 1`, then L2-normalized per document.

use crate::tokenize::tokenize;
use cp_core::{CpError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Sparse document vector: `(feature index, weight)` sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and IDF weights from `docs`.
    pub fn fit<S: AsRef<str>>(docs: &[S]) -> Self {
        let n = docs.len() as f64;
        let mut df: BTreeMap<String, usize> = BTreeMap::new();
        for doc in docs {
            let terms: BTreeSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for t in terms {
                *df.entry(t).or_insert(0) += 1;
            }
        }

        // BTreeMap iteration is sorted, so indices follow term order.
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(df.len());
        for (i, (term, count)) in df.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + count as f64)).ln() + 1.0);
            vocabulary.insert(term, i);
        }
        Self { vocabulary, idf }
    }

    /// Vectorize one document. Unknown terms are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts.into_iter().map(|(i, tf)| (i, tf * self.idf[i])).collect();
        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in vector.iter_mut() {
                *w /= norm;
            }
        }
        vector
    }

    pub fn transform_all<S: AsRef<str>>(&self, docs: &[S]) -> Vec<SparseVector> {
        docs.iter().map(|d| self.transform(d.as_ref())).collect()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.index_of(term).map(|i| self.idf[i])
    }

    /// Check a deserialized vectorizer: one IDF weight per term, every
    /// vocabulary index inside the weight table.
    pub fn validate(&self) -> Result<()> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(CpError::ModelLoad(format!(
                "vectorizer has {} idf weights for {} terms",
                self.idf.len(),
                self.vocabulary.len()
            )));
        }
        if let Some((term, idx)) = self.vocabulary.iter().find(|(_, i)| **i >= self.idf.len()) {
            return Err(CpError::ModelLoad(format!(
                "term {term:?} has index {idx}, vocabulary size is {}",
                self.idf.len()
            )));
        }
        Ok(())
    }
}
