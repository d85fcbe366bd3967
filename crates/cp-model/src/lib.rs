//! Statistical fallback classifier: TF-IDF features + multinomial Naive Bayes.

pub mod model;
pub mod naive_bayes;
pub mod tfidf;
pub mod tokenize;

pub use model::{ModelInfo, PriorityModel, ARTIFACT_FORMAT};
pub use naive_bayes::MultinomialNb;
pub use tfidf::{SparseVector, TfidfVectorizer};
pub use tokenize::tokenize;
