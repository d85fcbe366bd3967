use crate::types::Priority;

/// Statistical model consulted when no rule fires.
///
/// Implementations must be deterministic for a fixed artifact and total over
/// [`Priority::ALL`]: every input, including the empty string, gets a label.
pub trait FallbackClassifier: Send + Sync {
    fn predict(&self, text: &str) -> Priority;
}

impl<T: FallbackClassifier + ?Sized> FallbackClassifier for std::sync::Arc<T> {
    fn predict(&self, text: &str) -> Priority {
        (**self).predict(text)
    }
}
