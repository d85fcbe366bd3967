//! Word tokenizer.

use regex::Regex;
use std::sync::LazyLock;

// Runs of two or more word characters.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Lowercase `text` and split it into tokens. Single characters are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_PATTERN.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        assert_eq!(tokenize("The Fan is BROKEN!"), vec!["the", "fan", "is", "broken"]);
    }

    #[test]
    fn test_tokenize_drops_single_chars() {
        assert_eq!(tokenize("a b cd 7 42"), vec!["cd", "42"]);
    }

    #[test]
    fn test_tokenize_splits_punctuation() {
        assert_eq!(tokenize("re-evaluation, wi-fi"), vec!["re", "evaluation", "wi", "fi"]);
    }

    #[test]
    fn test_tokenize_unicode() {
        assert_eq!(tokenize("Café très sale"), vec!["café", "très", "sale"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ...  ").is_empty());
    }
}
