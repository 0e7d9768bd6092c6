//! Lexical diversity over meaningful (non stop-word) tokens.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Common English stop words excluded from the diversity ratio.
pub const STOPWORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "am", "was", "were", "be", "been", "being", "of", "in", "to",
    "for", "with", "on", "at", "by", "about", "from", "into", "through", "during", "before",
    "after", "above", "below", "up", "down", "out", "over", "under", "again", "further", "then",
    "once", "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few",
    "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
    "than", "too", "very", "s", "t", "can", "will", "just", "don", "should", "now", "and", "but",
    "or", "because", "as", "until", "while", "against", "between", "off",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());

const STRIPPED_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '"', '\'', '(', ')', '{', '}', '[', ']',
];

/// Lower-cased tokens with punctuation stripped and stop words removed.
pub fn meaningful_tokens(text: &str) -> Vec<String> {
    let cleaned = text
        .trim()
        .to_lowercase()
        .replace(STRIPPED_PUNCTUATION, " ");
    cleaned
        .split_whitespace()
        .filter(|token| !STOPWORD_SET.contains(token))
        .map(str::to_string)
        .collect()
}

/// Distinct meaningful tokens over total meaningful tokens, in `[0, 1]`.
///
/// Returns 0 when no meaningful token remains.
pub fn word_diversity(text: &str) -> f64 {
    let tokens = meaningful_tokens(text);
    if tokens.is_empty() {
        return 0.0;
    }
    let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    (unique.len() as f64 / tokens.len() as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::{meaningful_tokens, word_diversity};

    #[test]
    fn contractions_split_into_stop_words() {
        assert!(meaningful_tokens("don't").is_empty());
    }

    #[test]
    fn repeated_content_word_lowers_diversity() {
        let diversity = word_diversity("moon moon stars");
        assert!((diversity - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn punctuation_does_not_create_tokens() {
        assert_eq!(meaningful_tokens("(moon), [sky]!"), vec!["moon", "sky"]);
    }
}
