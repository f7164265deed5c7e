//! Decides whether a search box entry reads as natural language

use crate::matching::dictionary::{SEMANTIC_DICTIONARY, SEMANTIC_INDICATORS};

/// Classify a query as semantic (natural language) or literal.
///
/// Needs at least two whitespace-separated tokens, plus either an indicator
/// word or a full dictionary key somewhere in the query. A lone dictionary
/// word such as `"senior"` therefore stays literal.
pub fn is_semantic_query(query: &str) -> bool {
    let lowered = query.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    if words.len() < 2 {
        return false;
    }

    words.iter().any(|word| SEMANTIC_INDICATORS.contains(word))
        || SEMANTIC_DICTIONARY
            .iter()
            .any(|entry| lowered.contains(entry.key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word_is_literal() {
        assert!(!is_semantic_query("solar"));
        assert!(!is_semantic_query("senior"));
        assert!(!is_semantic_query(""));
        assert!(!is_semantic_query("   "));
    }

    #[test]
    fn test_dictionary_key_is_semantic() {
        assert!(is_semantic_query("solar project engineer"));
        assert!(is_semantic_query("Renewable Energy"));
    }

    #[test]
    fn test_indicator_words_are_semantic() {
        assert!(is_semantic_query("senior developer"));
        assert!(is_semantic_query("someone with python"));
    }

    #[test]
    fn test_plain_multi_word_is_literal() {
        assert!(!is_semantic_query("maya patel"));
        assert!(!is_semantic_query("berlin germany"));
    }

    #[test]
    fn test_unicode_input_does_not_panic() {
        assert!(!is_semantic_query("İstanbul 東京"));
        assert!(is_semantic_query("ingénieur with 太陽光"));
    }
}
