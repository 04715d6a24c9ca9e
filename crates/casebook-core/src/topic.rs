//! Topic extraction: free text to a normalized set of significant words.
//!
//! Each consumer gets its own extractor variant with its own stop list and
//! minimum token length. The lists are kept as separate constants so tuning
//! one subsystem cannot silently change match behavior in another.

use casebook_types::memory::TopicSet;

/// Stop words for response-memory topic extraction.
const RESPONSE_STOP_WORDS: &[&str] = &[
    "the", "and", "a", "an", "in", "on", "at", "to", "for", "with", "by", "of", "is", "are",
    "was", "were",
];

/// Stop words for conversation-memory topic extraction: the response list
/// plus common conversational filler.
const CONVERSATION_STOP_WORDS: &[&str] = &[
    "the", "and", "a", "an", "in", "on", "at", "to", "for", "with", "by", "of", "is", "are",
    "was", "were", "about", "after", "again", "also", "because", "before", "between", "could",
    "document", "documents", "every", "these", "thing", "think", "those", "through", "their",
    "there", "would",
];

/// Connectives excluded from citation keyword search.
const CITATION_STOP_WORDS: &[&str] = &["the", "and", "or", "of", "in", "on", "at", "to", "a", "an"];

/// Minimum token length for the memory subsystems.
const MEMORY_MIN_TOKEN_LEN: usize = 4;

/// Minimum token length for citation keyword search.
const CITATION_MIN_TOKEN_LEN: usize = 3;

/// Turns free text into a normalized topic set.
///
/// Pure and total: any input, including empty or punctuation-only text,
/// yields a (possibly empty) set without error.
#[derive(Debug, Clone, Copy)]
pub struct TopicExtractor {
    stop_words: &'static [&'static str],
    min_token_len: usize,
}

impl TopicExtractor {
    /// Variant used by the response memory store.
    pub fn response() -> Self {
        Self {
            stop_words: RESPONSE_STOP_WORDS,
            min_token_len: MEMORY_MIN_TOKEN_LEN,
        }
    }

    /// Variant used by the conversation memory store.
    pub fn conversation() -> Self {
        Self {
            stop_words: CONVERSATION_STOP_WORDS,
            min_token_len: MEMORY_MIN_TOKEN_LEN,
        }
    }

    /// Variant used by citation keyword search.
    pub fn citation() -> Self {
        Self {
            stop_words: CITATION_STOP_WORDS,
            min_token_len: CITATION_MIN_TOKEN_LEN,
        }
    }

    /// Extract the deduplicated topic set from `text`.
    ///
    /// Lowercases, strips every character that is not a word character
    /// (alphanumeric or `_`) or whitespace, splits on whitespace runs,
    /// then drops stop words and tokens shorter than the variant minimum.
    pub fn extract(&self, text: &str) -> TopicSet {
        let normalized: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
            .collect();

        normalized
            .split_whitespace()
            .filter(|token| !self.stop_words.iter().any(|stop| stop == token))
            .filter(|token| token.chars().count() >= self.min_token_len)
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(words: &[&str]) -> TopicSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_empty_and_punctuation_only_yield_empty_set() {
        let extractor = TopicExtractor::response();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("!!! ... ,,,").is_empty());
        assert!(extractor.extract("   \t\n  ").is_empty());
    }

    #[test]
    fn test_stop_words_and_short_tokens_dropped() {
        let extractor = TopicExtractor::response();
        let extracted = extractor.extract("The quick brown fox jumps");
        // "the" is stop-listed; "fox" is below the 4-character minimum.
        assert_eq!(extracted, topics(&["quick", "brown", "jumps"]));
    }

    #[test]
    fn test_punctuation_stripped_and_lowercased() {
        let extractor = TopicExtractor::response();
        let extracted = extractor.extract("Breach, of contract? BREACH!");
        assert_eq!(extracted, topics(&["breach", "contract"]));
    }

    #[test]
    fn test_duplicates_collapse() {
        let extractor = TopicExtractor::response();
        let extracted = extractor.extract("estoppel estoppel estoppel");
        assert_eq!(extracted.len(), 1);
        assert!(extracted.contains("estoppel"));
    }

    #[test]
    fn test_underscore_counts_as_word_character() {
        let extractor = TopicExtractor::response();
        let extracted = extractor.extract("res_judicata applies");
        assert!(extracted.contains("res_judicata"));
    }

    #[test]
    fn test_conversation_variant_filters_filler() {
        // Every word here is stop-listed for the conversation variant but
        // significant for the response variant.
        let text = "think about these documents";
        assert!(TopicExtractor::conversation().extract(text).is_empty());
        assert_eq!(
            TopicExtractor::response().extract(text),
            topics(&["think", "about", "these", "documents"])
        );
    }

    #[test]
    fn test_citation_variant_keeps_three_letter_tokens() {
        let extracted = TopicExtractor::citation().extract("Writ of habeas corpus");
        assert_eq!(extracted, topics(&["writ", "habeas", "corpus"]));

        // Three-letter tokens survive for citation search but not memory.
        assert!(TopicExtractor::citation().extract("tax law").contains("tax"));
        assert!(TopicExtractor::response().extract("tax law").is_empty());
    }
}
