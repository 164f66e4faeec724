// Keyword extractor trait: swap-ready abstraction.
//
// Coverage and risk scoring only need "a set of keywords for this text".
// The default implementation is plain tokenization; a stemming or
// TF-IDF based extractor can replace it without touching the scorers.

use super::keywords::KeywordSet;

/// Trait for turning free text into a keyword set.
pub trait KeywordExtractor {
    fn keywords(&self, text: &str) -> KeywordSet;
}
