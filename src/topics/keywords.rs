// Token-based keyword extraction.
//
// Lowercases the text, turns everything that isn't a letter or digit into a
// space, splits on whitespace and keeps tokens longer than `min_len`.
// Stop words are dropped when configured: English function words from the
// `stop-words` crate, plus course vocabulary that appears in nearly every
// lesson title and would otherwise make everything look like a match.

use std::collections::{BTreeSet, HashSet};

use stop_words::{get, LANGUAGE};

use super::traits::KeywordExtractor;

/// A deduplicated, ordered set of keywords.
pub type KeywordSet = BTreeSet<String>;

/// Terms common to almost every lesson in the course.
pub const COURSE_NOISE: &[&str] = &[
    "azure",
    "virtual",
    "network",
    "storage",
    "compute",
    "service",
    "machine",
    "managed",
    "policy",
    "resource",
    "access",
    "identity",
    "monitoring",
    "security",
    "deployment",
    "configuration",
    "operations",
    "management",
];

/// Default minimum token length (tokens must be strictly longer).
pub const DEFAULT_MIN_LEN: usize = 3;

/// Default cap on keywords taken from one text for coverage scoring.
pub const DEFAULT_MAX_KEYWORDS: usize = 10;

/// Tokenizing keyword extractor.
#[derive(Debug, Clone)]
pub struct TokenKeywords {
    /// Tokens must have more than this many characters
    pub min_len: usize,
    /// Keep only the first N distinct keywords of a text
    pub max_keywords: Option<usize>,
    stopwords: HashSet<String>,
}

impl TokenKeywords {
    /// An extractor with no stop words.
    pub fn new(min_len: usize) -> Self {
        Self {
            min_len,
            max_keywords: None,
            stopwords: HashSet::new(),
        }
    }

    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    pub fn with_english_stopwords(self) -> Self {
        let english: Vec<String> = get(LANGUAGE::English);
        self.with_stopwords(english)
    }

    pub fn with_course_noise(self) -> Self {
        self.with_stopwords(COURSE_NOISE)
    }

    pub fn with_max_keywords(mut self, max: usize) -> Self {
        self.max_keywords = Some(max);
        self
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Distinct keywords in order of first appearance.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let cleaned: String = lower
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect();

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for token in cleaned.split_whitespace() {
            if token.chars().count() <= self.min_len || self.is_stopword(token) {
                continue;
            }
            if seen.insert(token) {
                out.push(token.to_string());
                if self.max_keywords.is_some_and(|max| out.len() >= max) {
                    break;
                }
            }
        }
        out
    }
}

impl Default for TokenKeywords {
    /// Minimum length 3 with English and course stop words.
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LEN)
            .with_english_stopwords()
            .with_course_noise()
    }
}

impl KeywordExtractor for TokenKeywords {
    fn keywords(&self, text: &str) -> KeywordSet {
        self.tokens(text).into_iter().collect()
    }
}
