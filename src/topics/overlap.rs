// Keyword overlap scoring.
//
// The overlap score between two keyword sets is:
//
//   |A ∩ B| / max(|A|, |B|, 1)
//
// This gives 0.0 for no shared keywords (or two empty sets) and 1.0 only
// when the sets are identical. Dividing by the larger side means a short
// lesson title can't look fully covered by a batch with hundreds of
// keywords just because all its words appear somewhere in it.

use super::keywords::KeywordSet;
use super::traits::KeywordExtractor;

/// Symmetric overlap ratio between two keyword sets.
pub fn overlap_score(a: &KeywordSet, b: &KeywordSet) -> f64 {
    let shared = a.intersection(b).count();
    let denominator = a.len().max(b.len()).max(1);
    shared as f64 / denominator as f64
}

/// Fraction of `keywords` found in `reference`.
///
/// Not symmetric. Returns 0.0 when `keywords` is empty.
pub fn containment(keywords: &KeywordSet, reference: &KeywordSet) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }
    let found = keywords.iter().filter(|k| reference.contains(*k)).count();
    found as f64 / keywords.len() as f64
}

/// Overlap score between two raw strings.
pub fn text_overlap(extractor: &dyn KeywordExtractor, a: &str, b: &str) -> f64 {
    overlap_score(&extractor.keywords(a), &extractor.keywords(b))
}
