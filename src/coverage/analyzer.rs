// Transcript coverage analysis.
//
// For every lesson, score its title keywords against every batch in the
// existing deck and keep the best match. The best score decides whether
// the lesson is already covered, needs a manual look, or is new material
// that should be turned into questions.

use std::collections::BTreeMap;

use serde::Serialize;

use super::batches::BatchIndex;
use super::tier::{CoverageThresholds, CoverageTier};
use crate::labels::category::{Category, Domain};
use crate::labels::Transcript;
use crate::topics::keywords::KeywordSet;
use crate::topics::overlap::overlap_score;
use crate::topics::traits::KeywordExtractor;

/// How many runner-up batches to keep per transcript.
pub const TOP_MATCHES: usize = 3;

/// A batch a transcript overlaps with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchMatch {
    pub batch: String,
    pub score: f64,
    /// Number of shared keywords
    pub shared: usize,
}

/// Coverage result for one transcript.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptCoverage {
    pub transcript: String,
    pub name: String,
    pub category: Category,
    pub domain: Domain,
    pub keywords: KeywordSet,
    /// Best scoring batches, highest first (only scores above zero)
    pub top_matches: Vec<BatchMatch>,
    pub score: f64,
    pub tier: CoverageTier,
}

impl TranscriptCoverage {
    pub fn best_batch(&self) -> Option<&str> {
        self.top_matches.first().map(|m| m.batch.as_str())
    }
}

/// Score a keyword set against every batch, best first.
///
/// Ties keep batch name order. Batches with no shared keyword are left out.
pub fn rank_batches(keywords: &KeywordSet, index: &BatchIndex) -> Vec<BatchMatch> {
    let mut matches: Vec<BatchMatch> = index
        .iter()
        .filter_map(|(batch, batch_keywords)| {
            let score = overlap_score(keywords, batch_keywords);
            (score > 0.0).then(|| BatchMatch {
                batch: batch.to_string(),
                score,
                shared: keywords.intersection(batch_keywords).count(),
            })
        })
        .collect();
    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches
}

/// Assess one transcript against the batch index.
pub fn assess_transcript(
    transcript: &Transcript,
    index: &BatchIndex,
    extractor: &dyn KeywordExtractor,
    thresholds: &CoverageThresholds,
) -> TranscriptCoverage {
    let keywords = extractor.keywords(transcript.title());
    let mut top_matches = rank_batches(&keywords, index);
    top_matches.truncate(TOP_MATCHES);
    let score = top_matches.first().map(|m| m.score).unwrap_or(0.0);

    TranscriptCoverage {
        transcript: transcript.raw.clone(),
        name: transcript.title().to_string(),
        category: transcript.category,
        domain: transcript.domain(),
        keywords,
        top_matches,
        score,
        tier: thresholds.classify(score),
    }
}

/// Coverage results for a whole listing.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub thresholds: CoverageThresholds,
    pub batch_count: usize,
    /// Per-transcript results, ordered by label
    pub items: Vec<TranscriptCoverage>,
}

impl CoverageReport {
    pub fn new(
        thresholds: CoverageThresholds,
        batch_count: usize,
        mut items: Vec<TranscriptCoverage>,
    ) -> Self {
        items.sort_by(|a, b| a.transcript.cmp(&b.transcript));
        Self {
            thresholds,
            batch_count,
            items,
        }
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn in_tier(&self, tier: CoverageTier) -> Vec<&TranscriptCoverage> {
        self.items.iter().filter(|i| i.tier == tier).collect()
    }

    pub fn count(&self, tier: CoverageTier) -> usize {
        self.items.iter().filter(|i| i.tier == tier).count()
    }

    /// Percentage of transcripts in a tier (0.0 for an empty report).
    pub fn pct(&self, tier: CoverageTier) -> f64 {
        if self.items.is_empty() {
            0.0
        } else {
            100.0 * self.count(tier) as f64 / self.items.len() as f64
        }
    }

    /// Covered transcripts grouped by their best batch.
    pub fn covered_by_batch(&self) -> BTreeMap<&str, Vec<&TranscriptCoverage>> {
        let mut grouped: BTreeMap<&str, Vec<&TranscriptCoverage>> = BTreeMap::new();
        for item in self.in_tier(CoverageTier::HighRisk) {
            if let Some(batch) = item.best_batch() {
                grouped.entry(batch).or_default().push(item);
            }
        }
        grouped
    }

    /// New transcripts grouped by category.
    pub fn new_by_category(&self) -> BTreeMap<Category, Vec<&TranscriptCoverage>> {
        let mut grouped: BTreeMap<Category, Vec<&TranscriptCoverage>> = BTreeMap::new();
        for item in self.in_tier(CoverageTier::New) {
            grouped.entry(item.category).or_default().push(item);
        }
        grouped
    }
}

/// Assess every transcript and collect the results.
pub fn analyze_coverage(
    transcripts: &[Transcript],
    index: &BatchIndex,
    extractor: &dyn KeywordExtractor,
    thresholds: &CoverageThresholds,
) -> CoverageReport {
    let items = transcripts
        .iter()
        .map(|t| assess_transcript(t, index, extractor, thresholds))
        .collect();
    CoverageReport::new(*thresholds, index.len(), items)
}
