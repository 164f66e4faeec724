// Duplication risk assessment: run before a bulk conversion.
//
// Coverage analysis compares a lesson against individual batches. This
// check is coarser: it pools every keyword of every master question and
// asks what fraction of a lesson's title keywords already appear anywhere
// in the deck. It also projects how large the deck will get if the safe
// lessons are converted.

use std::collections::BTreeMap;

use serde::Serialize;

use super::tier::{CoverageThresholds, CoverageTier};
use crate::deck::record::QuestionRecord;
use crate::labels::Transcript;
use crate::topics::keywords::{KeywordSet, TokenKeywords};
use crate::topics::overlap::containment;
use crate::topics::traits::KeywordExtractor;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskOptions {
    /// Master question tokens must be longer than this (default 3)
    pub master_min_len: usize,
    /// Transcript title tokens must be longer than this (default 4)
    pub transcript_min_len: usize,
    /// Expected cards produced per converted transcript (default 2)
    pub cards_per_transcript: usize,
}

impl Default for RiskOptions {
    fn default() -> Self {
        Self {
            master_min_len: 3,
            transcript_min_len: 4,
            cards_per_transcript: 2,
        }
    }
}

/// Everything the master deck says, pooled.
#[derive(Debug, Clone, Default)]
pub struct MasterIndex {
    pub keywords: KeywordSet,
    pub question_count: usize,
    pub batch_count: usize,
    /// Question count per parent batch
    pub parent_counts: BTreeMap<String, usize>,
}

impl MasterIndex {
    pub fn from_records(records: &[QuestionRecord], extractor: &dyn KeywordExtractor) -> Self {
        let mut keywords = KeywordSet::new();
        let mut batches: BTreeMap<&str, usize> = BTreeMap::new();
        let mut parent_counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in records {
            keywords.extend(extractor.keywords(&record.question));
            *batches.entry(record.batch.trim()).or_insert(0) += 1;
            *parent_counts
                .entry(record.parent_batch().to_string())
                .or_insert(0) += 1;
        }
        Self {
            keywords,
            question_count: records.len(),
            batch_count: batches.len(),
            parent_counts,
        }
    }
}

/// Risk result for one transcript.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptRisk {
    pub transcript: String,
    pub name: String,
    pub keywords: usize,
    pub matched: usize,
    pub score: f64,
    pub tier: CoverageTier,
}

/// Result of a duplication risk assessment.
#[derive(Debug, Clone, Serialize)]
pub struct RiskReport {
    pub thresholds: CoverageThresholds,
    pub options: RiskOptions,
    pub master_questions: usize,
    pub master_batches: usize,
    pub parent_counts: BTreeMap<String, usize>,
    pub items: Vec<TranscriptRisk>,
}

impl RiskReport {
    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn count(&self, tier: CoverageTier) -> usize {
        self.items.iter().filter(|i| i.tier == tier).count()
    }

    pub fn pct(&self, tier: CoverageTier) -> f64 {
        if self.items.is_empty() {
            0.0
        } else {
            100.0 * self.count(tier) as f64 / self.items.len() as f64
        }
    }

    /// High-risk transcripts, highest score first.
    pub fn high_risk(&self) -> Vec<&TranscriptRisk> {
        let mut high: Vec<&TranscriptRisk> = self
            .items
            .iter()
            .filter(|i| i.tier == CoverageTier::HighRisk)
            .collect();
        high.sort_by(|a, b| b.score.total_cmp(&a.score));
        high
    }

    /// Transcripts that can be converted without much duplication.
    pub fn safe_count(&self) -> usize {
        self.total() - self.count(CoverageTier::HighRisk)
    }

    /// Deck size if only the safe transcripts are converted.
    pub fn conservative_total(&self) -> usize {
        self.master_questions + self.safe_count() * self.options.cards_per_transcript
    }

    /// Deck size if every transcript is converted.
    pub fn optimistic_total(&self) -> usize {
        self.master_questions + self.total() * self.options.cards_per_transcript
    }
}

/// Assess duplication risk for a set of transcripts against the master deck.
pub fn assess_risk(
    transcripts: &[Transcript],
    master: &[QuestionRecord],
    thresholds: &CoverageThresholds,
    options: RiskOptions,
) -> RiskReport {
    let index = MasterIndex::from_records(master, &TokenKeywords::new(options.master_min_len));
    let title_keywords = TokenKeywords::new(options.transcript_min_len);

    let items = transcripts
        .iter()
        .map(|t| {
            let keywords = title_keywords.keywords(t.title());
            let score = containment(&keywords, &index.keywords);
            TranscriptRisk {
                transcript: t.raw.clone(),
                name: t.title().to_string(),
                keywords: keywords.len(),
                matched: keywords.iter().filter(|k| index.keywords.contains(*k)).count(),
                score,
                tier: thresholds.classify(score),
            }
        })
        .collect();

    RiskReport {
        thresholds: *thresholds,
        options,
        master_questions: index.question_count,
        master_batches: index.batch_count,
        parent_counts: index.parent_counts,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::record::Correct;

    fn q(question: &str, batch: &str) -> QuestionRecord {
        QuestionRecord {
            question: question.to_string(),
            choice_a: "a".to_string(),
            choice_b: "b".to_string(),
            choice_c: "c".to_string(),
            choice_d: "d".to_string(),
            correct: Correct::A,
            explanation: String::new(),
            tags: String::new(),
            source: String::new(),
            batch: batch.to_string(),
        }
    }

    fn master() -> Vec<QuestionRecord> {
        vec![
            q("How does global peering route traffic?", "Networking::Peering"),
            q("Which gateway supports transit routing?", "Networking::Gateways"),
            q("When should blobs move to archive?", "Storage::Tiers"),
        ]
    }

    #[test]
    fn test_master_index() {
        let index = MasterIndex::from_records(&master(), &TokenKeywords::new(3));
        assert_eq!(index.question_count, 3);
        assert_eq!(index.batch_count, 3);
        assert_eq!(index.parent_counts["Networking"], 2);
        assert!(index.keywords.contains("peering"));
    }

    #[test]
    fn test_risk_tiers_and_projection() {
        let transcripts = vec![
            Transcript::new("Global Peering Transit.wav"),
            Transcript::new("Kubernetes Operators Explained.wav"),
            Transcript::new("Archive Routing Kubernetes.wav"),
        ];
        let report = assess_risk(
            &transcripts,
            &master(),
            &CoverageThresholds::default(),
            RiskOptions::default(),
        );
        assert_eq!(report.items[0].tier, CoverageTier::HighRisk);
        assert_eq!(report.items[0].matched, 3);
        assert_eq!(report.items[1].tier, CoverageTier::New);
        // "archive" and "routing" of three keywords
        assert_eq!(report.items[2].tier, CoverageTier::Ambiguous);

        assert_eq!(report.safe_count(), 2);
        assert_eq!(report.conservative_total(), 3 + 2 * 2);
        assert_eq!(report.optimistic_total(), 3 + 3 * 2);
        assert_eq!(report.high_risk().len(), 1);
    }

    #[test]
    fn test_short_title_has_no_keywords() {
        let report = assess_risk(
            &[Transcript::new("VNet.wav")],
            &master(),
            &CoverageThresholds::default(),
            RiskOptions::default(),
        );
        assert_eq!(report.items[0].keywords, 0);
        assert_eq!(report.items[0].tier, CoverageTier::New);
    }
}
