// Merge converted question sets into the master deck.
//
// The converted rows are appended after the master rows. Unless told
// otherwise, a converted question whose text matches one already present
// (ignoring case, punctuation and spacing) is dropped, so re-running a
// conversion doesn't double the deck.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{debug, info};

use super::record::QuestionRecord;

#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Append converted questions even when the master already has them
    pub keep_duplicates: bool,
}

/// Counts describing one merge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeSummary {
    pub original: usize,
    pub converted: usize,
    pub added: usize,
    pub skipped_duplicates: usize,
    pub total: usize,
    /// Questions added per parent batch
    pub added_by_parent: BTreeMap<String, usize>,
}

impl MergeSummary {
    /// Added questions as a percentage of the original deck.
    pub fn expansion_pct(&self) -> f64 {
        if self.original == 0 {
            0.0
        } else {
            100.0 * self.added as f64 / self.original as f64
        }
    }
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub records: Vec<QuestionRecord>,
    pub summary: MergeSummary,
}

/// Comparison key for question text: lowercase words joined by spaces.
pub fn question_key(question: &str) -> String {
    question
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Append `converted` to `master`.
pub fn merge_questions(
    master: Vec<QuestionRecord>,
    converted: Vec<QuestionRecord>,
    options: MergeOptions,
) -> MergeOutcome {
    let original = master.len();
    let converted_count = converted.len();

    let mut seen: HashSet<String> = master.iter().map(|r| question_key(&r.question)).collect();
    let mut records = master;
    let mut added_by_parent: BTreeMap<String, usize> = BTreeMap::new();
    let mut skipped_duplicates = 0;

    for record in converted {
        let key = question_key(&record.question);
        if !options.keep_duplicates && !seen.insert(key) {
            debug!(question = %record.question, "Skipping duplicate converted question");
            skipped_duplicates += 1;
            continue;
        }
        *added_by_parent
            .entry(record.parent_batch().to_string())
            .or_insert(0) += 1;
        records.push(record);
    }

    let added = records.len() - original;
    info!(original, added, skipped_duplicates, "Merged question sets");

    MergeOutcome {
        summary: MergeSummary {
            original,
            converted: converted_count,
            added,
            skipped_duplicates,
            total: records.len(),
            added_by_parent,
        },
        records,
    }
}
