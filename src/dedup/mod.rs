// Duplicate grouping: clusters labels that normalize to the same key.
//
// Groups are recomputed from the current listing on every run; nothing about
// them is persisted. Within a group the longest label is treated as the
// most descriptive one and kept.

pub mod report;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::labels::normalize::{display_name, normalize_label};

/// Labels sharing one normalized key, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub key: String,
    pub labels: Vec<String>,
}

impl DuplicateGroup {
    /// True when more than one label shares the key.
    pub fn is_duplicate(&self) -> bool {
        self.labels.len() > 1
    }

    /// The label to keep: longest by character count, first seen on ties.
    pub fn canonical(&self) -> &str {
        canonical_index(&self.labels)
            .map(|i| self.labels[i].as_str())
            .unwrap_or("")
    }

    /// Every label except the canonical one.
    pub fn redundant(&self) -> Vec<&str> {
        let keep = canonical_index(&self.labels);
        self.labels
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != keep)
            .map(|(_, l)| l.as_str())
            .collect()
    }
}

/// The grouping key of a label: the normalized final path component.
pub fn group_key(label: &str) -> String {
    normalize_label(display_name(label))
}

/// Pick the canonical label of a set: longest, first seen on ties.
pub fn canonical_label(labels: &[String]) -> Option<&str> {
    canonical_index(labels).map(|i| labels[i].as_str())
}

fn canonical_index(labels: &[String]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, label) in labels.iter().enumerate() {
        let len = label.chars().count();
        match best {
            Some((_, best_len)) if len <= best_len => {}
            _ => best = Some((i, len)),
        }
    }
    best.map(|(i, _)| i)
}

/// Partition labels by grouping key.
///
/// Every occurrence of every label lands in exactly one group. Groups are
/// ordered by key; members keep input order.
pub fn group_labels(labels: &[String]) -> Vec<DuplicateGroup> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for label in labels {
        grouped
            .entry(group_key(label))
            .or_default()
            .push(label.clone());
    }
    grouped
        .into_iter()
        .map(|(key, labels)| DuplicateGroup { key, labels })
        .collect()
}

/// Keys shared by more than one label, mapped to those labels.
pub fn find_duplicates(labels: &[String]) -> BTreeMap<String, Vec<String>> {
    group_labels(labels)
        .into_iter()
        .filter(DuplicateGroup::is_duplicate)
        .map(|g| (g.key, g.labels))
        .collect()
}

/// The cleaned label list: one canonical label per key, sorted.
pub fn consolidate(labels: &[String]) -> Vec<String> {
    let mut kept: Vec<String> = group_labels(labels)
        .iter()
        .map(|g| g.canonical().to_string())
        .collect();
    kept.sort();
    kept
}
