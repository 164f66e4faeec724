// Duplicate consolidation result: what to keep, what to drop.
//
// Also produces the transcript backlog: one stub row per kept lesson that
// the question-writing step later replaces with real cards.

use serde::{Deserialize, Serialize};

use super::{group_labels, DuplicateGroup};
use crate::labels::category::Category;
use crate::labels::normalize::{display_name, strip_extension};

/// One duplicate cluster with its keep/remove recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateEntry {
    pub key: String,
    pub category: Category,
    pub labels: Vec<String>,
    pub keep: String,
    pub remove: Vec<String>,
}

/// Result of a duplicate consolidation run.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateReport {
    pub total_labels: usize,
    /// Only groups with more than one member, ordered by key
    pub groups: Vec<DuplicateEntry>,
    /// Canonical labels of every key, sorted
    pub consolidated: Vec<String>,
}

impl DuplicateReport {
    /// Analyze a label listing.
    pub fn build(labels: &[String]) -> Self {
        let all_groups = group_labels(labels);
        let groups = all_groups
            .iter()
            .filter(|g| g.is_duplicate())
            .map(DuplicateEntry::from_group)
            .collect();

        let mut consolidated: Vec<String> = all_groups
            .iter()
            .map(|g| g.canonical().to_string())
            .collect();
        consolidated.sort();

        Self {
            total_labels: labels.len(),
            groups,
            consolidated,
        }
    }

    /// Labels that would be dropped by consolidation.
    pub fn duplicate_instances(&self) -> usize {
        self.groups.iter().map(|g| g.remove.len()).sum()
    }

    /// Labels left after consolidation.
    pub fn unique_after(&self) -> usize {
        self.total_labels - self.duplicate_instances()
    }
}

impl DuplicateEntry {
    fn from_group(group: &DuplicateGroup) -> Self {
        let keep = group.canonical().to_string();
        Self {
            key: group.key.clone(),
            category: Category::from_text(display_name(&keep)),
            labels: group.labels.clone(),
            remove: group.redundant().into_iter().map(str::to_string).collect(),
            keep,
        }
    }
}

/// Placeholder row for a lesson that still needs questions written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BacklogRow {
    pub batch: String,
    pub question: String,
    pub answer: String,
}

/// Batch prefix for backlog rows.
pub const BACKLOG_BATCH_PREFIX: &str = "Transcript Conversion";

/// Build backlog rows for a consolidated label list.
pub fn backlog_rows(labels: &[String]) -> Vec<BacklogRow> {
    let mut rows: Vec<BacklogRow> = labels
        .iter()
        .map(|label| {
            let name = display_name(label);
            let category = Category::from_text(name);
            BacklogRow {
                batch: format!("{BACKLOG_BATCH_PREFIX}::{category}"),
                question: format!("Source: {}", strip_extension(name)),
                answer: "Transcript file to be processed into deck questions".to_string(),
            }
        })
        .collect();
    rows.sort_by(|a, b| a.batch.cmp(&b.batch).then_with(|| a.question.cmp(&b.question)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_report_counts() {
        let input = labels(&[
            "AZ-104 Storage Overview.wav",
            "AZ-104_Storage_Overview_(1).wav",
            "AZ-104 Storage Overview (2).wav",
            "AZ-104 VNet Peering.wav",
            "AZ-104 VNet-Peering.mp4",
            "AZ-104 Key Vault.wav",
        ]);
        let report = DuplicateReport::build(&input);
        assert_eq!(report.total_labels, 6);
        assert_eq!(report.groups.len(), 2);
        assert_eq!(report.duplicate_instances(), 3);
        assert_eq!(report.unique_after(), 3);
        assert_eq!(report.consolidated.len(), 3);

        let storage = report
            .groups
            .iter()
            .find(|g| g.key == "az 104 storage overview")
            .unwrap();
        assert_eq!(storage.category, Category::Storage);
        assert_eq!(storage.keep, "AZ-104_Storage_Overview_(1).wav");
        assert_eq!(storage.remove.len(), 2);
    }

    #[test]
    fn test_no_duplicates() {
        let report = DuplicateReport::build(&labels(&["One.wav", "Two.wav"]));
        assert!(report.groups.is_empty());
        assert_eq!(report.unique_after(), 2);
    }

    #[test]
    fn test_backlog_rows() {
        let rows = backlog_rows(&labels(&["dir/Azure Firewall Rules.wav", "Blob Tiers.m4a"]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].batch, "Transcript Conversion::Networking");
        assert_eq!(rows[0].question, "Source: Azure Firewall Rules");
        assert_eq!(rows[1].batch, "Transcript Conversion::Storage");
        assert_eq!(rows[1].question, "Source: Blob Tiers");
    }
}
