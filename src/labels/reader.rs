// Label list reading: one lesson label per line.
//
// The listing is typically produced by `find . -name '*.wav'`, so lines may
// carry a leading "./". Blank lines and `#` comments are skipped, and an
// optional course filter keeps only lines mentioning the course code.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

/// Case-insensitive substring filter over labels.
///
/// An empty filter accepts every label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelFilter {
    patterns: Vec<String>,
}

impl LabelFilter {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { patterns }
    }

    /// Parse a comma-separated filter such as `az-104,az104`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn accepts(&self, label: &str) -> bool {
        if self.patterns.is_empty() {
            return true;
        }
        let lower = label.to_lowercase();
        self.patterns.iter().any(|p| lower.contains(p.as_str()))
    }
}

/// Extract labels from the text of a listing.
pub fn parse_labels(text: &str, filter: &LabelFilter) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.strip_prefix("./").unwrap_or(line).trim())
        .filter(|line| !line.is_empty() && filter.accepts(line))
        .map(str::to_string)
        .collect()
}

/// Read a label listing from disk.
pub fn read_labels(path: &Path, filter: &LabelFilter) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read label list at {}", path.display()))?;
    let labels = parse_labels(&text, filter);
    debug!(lines = text.lines().count(), "Label list read");
    info!(
        count = labels.len(),
        filter = ?filter.patterns(),
        "Loaded transcript labels"
    );
    Ok(labels)
}
