// Output formatting: terminal display and report generation.

pub mod report;
pub mod terminal;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::info;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Human-readable timestamp used inside reports.
pub fn report_timestamp(at: &DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// File name for a report of `kind` generated at `at`.
pub fn report_file_name(kind: &str, at: &DateTime<Local>) -> String {
    format!("{kind}_report_{}.txt", at.format("%Y%m%d_%H%M%S"))
}

/// Write a rendered report into `dir`, creating it if needed.
pub fn write_report(dir: &Path, kind: &str, contents: &str, at: &DateTime<Local>) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory {}", dir.display()))?;
    let path = dir.join(report_file_name(kind, at));
    fs::write(&path, contents)
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    info!(path = %path.display(), kind, "Report written");
    Ok(path)
}

/// Write one line per item.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let mut contents = lines.join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
