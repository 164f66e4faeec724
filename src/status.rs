// System status display: configured inputs, their contents, report count.

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::deck::csv_io::read_questions;
use crate::labels::reader::read_labels;

/// Snapshot of what the pipeline would work with.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Status {
    pub labels_path: Option<String>,
    pub labels: Option<usize>,
    pub questions_path: Option<String>,
    pub questions: Option<usize>,
    pub batches: Option<usize>,
    pub skipped_rows: Option<usize>,
    pub reports_dir: String,
    pub reports: usize,
}

/// Gather status without failing on missing inputs.
pub fn collect(config: &Config) -> Result<Status> {
    let mut status = Status {
        reports_dir: config.reports_dir.display().to_string(),
        reports: count_reports(&config.reports_dir),
        ..Status::default()
    };

    if let Some(path) = &config.labels_path {
        status.labels_path = Some(path.display().to_string());
        if path.is_file() {
            status.labels = Some(read_labels(path, &config.course_filter)?.len());
        }
    }

    if let Some(path) = &config.questions_path {
        status.questions_path = Some(path.display().to_string());
        if path.is_file() {
            let set = read_questions(path)?;
            let batches: BTreeSet<&str> = set
                .records
                .iter()
                .map(|r| r.batch.trim())
                .filter(|b| !b.is_empty())
                .collect();
            status.questions = Some(set.records.len());
            status.batches = Some(batches.len());
            status.skipped_rows = Some(set.skipped.len());
        }
    }

    Ok(status)
}

/// Display system status to the terminal.
pub fn show(config: &Config) -> Result<()> {
    let status = collect(config)?;

    match (&status.labels_path, status.labels) {
        (None, _) => {
            println!("Labels: not configured");
            println!("  Set STUDYDECK_LABELS or pass --labels");
        }
        (Some(path), None) => println!("Labels: {path} (missing)"),
        (Some(path), Some(count)) => {
            println!("Labels: {path} ({})", file_size(Path::new(path)));
            println!("  {count} lesson labels");
            if !config.course_filter.is_empty() {
                println!("  Course filter: {}", config.course_filter.patterns().join(", "));
            }
        }
    }

    match (&status.questions_path, status.questions) {
        (None, _) => {
            println!("Questions: not configured");
            println!("  Set STUDYDECK_QUESTIONS or pass --questions");
        }
        (Some(path), None) => println!("Questions: {path} (missing)"),
        (Some(path), Some(count)) => {
            println!("Questions: {path} ({})", file_size(Path::new(path)));
            println!(
                "  {count} questions in {} batches",
                status.batches.unwrap_or(0)
            );
            if let Some(skipped) = status.skipped_rows.filter(|s| *s > 0) {
                println!("  {skipped} malformed rows");
            }
        }
    }

    println!("Reports: {} in {}", status.reports, status.reports_dir);
    println!(
        "Thresholds: high >= {:.2}, low >= {:.2}",
        config.thresholds.high, config.thresholds.low
    );

    Ok(())
}

/// Number of `*_report_*.txt` files in the report directory.
fn count_reports(dir: &Path) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.contains("_report_") && name.ends_with(".txt")
        })
        .count()
}

fn file_size(path: &Path) -> String {
    fs::metadata(path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
