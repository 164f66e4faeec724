// Question CSV reading and writing.
//
// Reading is forgiving at the row level: a row that is missing a required
// column or has an invalid `Correct` value is logged, counted and skipped,
// and the rest of the file still loads. Re-runs recompute everything from
// the source files, so a skipped row costs nothing beyond the warning.
// Anything that writes a file back over its source must check
// `QuestionSet::is_complete` first.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use super::record::QuestionRecord;

/// Column order of every question CSV.
pub const HEADER: [&str; 10] = [
    "Question",
    "ChoiceA",
    "ChoiceB",
    "ChoiceC",
    "ChoiceD",
    "Correct",
    "Explanation",
    "Tags",
    "Source",
    "Batch",
];

/// Columns a row can't be loaded without.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Question", "ChoiceA", "ChoiceB", "ChoiceC", "ChoiceD", "Correct",
];

/// A row that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    /// 1-based line number in the file (the header is line 1)
    pub line: u64,
    pub reason: String,
}

/// Records loaded from one CSV plus the rows that were skipped.
#[derive(Debug, Clone, Default)]
pub struct QuestionSet {
    pub records: Vec<QuestionRecord>,
    pub skipped: Vec<SkippedRow>,
    /// Required columns absent from the header
    pub missing_columns: Vec<String>,
}

impl QuestionSet {
    /// True when every row of the file loaded and the header is complete.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.missing_columns.is_empty()
    }
}

/// Read a question CSV from disk.
pub fn read_questions(path: &Path) -> Result<QuestionSet> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open question CSV at {}", path.display()))?;
    let set = parse_questions(file)
        .with_context(|| format!("Failed to read question CSV at {}", path.display()))?;
    info!(
        path = %path.display(),
        records = set.records.len(),
        skipped = set.skipped.len(),
        "Loaded question CSV"
    );
    Ok(set)
}

/// Parse question records from any reader with a header row.
pub fn parse_questions<R: Read>(reader: R) -> Result<QuestionSet> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers().context("Question CSV has no header row")?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h.trim() == *col))
        .collect();
    if !missing.is_empty() {
        warn!(?missing, "Question CSV header is missing required columns; rows will be skipped");
    }

    let mut set = QuestionSet {
        missing_columns: missing.iter().map(|c| c.to_string()).collect(),
        ..QuestionSet::default()
    };
    for (i, row) in rdr.deserialize::<QuestionRecord>().enumerate() {
        match row {
            Ok(record) => set.records.push(record),
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(i as u64 + 2);
                warn!(line, error = %e, "Skipping malformed question row");
                set.skipped.push(SkippedRow {
                    line,
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(set)
}

/// Write records to disk, always with the full header.
pub fn write_questions(path: &Path, records: &[QuestionRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create question CSV at {}", path.display()))?;
    write_questions_to(file, records)
        .with_context(|| format!("Failed to write question CSV at {}", path.display()))?;
    info!(path = %path.display(), records = records.len(), "Wrote question CSV");
    Ok(())
}

/// Write records with the full header to any writer.
pub fn write_questions_to<W: Write>(writer: W, records: &[QuestionRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);
    wtr.write_record(HEADER)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
