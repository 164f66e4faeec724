// Merge pipeline: append converted transcript questions to the master CSV.
//
// The master file is rewritten in place, so the caller is expected to
// confirm with the user first. A master that doesn't load cleanly is never
// rewritten: its unreadable rows would be lost. The merge report is written
// before the master so a failed report leaves the master untouched.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{info, warn};

use crate::deck::csv_io::{read_questions, write_questions, QuestionSet};
use crate::deck::merge::{merge_questions, MergeOptions, MergeSummary};
use crate::output::report::MergeReportText;
use crate::output::{report_timestamp, write_report};

#[derive(Debug, Clone, Serialize)]
pub struct MergeOutput {
    pub summary: MergeSummary,
    pub master_path: PathBuf,
    pub report_path: PathBuf,
    /// Malformed rows dropped from the converted file
    pub skipped_rows: usize,
}

/// Merge `converted_path` into `master_path` and write a merge report.
pub fn run(
    master_path: &Path,
    converted_path: &Path,
    options: MergeOptions,
    out_dir: &Path,
    at: &DateTime<Local>,
) -> Result<MergeOutput> {
    let master = read_questions(master_path)?;
    ensure_rewritable(master_path, &master)?;

    let converted = read_questions(converted_path)?;
    let skipped_rows = converted.skipped.len();
    if skipped_rows > 0 {
        warn!(skipped_rows, "Malformed converted rows will not be merged");
    }

    let outcome = merge_questions(master.records, converted.records, options);

    let generated = report_timestamp(at);
    let text = MergeReportText {
        summary: &outcome.summary,
        generated: &generated,
    }
    .to_string();
    let report_path = write_report(out_dir, "merge", &text, at)?;

    write_questions(master_path, &outcome.records)?;
    info!(
        added = outcome.summary.added,
        total = outcome.summary.total,
        "Master deck updated"
    );

    Ok(MergeOutput {
        summary: outcome.summary,
        master_path: master_path.to_path_buf(),
        report_path,
        skipped_rows,
    })
}

/// Refuse to rewrite a master file that did not load completely.
fn ensure_rewritable(path: &Path, master: &QuestionSet) -> Result<()> {
    if !master.missing_columns.is_empty() {
        bail!(
            "Master CSV {} is missing required columns: {}. Fix the header before merging.",
            path.display(),
            master.missing_columns.join(", ")
        );
    }
    if !master.skipped.is_empty() {
        let lines: Vec<String> = master.skipped.iter().map(|r| r.line.to_string()).collect();
        bail!(
            "Master CSV {} has {} unreadable rows (lines {}). Fix them before merging.",
            path.display(),
            master.skipped.len(),
            lines.join(", ")
        );
    }
    Ok(())
}
