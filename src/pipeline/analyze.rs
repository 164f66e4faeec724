// Analyze pipeline: duplicate consolidation followed by deck coverage.
//
// Reads the label listing and the master question CSV, groups duplicate
// lessons, then scores each kept lesson against the deck's batches. Writes
// a duplicate report, a coverage report, the consolidated label list and
// the transcript backlog into the output directory.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use crate::coverage::analyzer::{assess_transcript, CoverageReport};
use crate::coverage::batches::BatchIndex;
use crate::coverage::tier::{CoverageThresholds, CoverageTier};
use crate::dedup::report::{backlog_rows, BacklogRow, DuplicateReport};
use crate::deck::csv_io::read_questions;
use crate::labels::reader::{read_labels, LabelFilter};
use crate::labels::transcripts_from;
use crate::output::report::{CoverageReportText, DuplicateReportText};
use crate::output::{report_timestamp, write_lines, write_report};
use crate::topics::traits::KeywordExtractor;

/// Cleaned label list written next to the reports.
pub const CONSOLIDATED_LIST: &str = "audio_list_consolidated.txt";
/// Stub rows for lessons that still need questions.
pub const BACKLOG_CSV: &str = "transcript_backlog.csv";

/// Files and results of a duplicate consolidation.
#[derive(Debug, Clone, Serialize)]
pub struct DedupOutput {
    pub report: DuplicateReport,
    pub report_path: PathBuf,
    pub consolidated_path: PathBuf,
    pub backlog_path: PathBuf,
}

/// Files and results of a coverage analysis.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageOutput {
    pub report: CoverageReport,
    pub report_path: PathBuf,
    /// Rows read from the question CSV that were skipped as malformed
    pub skipped_rows: usize,
}

/// Both halves of a full analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeOutput {
    pub dedup: DedupOutput,
    pub coverage: CoverageOutput,
}

/// Group duplicate labels and write the consolidation outputs.
pub fn run_dedup(labels: &[String], out_dir: &Path, at: &DateTime<Local>) -> Result<DedupOutput> {
    let report = DuplicateReport::build(labels);
    info!(
        labels = report.total_labels,
        groups = report.groups.len(),
        kept = report.unique_after(),
        "Duplicate consolidation complete"
    );

    let generated = report_timestamp(at);
    let text = DuplicateReportText {
        report: &report,
        generated: &generated,
    }
    .to_string();
    let report_path = write_report(out_dir, "duplicate", &text, at)?;

    let consolidated_path = out_dir.join(CONSOLIDATED_LIST);
    write_lines(&consolidated_path, &report.consolidated)?;

    let backlog_path = out_dir.join(BACKLOG_CSV);
    write_backlog(&backlog_path, &backlog_rows(&report.consolidated))?;

    Ok(DedupOutput {
        report,
        report_path,
        consolidated_path,
        backlog_path,
    })
}

/// Score labels against the master deck and write the coverage report.
pub fn run_coverage(
    labels: &[String],
    questions_path: &Path,
    extractor: &dyn KeywordExtractor,
    thresholds: &CoverageThresholds,
    out_dir: &Path,
    at: &DateTime<Local>,
) -> Result<CoverageOutput> {
    let master = read_questions(questions_path)?;
    let index = BatchIndex::from_records(&master.records, extractor);
    info!(batches = index.len(), "Built batch keyword index");

    let transcripts = transcripts_from(labels);
    let pb = super::progress_bar(transcripts.len(), "Scoring")?;
    let mut items = Vec::with_capacity(transcripts.len());
    for transcript in &transcripts {
        items.push(assess_transcript(transcript, &index, extractor, thresholds));
        pb.inc(1);
    }
    pb.finish_and_clear();

    let report = CoverageReport::new(*thresholds, index.len(), items);
    info!(
        transcripts = report.total(),
        covered = report.count(CoverageTier::HighRisk),
        ambiguous = report.count(CoverageTier::Ambiguous),
        new = report.count(CoverageTier::New),
        "Coverage analysis complete"
    );

    let generated = report_timestamp(at);
    let text = CoverageReportText {
        report: &report,
        generated: &generated,
    }
    .to_string();
    let report_path = write_report(out_dir, "coverage", &text, at)?;

    Ok(CoverageOutput {
        report,
        report_path,
        skipped_rows: master.skipped.len(),
    })
}

/// Consolidate duplicates, then analyze coverage of the kept labels.
pub fn run(
    labels_path: &Path,
    filter: &LabelFilter,
    questions_path: &Path,
    extractor: &dyn KeywordExtractor,
    thresholds: &CoverageThresholds,
    out_dir: &Path,
    at: &DateTime<Local>,
) -> Result<AnalyzeOutput> {
    let labels = read_labels(labels_path, filter)?;
    let dedup = run_dedup(&labels, out_dir, at)?;
    let coverage = run_coverage(
        &dedup.report.consolidated,
        questions_path,
        extractor,
        thresholds,
        out_dir,
        at,
    )?;
    Ok(AnalyzeOutput { dedup, coverage })
}

/// Write backlog rows as CSV, header included even when empty.
pub fn write_backlog(path: &Path, rows: &[BacklogRow]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create backlog at {}", path.display()))?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(file);
    wtr.write_record(["Batch", "Question", "Answer"])?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to write backlog at {}", path.display()))?;
    info!(path = %path.display(), rows = rows.len(), "Wrote transcript backlog");
    Ok(())
}
