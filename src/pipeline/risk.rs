// Risk pipeline: check a lesson listing against the whole master deck
// before committing to a bulk conversion.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use crate::coverage::risk::{assess_risk, RiskOptions, RiskReport};
use crate::coverage::tier::{CoverageThresholds, CoverageTier};
use crate::deck::csv_io::read_questions;
use crate::labels::reader::{read_labels, LabelFilter};
use crate::labels::transcripts_from;
use crate::output::report::RiskReportText;
use crate::output::{report_timestamp, write_report};

#[derive(Debug, Clone, Serialize)]
pub struct RiskOutput {
    pub report: RiskReport,
    pub report_path: PathBuf,
    pub skipped_rows: usize,
}

/// Run the duplication risk assessment and write its report.
pub fn run(
    labels_path: &Path,
    filter: &LabelFilter,
    questions_path: &Path,
    thresholds: &CoverageThresholds,
    options: RiskOptions,
    out_dir: &Path,
    at: &DateTime<Local>,
) -> Result<RiskOutput> {
    let labels = read_labels(labels_path, filter)?;
    let master = read_questions(questions_path)?;
    let transcripts = transcripts_from(&labels);

    let report = assess_risk(&transcripts, &master.records, thresholds, options);
    info!(
        transcripts = report.total(),
        high = report.count(CoverageTier::HighRisk),
        medium = report.count(CoverageTier::Ambiguous),
        low = report.count(CoverageTier::New),
        "Duplication risk assessed"
    );

    let generated = report_timestamp(at);
    let text = RiskReportText {
        report: &report,
        generated: &generated,
    }
    .to_string();
    let report_path = write_report(out_dir, "duplication_risk", &text, at)?;

    Ok(RiskOutput {
        report,
        report_path,
        skipped_rows: master.skipped.len(),
    })
}
