// Pipelines: each CLI command's work as a library call.
//
// A pipeline reads its inputs, runs the pure stages, writes its files, and
// returns a serializable result. Terminal output is left to the caller.

pub mod analyze;
pub mod export;
pub mod merge;
pub mod risk;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar in the style used by every pipeline.
pub(crate) fn progress_bar(len: usize, label: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(ProgressStyle::with_template(&format!(
        "  {label} [{{bar:30}}] {{pos}}/{{len}} ({{eta}})"
    ))?);
    Ok(pb)
}
