// Colored terminal output for run summaries.
//
// This module handles all terminal-specific formatting: colors and
// column layout. The main.rs command handlers delegate here.

use std::path::Path;

use colored::Colorize;

use crate::coverage::analyzer::CoverageReport;
use crate::coverage::risk::RiskReport;
use crate::coverage::tier::CoverageTier;
use crate::dedup::report::DuplicateReport;
use crate::deck::export::ExportSummary;
use crate::deck::merge::MergeSummary;

/// Display the outcome of a duplicate consolidation.
pub fn display_duplicate_summary(report: &DuplicateReport) {
    println!(
        "\n{}",
        format!("=== Duplicate Consolidation ({} transcripts) ===", report.total_labels).bold()
    );
    println!();

    if report.groups.is_empty() {
        println!("  {} No duplicate transcripts found", "ok".green());
    } else {
        println!(
            "  {:<40} {:>9}  {}",
            "Normalized".dimmed(),
            "Instances".dimmed(),
            "Keep".dimmed()
        );
        println!("  {}", "-".repeat(78).dimmed());
        for group in &report.groups {
            println!(
                "  {:<40} {:>9}  {}",
                super::truncate_chars(&group.key, 37),
                group.labels.len(),
                super::truncate_chars(crate::labels::normalize::display_name(&group.keep), 40)
                    .dimmed()
            );
        }
    }

    println!();
    println!(
        "  {} Duplicates found: {}",
        "!".bright_red(),
        report.duplicate_instances()
    );
    println!(
        "  {} After consolidation: {} unique transcripts",
        "~".green(),
        report.unique_after()
    );
}

/// Display a coverage analysis summary.
pub fn display_coverage_summary(report: &CoverageReport) {
    println!(
        "\n{}",
        format!("=== Coverage Summary ({} transcripts) ===", report.total()).bold()
    );
    println!();

    for tier in CoverageTier::ALL {
        let label = match tier {
            CoverageTier::HighRisk => "Already covered",
            CoverageTier::Ambiguous => "Ambiguous",
            CoverageTier::New => "New (not covered)",
        };
        println!(
            "  {:<20} {:>4}/{:<4} ({:.1}%)",
            colorize_tier(tier, label),
            report.count(tier),
            report.total(),
            report.pct(tier)
        );
    }

    let new_by_category = report.new_by_category();
    if !new_by_category.is_empty() {
        println!("\n  New by category:");
        let mut counts: Vec<(String, usize)> = new_by_category
            .iter()
            .map(|(c, items)| (c.to_string(), items.len()))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        for (category, count) in counts {
            println!("    {:<14} {}", category, count);
        }
    }
}

/// Display a duplication risk summary.
pub fn display_risk_summary(report: &RiskReport) {
    println!(
        "\n{}",
        format!("=== Duplication Risk ({} transcripts) ===", report.total()).bold()
    );
    println!();

    for tier in CoverageTier::ALL {
        let label = match tier {
            CoverageTier::HighRisk => "High risk",
            CoverageTier::Ambiguous => "Medium risk",
            CoverageTier::New => "Low risk",
        };
        println!(
            "  {:<14} {:>4} ({:.1}%)",
            colorize_tier(tier, label),
            report.count(tier),
            report.pct(tier)
        );
    }

    println!();
    println!("  Master deck: {} questions", report.master_questions);
    println!(
        "  Safe to add: {} questions (conservative)",
        report.safe_count() * report.options.cards_per_transcript
    );
    println!("  Final deck: {} cards", report.conservative_total());

    let high = report.count(CoverageTier::HighRisk);
    if high > 0 {
        println!(
            "\n  {} Review {} high-risk transcripts first; {} can be converted now",
            "!".bright_red(),
            high,
            report.safe_count()
        );
    } else {
        println!("\n  {} All transcripts are safe to convert", "ok".green());
    }
}

/// Display the outcome of a merge.
pub fn display_merge_summary(summary: &MergeSummary, master: &Path) {
    println!("\n{}", "=== Merge Complete ===".bold());
    println!();
    println!(
        "  Merged: {} + {} = {} total cards",
        summary.original, summary.added, summary.total
    );
    if summary.skipped_duplicates > 0 {
        println!(
            "  {} Skipped {} questions already in the master deck",
            "~".yellow(),
            summary.skipped_duplicates
        );
    }
    println!("  Increase: {:.1}%", summary.expansion_pct());
    println!("  Updated: {}", master.display().to_string().dimmed());
}

/// Display the outcome of a flashcard export.
pub fn display_export_summary(summary: &ExportSummary, output: &Path) {
    println!(
        "\n{}",
        format!("=== Flashcard Export ({} cards) ===", summary.cards).bold()
    );
    println!();
    for (deck, count) in &summary.cards_per_deck {
        println!("  {:<60} {:>5}", super::truncate_chars(deck, 57), count);
    }
    if summary.skipped_rows > 0 {
        println!(
            "\n  {} {} malformed rows skipped",
            "!".yellow(),
            summary.skipped_rows
        );
    }
    println!("\n  Import file: {}", output.display().to_string().dimmed());
}

/// Colorize a label by coverage tier.
fn colorize_tier(tier: CoverageTier, label: &str) -> colored::ColoredString {
    match tier {
        CoverageTier::HighRisk => label.red().bold(),
        CoverageTier::Ambiguous => label.yellow(),
        CoverageTier::New => label.green(),
    }
}
