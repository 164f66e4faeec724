// Plain-text reports written next to the study material.
//
// Each report type is a small wrapper around a result object that renders
// through `Display`, so the same text can go to a file, a test assertion,
// or stdout.

use std::fmt;

use super::truncate_chars;
use crate::coverage::analyzer::CoverageReport;
use crate::coverage::risk::RiskReport;
use crate::coverage::tier::CoverageTier;
use crate::dedup::report::DuplicateReport;
use crate::deck::merge::MergeSummary;
use crate::labels::category::Category;
use crate::labels::normalize::display_name;

const RULE_WIDTH: usize = 80;

/// How many covered transcripts to list per batch.
const COVERED_PER_BATCH: usize = 5;
/// How many new transcripts to list per category.
const NEW_PER_CATEGORY: usize = 20;

fn heading(f: &mut fmt::Formatter<'_>, title: &str, generated: Option<&str>) -> fmt::Result {
    writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(f, "{title}")?;
    if let Some(at) = generated {
        writeln!(f, "Generated: {at}")?;
    }
    writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(f)
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(RULE_WIDTH))
}

/// Duplicate consolidation report.
pub struct DuplicateReportText<'a> {
    pub report: &'a DuplicateReport,
    pub generated: &'a str,
}

impl fmt::Display for DuplicateReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;
        heading(f, "DUPLICATE TRANSCRIPT CONSOLIDATION REPORT", Some(self.generated))?;

        section(f, "SUMMARY")?;
        writeln!(f, "Total Transcripts: {}", r.total_labels)?;
        writeln!(f, "Duplicate Groups: {}", r.groups.len())?;
        writeln!(f, "Duplicate Instances: {}", r.duplicate_instances())?;
        writeln!(f, "Unique Transcripts After Consolidation: {}", r.unique_after())?;
        writeln!(f)?;

        section(f, "DUPLICATE GROUPS (CONSOLIDATION REQUIRED)")?;
        if r.groups.is_empty() {
            writeln!(f, "None found.")?;
        }
        for (i, group) in r.groups.iter().enumerate() {
            writeln!(
                f,
                "{}. {} - {} instances",
                i + 1,
                group.category,
                group.labels.len()
            )?;
            writeln!(f, "   Normalized: {}", group.key)?;
            writeln!(f, "   Instances:")?;
            for (j, label) in group.labels.iter().enumerate() {
                writeln!(f, "      [{}] {}", j + 1, display_name(label))?;
            }
            writeln!(f, "   -> KEEP: {}", display_name(&group.keep))?;
            writeln!(f, "   -> DELETE: {} others", group.remove.len())?;
            writeln!(f)?;
        }

        writeln!(f)?;
        section(f, "CONSOLIDATED LIST")?;
        writeln!(f, "Keep {} unique transcripts:", r.consolidated.len())?;
        writeln!(f)?;
        for label in &r.consolidated {
            let name = display_name(label);
            writeln!(f, "* [{:<12}] {}", Category::from_text(name).as_str(), name)?;
        }
        Ok(())
    }
}

/// Transcript coverage report.
pub struct CoverageReportText<'a> {
    pub report: &'a CoverageReport,
    pub generated: &'a str,
}

impl fmt::Display for CoverageReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;
        let t = r.thresholds;
        heading(f, "TRANSCRIPT COVERAGE ANALYSIS REPORT", Some(self.generated))?;

        section(f, "SUMMARY")?;
        writeln!(f, "Total Transcripts: {}", r.total())?;
        writeln!(f, "Existing Batches: {}", r.batch_count)?;
        writeln!(
            f,
            "Already Covered: {} ({:.1}%)",
            r.count(CoverageTier::HighRisk),
            r.pct(CoverageTier::HighRisk)
        )?;
        writeln!(
            f,
            "Ambiguous: {} ({:.1}%)",
            r.count(CoverageTier::Ambiguous),
            r.pct(CoverageTier::Ambiguous)
        )?;
        writeln!(
            f,
            "NEW (Not Covered): {} ({:.1}%)",
            r.count(CoverageTier::New),
            r.pct(CoverageTier::New)
        )?;
        writeln!(f, "Thresholds: covered >= {:.2}, ambiguous >= {:.2}", t.high, t.low)?;
        writeln!(f)?;

        section(f, "ALREADY COVERED BY EXISTING BATCHES")?;
        writeln!(f, "Count: {} transcripts", r.count(CoverageTier::HighRisk))?;
        for (batch, items) in r.covered_by_batch() {
            let avg = items.iter().map(|i| i.score).sum::<f64>() / items.len() as f64;
            writeln!(f)?;
            writeln!(f, "{batch} ({} transcripts, avg match: {avg:.2}):", items.len())?;
            for item in items.iter().take(COVERED_PER_BATCH) {
                writeln!(
                    f,
                    "  * {} (score: {:.2})",
                    truncate_chars(&item.name, 70),
                    item.score
                )?;
            }
            if items.len() > COVERED_PER_BATCH {
                writeln!(f, "  ... and {} more", items.len() - COVERED_PER_BATCH)?;
            }
        }
        writeln!(f)?;
        writeln!(f)?;

        let new_by_category = r.new_by_category();
        section(f, "NEW TRANSCRIPTS (NOT COVERED - HIGH PRIORITY)")?;
        writeln!(f, "Count: {} transcripts", r.count(CoverageTier::New))?;
        for (category, items) in &new_by_category {
            writeln!(f)?;
            writeln!(
                f,
                "{category} [{}] ({} transcripts):",
                category.domain(),
                items.len()
            )?;
            for item in items.iter().take(NEW_PER_CATEGORY) {
                writeln!(f, "  * {}", truncate_chars(&item.name, 75))?;
            }
            if items.len() > NEW_PER_CATEGORY {
                writeln!(f, "  ... and {} more", items.len() - NEW_PER_CATEGORY)?;
            }
        }
        writeln!(f)?;
        writeln!(f)?;

        section(f, "AMBIGUOUS (POSSIBLE MATCH - REVIEW)")?;
        writeln!(f, "Count: {} transcripts", r.count(CoverageTier::Ambiguous))?;
        writeln!(f)?;
        for item in r.in_tier(CoverageTier::Ambiguous) {
            writeln!(f, "* {}", truncate_chars(&item.name, 70))?;
            writeln!(f, "  Category: {}", item.category)?;
            if let Some(best) = item.top_matches.first() {
                writeln!(f, "  Possible match: {} ({:.2})", best.batch, best.score)?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        section(f, "RECOMMENDATIONS")?;
        writeln!(
            f,
            "1. Convert {} new transcripts to deck questions",
            r.count(CoverageTier::New)
        )?;
        let mut by_size: Vec<(&Category, usize)> = new_by_category
            .iter()
            .map(|(c, items)| (c, items.len()))
            .collect();
        by_size.sort_by(|a, b| b.1.cmp(&a.1));
        for (category, count) in by_size.into_iter().take(5) {
            writeln!(f, "     * {category}: {count} transcripts")?;
        }
        writeln!(
            f,
            "2. Review {} ambiguous transcripts before converting them",
            r.count(CoverageTier::Ambiguous)
        )?;
        Ok(())
    }
}

/// Duplication risk assessment report.
pub struct RiskReportText<'a> {
    pub report: &'a RiskReport,
    pub generated: &'a str,
}

impl fmt::Display for RiskReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;
        let high_pct = r.thresholds.high * 100.0;
        let low_pct = r.thresholds.low * 100.0;
        let per = r.options.cards_per_transcript;
        heading(f, "DUPLICATION RISK ASSESSMENT", Some(self.generated))?;

        section(f, "RISK SUMMARY")?;
        writeln!(f, "Total Transcripts: {}", r.total())?;
        writeln!(
            f,
            "High Risk (>={high_pct:.0}% overlap): {} transcripts",
            r.count(CoverageTier::HighRisk)
        )?;
        writeln!(
            f,
            "Medium Risk ({low_pct:.0}-{high_pct:.0}% overlap): {} transcripts",
            r.count(CoverageTier::Ambiguous)
        )?;
        writeln!(
            f,
            "Low Risk (<{low_pct:.0}% overlap): {} transcripts",
            r.count(CoverageTier::New)
        )?;
        writeln!(f)?;

        let high = r.high_risk();
        if !high.is_empty() {
            section(f, "HIGH RISK TRANSCRIPTS (Likely already covered)")?;
            for item in &high {
                writeln!(f, "* {}", truncate_chars(&item.name, 60))?;
                writeln!(
                    f,
                    "  Overlap: {:.0}% ({}/{} keywords match)",
                    item.score * 100.0,
                    item.matched,
                    item.keywords
                )?;
                writeln!(f, "  ACTION: Consider skipping or reviewing")?;
                writeln!(f)?;
            }
        }

        section(f, "CURRENT MASTER DECK STRUCTURE")?;
        writeln!(f, "Total Batches: {}", r.master_batches)?;
        writeln!(f, "Total Questions: {}", r.master_questions)?;
        writeln!(f)?;
        for (parent, count) in &r.parent_counts {
            writeln!(f, "{parent}: {count} questions")?;
        }
        writeln!(f)?;

        section(f, "PROJECTION AFTER CONVERSION")?;
        writeln!(f, "Current Master: {} questions", r.master_questions)?;
        writeln!(
            f,
            "High Risk (skip): {} transcripts x {per} = {} questions saved",
            high.len(),
            high.len() * per
        )?;
        writeln!(
            f,
            "Medium + Low Risk (convert): {} transcripts x {per} = {} questions",
            r.safe_count(),
            r.safe_count() * per
        )?;
        writeln!(f, "CONSERVATIVE ESTIMATE: {} questions", r.conservative_total())?;
        writeln!(f, "OPTIMISTIC ESTIMATE: {} questions", r.optimistic_total())?;
        writeln!(f)?;

        section(f, "RECOMMENDATION")?;
        if high.is_empty() {
            writeln!(f, "Low duplication risk - all transcripts are supplementary.")?;
            writeln!(f, "Proceed with full conversion ({} transcripts).", r.total())?;
        } else {
            writeln!(f, "{} transcripts show high overlap. Consider:", high.len())?;
            writeln!(f, "   1. Skip high-risk items to avoid duplicates")?;
            writeln!(f, "   2. Or convert all and review duplicates after merging")?;
            writeln!(
                f,
                "   3. Proceed with medium/low risk items ({} safe transcripts)",
                r.safe_count()
            )?;
        }
        Ok(())
    }
}

/// Merge report.
pub struct MergeReportText<'a> {
    pub summary: &'a MergeSummary,
    pub generated: &'a str,
}

impl fmt::Display for MergeReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        heading(f, "TRANSCRIPT MERGE REPORT", Some(self.generated))?;

        section(f, "SUMMARY")?;
        writeln!(f, "Original Master Deck: {} cards", s.original)?;
        writeln!(f, "Converted Questions: {}", s.converted)?;
        writeln!(f, "Skipped Duplicates: {}", s.skipped_duplicates)?;
        writeln!(f, "New Total: {} cards", s.total)?;
        writeln!(
            f,
            "Increase: {} cards ({:.1}% expansion)",
            s.added,
            s.expansion_pct()
        )?;
        writeln!(f)?;

        section(f, "BATCH CATEGORIES")?;
        for (parent, count) in &s.added_by_parent {
            writeln!(f, "{parent}: {count} questions")?;
        }
        Ok(())
    }
}
