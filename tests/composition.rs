// Composition tests: verifying that the stages chain together correctly.
//
// These tests exercise the data flow between modules:
//   label listing -> dedup -> coverage -> reports
//   master + converted -> merge -> export
// using real files in a scratch directory under the system temp dir.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, TimeZone};

use studydeck::coverage::risk::RiskOptions;
use studydeck::coverage::tier::{CoverageThresholds, CoverageTier};
use studydeck::deck::csv_io::{read_questions, write_questions};
use studydeck::deck::merge::MergeOptions;
use studydeck::deck::record::{Correct, QuestionRecord};
use studydeck::labels::reader::LabelFilter;
use studydeck::pipeline;
use studydeck::topics::keywords::TokenKeywords;

/// Fresh scratch directory for one test.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("studydeck_{}_{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn question(text: &str, batch: &str) -> QuestionRecord {
    QuestionRecord {
        question: text.to_string(),
        choice_a: "One".to_string(),
        choice_b: "Two".to_string(),
        choice_c: "Three".to_string(),
        choice_d: "Four".to_string(),
        correct: Correct::A,
        explanation: String::new(),
        tags: String::new(),
        source: String::new(),
        batch: batch.to_string(),
    }
}

fn write_fixtures(dir: &Path) -> (PathBuf, PathBuf) {
    let labels = dir.join("labels.txt");
    fs::write(
        &labels,
        "\
./az104/VNet Peering Gateway Transit.wav
./az104/VNet_Peering_Gateway_Transit_(1).wav
./az104/Blob Lifecycle Archive Tier.wav
./az104/Kubernetes Operators Explained.wav
# not a label
",
    )
    .unwrap();

    let master = dir.join("master.csv");
    write_questions(
        &master,
        &[
            question("How does vnet peering use gateway transit?", "Peering Gateway Transit"),
            question("Which blob tier suits archive data?", "Blob Tiers"),
        ],
    )
    .unwrap();

    (labels, master)
}

fn fixed_time() -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
}

// ============================================================
// Chain: labels -> dedup -> coverage -> reports
// ============================================================

#[test]
fn analyze_writes_reports_and_classifies() {
    let dir = scratch("analyze");
    let (labels, master) = write_fixtures(&dir);
    let out = dir.join("reports");

    let result = pipeline::analyze::run(
        &labels,
        &LabelFilter::default(),
        &master,
        &TokenKeywords::default(),
        &CoverageThresholds::default(),
        &out,
        &fixed_time(),
    )
    .unwrap();

    // dedup: the peering lesson was exported twice
    assert_eq!(result.dedup.report.total_labels, 4);
    assert_eq!(result.dedup.report.groups.len(), 1);
    assert_eq!(result.dedup.report.unique_after(), 3);
    assert!(result
        .dedup
        .report
        .consolidated
        .contains(&"az104/VNet_Peering_Gateway_Transit_(1).wav".to_string()));

    // coverage runs over the consolidated list only
    let coverage = &result.coverage.report;
    assert_eq!(coverage.total(), 3);
    assert_eq!(coverage.batch_count, 2);
    let peering = coverage
        .items
        .iter()
        .find(|i| i.name.starts_with("VNet_Peering"))
        .unwrap();
    assert_eq!(peering.tier, CoverageTier::HighRisk, "score {}", peering.score);
    assert_eq!(peering.best_batch(), Some("Peering Gateway Transit"));
    let kubernetes = coverage
        .items
        .iter()
        .find(|i| i.name.starts_with("Kubernetes"))
        .unwrap();
    assert_eq!(kubernetes.tier, CoverageTier::New);

    // files
    assert!(result.dedup.report_path.ends_with("duplicate_report_20260102_030405.txt"));
    assert!(result.coverage.report_path.ends_with("coverage_report_20260102_030405.txt"));
    let duplicate_text = fs::read_to_string(&result.dedup.report_path).unwrap();
    assert!(duplicate_text.contains("VNet_Peering_Gateway_Transit_(1).wav"));
    let consolidated = fs::read_to_string(&result.dedup.consolidated_path).unwrap();
    assert_eq!(consolidated.lines().count(), 3);
    let backlog = fs::read_to_string(&result.dedup.backlog_path).unwrap();
    assert!(backlog.starts_with("Batch,Question,Answer"));
    assert!(backlog.contains("Transcript Conversion::Networking"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn analyze_fails_on_missing_questions() {
    let dir = scratch("missing");
    let (labels, _) = write_fixtures(&dir);
    let missing = dir.join("nope.csv");

    let err = pipeline::analyze::run(
        &labels,
        &LabelFilter::default(),
        &missing,
        &TokenKeywords::default(),
        &CoverageThresholds::default(),
        &dir.join("reports"),
        &fixed_time(),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("nope.csv"), "error: {err:#}");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn risk_projects_deck_size() {
    let dir = scratch("risk");
    let (labels, master) = write_fixtures(&dir);

    let result = pipeline::risk::run(
        &labels,
        &LabelFilter::default(),
        &master,
        &CoverageThresholds::default(),
        RiskOptions::default(),
        &dir.join("reports"),
        &fixed_time(),
    )
    .unwrap();

    let report = &result.report;
    assert_eq!(report.total(), 4);
    assert_eq!(report.master_questions, 2);
    assert!(report.count(CoverageTier::HighRisk) >= 2, "both peering exports overlap");
    assert_eq!(
        report.conservative_total(),
        2 + report.safe_count() * 2
    );
    assert!(result.report_path.exists());

    fs::remove_dir_all(&dir).ok();
}

// ============================================================
// Chain: merge -> export
// ============================================================

#[test]
fn merge_then_export() {
    let dir = scratch("merge");
    let (_, master) = write_fixtures(&dir);
    let converted = dir.join("converted.csv");
    fs::write(
        &converted,
        "\
Question,ChoiceA,ChoiceB,ChoiceC,ChoiceD,Correct
How does VNet peering use gateway transit?,One,Two,Three,Four,A
What does an operator reconcile?,State,Logs,Nodes,Pods,A
Broken row,One
",
    )
    .unwrap();

    let merged = pipeline::merge::run(
        &master,
        &converted,
        MergeOptions::default(),
        &dir.join("reports"),
        &fixed_time(),
    )
    .unwrap();
    assert_eq!(merged.summary.added, 1);
    assert_eq!(merged.summary.skipped_duplicates, 1);
    assert_eq!(merged.skipped_rows, 1);
    assert_eq!(read_questions(&master).unwrap().records.len(), 3);

    let anki = dir.join("cards.txt");
    let exported = pipeline::export::run(&master, "AZ-104", &anki).unwrap();
    assert_eq!(exported.summary.cards, 3);
    assert_eq!(exported.summary.cards_per_deck["AZ-104"], 1);
    let text = fs::read_to_string(&anki).unwrap();
    assert!(text.starts_with("#separator:tab\n"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn merge_refuses_master_with_unreadable_rows() {
    let dir = scratch("merge_bad_master");
    let master = dir.join("master.csv");
    let original = "\
Question,ChoiceA,ChoiceB,ChoiceC,ChoiceD,Correct,Explanation,Tags,Source,Batch
Good one?,a,b,c,d,A,,,,Storage::Tiers
Typo answer?,a,b,c,d,AB,keep me,,,Storage::Tiers
Short row,a,b
";
    fs::write(&master, original).unwrap();
    let converted = dir.join("converted.csv");
    fs::write(
        &converted,
        "Question,ChoiceA,ChoiceB,ChoiceC,ChoiceD,Correct\nNew one?,a,b,c,d,B\n",
    )
    .unwrap();

    let err = pipeline::merge::run(
        &master,
        &converted,
        MergeOptions::default(),
        &dir.join("reports"),
        &fixed_time(),
    )
    .unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("lines 3, 4"), "error should list the bad lines: {msg}");
    assert_eq!(fs::read_to_string(&master).unwrap(), original, "master must be untouched");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn merge_refuses_master_missing_required_column() {
    let dir = scratch("merge_no_correct");
    let master = dir.join("master.csv");
    let original = "Question,ChoiceA,ChoiceB,ChoiceC,ChoiceD\nOld one?,a,b,c,d\n";
    fs::write(&master, original).unwrap();
    let converted = dir.join("converted.csv");
    fs::write(
        &converted,
        "Question,ChoiceA,ChoiceB,ChoiceC,ChoiceD,Correct\nNew one?,a,b,c,d,B\n",
    )
    .unwrap();

    let err = pipeline::merge::run(
        &master,
        &converted,
        MergeOptions::default(),
        &dir.join("reports"),
        &fixed_time(),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("Correct"), "error: {err:#}");
    assert_eq!(fs::read_to_string(&master).unwrap(), original);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn merge_leaves_master_alone_when_report_fails() {
    let dir = scratch("merge_report_fails");
    let (_, master) = write_fixtures(&dir);
    let before = fs::read_to_string(&master).unwrap();
    let converted = dir.join("converted.csv");
    fs::write(
        &converted,
        "Question,ChoiceA,ChoiceB,ChoiceC,ChoiceD,Correct\nNew one?,a,b,c,d,B\n",
    )
    .unwrap();
    // a plain file where the report directory should be
    let blocked = dir.join("reports");
    fs::write(&blocked, "not a directory").unwrap();

    let result = pipeline::merge::run(
        &master,
        &converted,
        MergeOptions::default(),
        &blocked,
        &fixed_time(),
    );
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&master).unwrap(), before);

    fs::remove_dir_all(&dir).ok();
}
