// Unit tests for question records, CSV I/O, merging and flashcard export.
//
// File-based tests write under the system temp directory and clean up
// after themselves.

use std::fs;
use std::path::PathBuf;

use studydeck::deck::csv_io::{parse_questions, read_questions, write_questions, HEADER};
use studydeck::deck::export::{render_card, write_anki_text, ExportSummary};
use studydeck::deck::merge::{merge_questions, MergeOptions};
use studydeck::deck::record::{Correct, QuestionRecord};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("studydeck_{}_{name}", std::process::id()))
}

fn record(question: &str, correct: Correct, batch: &str) -> QuestionRecord {
    QuestionRecord {
        question: question.to_string(),
        choice_a: "Hub-spoke, with \"transit\"".to_string(),
        choice_b: "Mesh".to_string(),
        choice_c: "Line one\nline two".to_string(),
        choice_d: "None".to_string(),
        correct,
        explanation: "Gateway transit lets spokes use the hub gateway.".to_string(),
        tags: "Networking, VNet Peering".to_string(),
        source: "VNet Peering.wav".to_string(),
        batch: batch.to_string(),
    }
}

// ============================================================
// CSV I/O
// ============================================================

#[test]
fn csv_round_trip_preserves_every_field() {
    let path = temp_path("round_trip.csv");
    let records = vec![
        record("Which topology uses gateway transit?", Correct::A, "Networking::Peering"),
        record("Which tier suits rarely read blobs?", Correct::D, ""),
    ];
    write_questions(&path, &records).unwrap();
    let set = read_questions(&path).unwrap();
    fs::remove_file(&path).ok();

    assert!(set.skipped.is_empty(), "unexpected skipped rows: {:?}", set.skipped);
    assert_eq!(set.records, records);
}

#[test]
fn empty_write_still_has_header() {
    let path = temp_path("empty.csv");
    write_questions(&path, &[]).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();
    assert_eq!(text.trim_end(), HEADER.join(","));
}

#[test]
fn malformed_rows_are_skipped_and_counted() {
    let csv = "\
Question,ChoiceA,ChoiceB,ChoiceC,ChoiceD,Correct,Explanation,Tags,Source,Batch
Good one?,a,b,c,d,B,,,,Storage::Tiers
Bad letter?,a,b,c,d,E,,,,Storage::Tiers
Too short?,a,b
Also good?,a,b,c,d, c ,,,,Storage::Tiers
";
    let set = parse_questions(csv.as_bytes()).unwrap();
    assert_eq!(set.records.len(), 2);
    assert_eq!(set.skipped.len(), 2);
    assert_eq!(set.records[1].correct, Correct::C);
    assert_eq!(set.skipped[0].line, 3);
}

#[test]
fn optional_columns_default_to_empty() {
    let csv = "Question,ChoiceA,ChoiceB,ChoiceC,ChoiceD,Correct\nQ?,a,b,c,d,A\n";
    let set = parse_questions(csv.as_bytes()).unwrap();
    assert_eq!(set.records.len(), 1);
    let r = &set.records[0];
    assert!(r.explanation.is_empty() && r.tags.is_empty());
    assert!(r.source.is_empty() && r.batch.is_empty());
    assert_eq!(r.parent_batch(), "Unbatched");
}

#[test]
fn read_missing_file_names_path() {
    let path = temp_path("does_not_exist.csv");
    let err = format!("{:#}", read_questions(&path).unwrap_err());
    assert!(err.contains("does_not_exist.csv"), "error should name the path: {err}");
}

#[test]
fn exactly_one_correct_flag() {
    for c in Correct::ALL {
        let flags = record("Q?", c, "").correct_flags();
        assert_eq!(flags.iter().filter(|f| **f).count(), 1, "{c}");
    }
}

// ============================================================
// Merge
// ============================================================

#[test]
fn merge_appends_and_drops_duplicates() {
    let master = vec![record("Which topology uses gateway transit?", Correct::A, "Networking::Peering")];
    let converted = vec![
        record("which topology uses GATEWAY transit", Correct::A, "Transcript Conversion::Networking"),
        record("What does soft delete protect?", Correct::B, "Transcript Conversion::Backup/DR"),
    ];

    let out = merge_questions(master.clone(), converted.clone(), MergeOptions::default());
    assert_eq!(out.summary.original, 1);
    assert_eq!(out.summary.added, 1);
    assert_eq!(out.summary.skipped_duplicates, 1);
    assert_eq!(out.summary.total, 2);
    assert_eq!(out.summary.added_by_parent["Transcript Conversion"], 1);
    assert_eq!(out.records[0], master[0]);

    let kept = merge_questions(master, converted, MergeOptions { keep_duplicates: true });
    assert_eq!(kept.summary.total, 3);
    assert_eq!(kept.summary.skipped_duplicates, 0);
    assert_eq!(kept.summary.expansion_pct(), 200.0);
}

// ============================================================
// Flashcard export
// ============================================================

#[test]
fn card_marks_correct_choice_and_escapes_html() {
    let mut r = record("Is <b>bold</b> escaped?", Correct::B, "Storage::Tiers");
    r.choice_b = "Yes & no".to_string();
    let card = render_card(&r, "AZ-104");

    assert!(card.front.contains("&lt;b&gt;bold&lt;/b&gt;"), "front: {}", card.front);
    assert!(!card.front.contains("correct"), "front must not reveal the answer");
    assert!(card.back.contains("class='choice correct'"));
    assert!(card.back.contains("Yes &amp; no"));
    assert!(card.back.contains("Line one<br>line two"));
    assert_eq!(card.deck, "AZ-104::Storage::Tiers");
    assert_eq!(card.tags, vec!["Networking".to_string(), "VNet_Peering".to_string()]);
}

#[test]
fn anki_text_has_headers_and_one_row_per_card() {
    let cards = vec![
        render_card(&record("First?", Correct::A, "Networking::Peering"), "Deck"),
        render_card(&record("Second?", Correct::C, ""), "Deck"),
    ];
    let mut buf = Vec::new();
    write_anki_text(&mut buf, &cards).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        &lines[..4],
        &["#separator:tab", "#html:true", "#tags column:3", "#deck column:4"]
    );
    assert_eq!(lines.len(), 6);
    assert!(lines[5].ends_with("\tDeck"), "unbatched card goes to the root deck");

    let summary = ExportSummary::from_cards(&cards, 0);
    assert_eq!(summary.cards, 2);
    assert_eq!(summary.cards_per_deck["Deck::Networking::Peering"], 1);
}
