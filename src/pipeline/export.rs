// Export pipeline: question CSV to an Anki plain-text import file.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::deck::csv_io::read_questions;
use crate::deck::export::{render_card, write_anki_text, ExportSummary, Flashcard};

#[derive(Debug, Clone, Serialize)]
pub struct ExportOutput {
    pub summary: ExportSummary,
    pub output_path: PathBuf,
}

/// Render every question as a flashcard under `deck_root` and write them out.
pub fn run(questions_path: &Path, deck_root: &str, output_path: &Path) -> Result<ExportOutput> {
    let set = read_questions(questions_path)?;

    let pb = super::progress_bar(set.records.len(), "Rendering")?;
    let mut cards: Vec<Flashcard> = Vec::with_capacity(set.records.len());
    for record in &set.records {
        cards.push(render_card(record, deck_root));
        pb.inc(1);
    }
    pb.finish_and_clear();

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    write_anki_text(BufWriter::new(file), &cards)
        .with_context(|| format!("Failed to write flashcards to {}", output_path.display()))?;

    let summary = ExportSummary::from_cards(&cards, set.skipped.len());
    info!(
        cards = summary.cards,
        decks = summary.cards_per_deck.len(),
        path = %output_path.display(),
        "Flashcards exported"
    );

    Ok(ExportOutput {
        summary,
        output_path: output_path.to_path_buf(),
    })
}
