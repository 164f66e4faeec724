// Flashcard export in Anki's plain-text import format.
//
// Each question becomes one note: the front shows the question and the four
// choices, the back shows them again with the correct one highlighted and
// the explanation underneath. Header lines tell Anki the separator, that
// fields contain HTML, and which columns hold tags and the target deck.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use super::record::QuestionRecord;

const CORRECT_STYLE: &str = "<style>.choice.correct { background-color: #4CAF50 !important; \
color: white !important; border-color: #45a049 !important; font-weight: bold; }</style>";

const EXPLANATION_STYLE: &str = "background-color: #4CAF50; color: white; padding: 10px; \
border-radius: 5px; margin: 10px 0; font-size: 16px;";

/// One exported note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
    pub tags: Vec<String>,
    pub deck: String,
}

/// Escape text for inclusion in card HTML; newlines become `<br>`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("<br>"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Anki tags from a comma-separated tag field.
///
/// Anki separates tags with spaces, so spaces inside a tag become
/// underscores.
pub fn anki_tags(record: &QuestionRecord) -> Vec<String> {
    record
        .tag_list()
        .into_iter()
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join("_"))
        .collect()
}

/// Target deck for a record: `<root>::<batch>`, or the root when unbatched.
pub fn deck_path(root: &str, batch: &str) -> String {
    let batch = batch.trim();
    if batch.is_empty() {
        root.to_string()
    } else {
        format!("{root}::{batch}")
    }
}

/// Render a question record into a flashcard.
pub fn render_card(record: &QuestionRecord, deck_root: &str) -> Flashcard {
    let question = format!("<div class='question'>{}</div>", escape_html(&record.question));

    let mut front = question.clone();
    let mut back = format!("{CORRECT_STYLE}{question}");
    for (letter, text) in record.choices() {
        let text = escape_html(text);
        front.push_str(&format!("<div class='choice'>{letter}. {text}</div>"));
        let class = if record.is_correct(letter) {
            "choice correct"
        } else {
            "choice"
        };
        back.push_str(&format!("<div class='{class}'>{letter}. {text}</div>"));
    }

    back.push_str(&format!(
        "<hr><div style='{EXPLANATION_STYLE}'>Correct: {}. {}",
        record.correct,
        escape_html(record.correct_text())
    ));
    if !record.explanation.trim().is_empty() {
        back.push_str(&format!("<br>{}", escape_html(record.explanation.trim())));
    }
    back.push_str("</div>");

    Flashcard {
        front,
        back,
        tags: anki_tags(record),
        deck: deck_path(deck_root, &record.batch),
    }
}

/// Write cards in Anki's text import format.
pub fn write_anki_text<W: Write>(mut writer: W, cards: &[Flashcard]) -> Result<()> {
    writeln!(writer, "#separator:tab")?;
    writeln!(writer, "#html:true")?;
    writeln!(writer, "#tags column:3")?;
    writeln!(writer, "#deck column:4")?;

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);
    for card in cards {
        let tags = card.tags.join(" ");
        wtr.write_record([
            card.front.as_str(),
            card.back.as_str(),
            tags.as_str(),
            card.deck.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Counts describing one export.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportSummary {
    pub cards: usize,
    pub skipped_rows: usize,
    pub cards_per_deck: BTreeMap<String, usize>,
}

impl ExportSummary {
    pub fn from_cards(cards: &[Flashcard], skipped_rows: usize) -> Self {
        let mut cards_per_deck = BTreeMap::new();
        for card in cards {
            *cards_per_deck.entry(card.deck.clone()).or_insert(0) += 1;
        }
        Self {
            cards: cards.len(),
            skipped_rows,
            cards_per_deck,
        }
    }
}
