// Transcript labels: the filenames of recorded lessons.
//
// A label is whatever line the audio listing contains for a lesson file,
// usually a relative path. Everything downstream works from the derived
// pieces: the display name, the normalized grouping key and the topic
// category.

pub mod category;
pub mod normalize;
pub mod reader;

use serde::Serialize;

use self::category::{Category, Domain};
use self::normalize::{display_name, normalize_label, strip_extension};

/// A lesson label with its derived attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    /// The label as read from the listing (without a leading `./`)
    pub raw: String,
    /// Final path component of the label
    pub name: String,
    /// Normalized grouping key, computed from `name`
    pub key: String,
    /// Topic category from the fixed taxonomy
    pub category: Category,
}

impl Transcript {
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim();
        let raw = raw.strip_prefix("./").unwrap_or(raw).to_string();
        let name = display_name(&raw).to_string();
        let key = normalize_label(&name);
        let category = Category::from_text(&name);
        Self {
            raw,
            name,
            key,
            category,
        }
    }

    /// The display name without its media extension.
    pub fn title(&self) -> &str {
        strip_extension(&self.name)
    }

    /// The exam domain this lesson's category belongs to.
    pub fn domain(&self) -> Domain {
        self.category.domain()
    }
}

/// Build transcripts for every label in a listing.
pub fn transcripts_from(labels: &[String]) -> Vec<Transcript> {
    labels.iter().map(|l| Transcript::new(l)).collect()
}
