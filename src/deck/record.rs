// Question records: the rows of every question CSV.
//
// The column layout is fixed:
//   Question,ChoiceA,ChoiceB,ChoiceC,ChoiceD,Correct,Explanation,Tags,Source,Batch
// `Correct` is parsed into an enum so a record can't exist with an answer
// outside A-D.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The correct choice of a multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Correct {
    A,
    B,
    C,
    D,
}

impl Correct {
    pub const ALL: [Correct; 4] = [Correct::A, Correct::B, Correct::C, Correct::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            Correct::A => "A",
            Correct::B => "B",
            Correct::C => "C",
            Correct::D => "D",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Correct::A => 0,
            Correct::B => 1,
            Correct::C => 2,
            Correct::D => 3,
        }
    }
}

impl fmt::Display for Correct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Correct {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Correct::A),
            "B" => Ok(Correct::B),
            "C" => Ok(Correct::C),
            "D" => Ok(Correct::D),
            other => Err(format!("Correct must be one of A, B, C, D (got {other:?})")),
        }
    }
}

impl TryFrom<String> for Correct {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Correct> for String {
    fn from(value: Correct) -> Self {
        value.as_str().to_string()
    }
}

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuestionRecord {
    pub question: String,
    pub choice_a: String,
    pub choice_b: String,
    pub choice_c: String,
    pub choice_d: String,
    pub correct: Correct,
    #[serde(default)]
    pub explanation: String,
    /// Comma-separated tags, e.g. `Container_Apps,Ingress`
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub source: String,
    /// Grouping tag, `Parent::Child`
    #[serde(default)]
    pub batch: String,
}

/// Parent segment of a batch name (the part before the first `::`).
pub fn parent_batch(batch: &str) -> &str {
    let parent = batch.split("::").next().unwrap_or("").trim();
    if parent.is_empty() {
        "Unbatched"
    } else {
        parent
    }
}

impl QuestionRecord {
    /// The four choices paired with their letters.
    pub fn choices(&self) -> [(Correct, &str); 4] {
        [
            (Correct::A, self.choice_a.as_str()),
            (Correct::B, self.choice_b.as_str()),
            (Correct::C, self.choice_c.as_str()),
            (Correct::D, self.choice_d.as_str()),
        ]
    }

    /// Text of the correct choice.
    pub fn correct_text(&self) -> &str {
        self.choices()[self.correct.index()].1
    }

    pub fn is_correct(&self, choice: Correct) -> bool {
        self.correct == choice
    }

    /// `isCorrectA..D` flags; exactly one is set.
    pub fn correct_flags(&self) -> [bool; 4] {
        Correct::ALL.map(|c| self.is_correct(c))
    }

    pub fn parent_batch(&self) -> &str {
        parent_batch(&self.batch)
    }

    /// Tags split on commas, trimmed, empties dropped.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}
