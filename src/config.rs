use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::coverage::tier::CoverageThresholds;
use crate::labels::reader::LabelFilter;
use crate::topics::keywords::{TokenKeywords, DEFAULT_MAX_KEYWORDS, DEFAULT_MIN_LEN};

/// Default root deck name for flashcard export.
pub const DEFAULT_DECK_ROOT: &str = "Study Deck";

/// Central configuration loaded from environment variables.
///
/// Every path the pipeline touches comes from here, never from constants.
/// The .env file is loaded automatically at startup via dotenvy, and CLI
/// flags override individual fields after loading.
#[derive(Debug, Clone)]
pub struct Config {
    /// Label listing, one lesson file per line (STUDYDECK_LABELS)
    pub labels_path: Option<PathBuf>,
    /// Master question CSV (STUDYDECK_QUESTIONS)
    pub questions_path: Option<PathBuf>,
    /// Where reports and generated lists are written (STUDYDECK_REPORTS_DIR)
    pub reports_dir: PathBuf,
    /// Keep only labels mentioning one of these (STUDYDECK_COURSE_FILTER, comma-separated)
    pub course_filter: LabelFilter,
    /// Coverage tiers (STUDYDECK_HIGH_THRESHOLD / STUDYDECK_LOW_THRESHOLD)
    pub thresholds: CoverageThresholds,
    /// Coverage keyword tokens must be longer than this (STUDYDECK_MIN_KEYWORD_LEN)
    pub min_keyword_len: usize,
    /// Keep only the first N keywords of each text (STUDYDECK_MAX_KEYWORDS, 0 = no cap)
    pub max_keywords: Option<usize>,
    /// Root deck for exported flashcards (STUDYDECK_DECK_ROOT)
    pub deck_root: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            labels_path: None,
            questions_path: None,
            reports_dir: PathBuf::from("./reports"),
            course_filter: LabelFilter::default(),
            thresholds: CoverageThresholds::default(),
            min_keyword_len: DEFAULT_MIN_LEN,
            max_keywords: Some(DEFAULT_MAX_KEYWORDS),
            deck_root: DEFAULT_DECK_ROOT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nothing is required at load time; each command checks the inputs it
    /// needs with the `require_*` helpers.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let high = parse_env("STUDYDECK_HIGH_THRESHOLD")?.unwrap_or(defaults.thresholds.high);
        let low = parse_env("STUDYDECK_LOW_THRESHOLD")?.unwrap_or(defaults.thresholds.low);
        let thresholds = CoverageThresholds::new(high, low)
            .context("Invalid STUDYDECK_HIGH_THRESHOLD / STUDYDECK_LOW_THRESHOLD")?;

        Ok(Self {
            labels_path: env::var("STUDYDECK_LABELS").ok().map(PathBuf::from),
            questions_path: env::var("STUDYDECK_QUESTIONS").ok().map(PathBuf::from),
            reports_dir: env::var("STUDYDECK_REPORTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.reports_dir),
            course_filter: env::var("STUDYDECK_COURSE_FILTER")
                .map(|list| LabelFilter::parse(&list))
                .unwrap_or_default(),
            thresholds,
            min_keyword_len: parse_env("STUDYDECK_MIN_KEYWORD_LEN")?
                .unwrap_or(defaults.min_keyword_len),
            max_keywords: match parse_env::<usize>("STUDYDECK_MAX_KEYWORDS")? {
                Some(0) => None,
                Some(max) => Some(max),
                None => defaults.max_keywords,
            },
            deck_root: env::var("STUDYDECK_DECK_ROOT").unwrap_or(defaults.deck_root),
        })
    }

    /// Replace the thresholds, keeping whichever side isn't overridden.
    pub fn override_thresholds(&mut self, high: Option<f64>, low: Option<f64>) -> Result<()> {
        if high.is_none() && low.is_none() {
            return Ok(());
        }
        self.thresholds = CoverageThresholds::new(
            high.unwrap_or(self.thresholds.high),
            low.unwrap_or(self.thresholds.low),
        )?;
        Ok(())
    }

    /// Keyword extractor for coverage scoring.
    pub fn keyword_extractor(&self) -> TokenKeywords {
        let extractor = TokenKeywords::new(self.min_keyword_len)
            .with_english_stopwords()
            .with_course_noise();
        match self.max_keywords {
            Some(max) => extractor.with_max_keywords(max),
            None => extractor,
        }
    }

    /// Check that the label listing is configured and exists.
    pub fn require_labels(&self) -> Result<&Path> {
        require_file(
            self.labels_path.as_deref(),
            "Label list",
            "--labels or STUDYDECK_LABELS",
        )
    }

    /// Check that the master question CSV is configured and exists.
    pub fn require_questions(&self) -> Result<&Path> {
        require_file(
            self.questions_path.as_deref(),
            "Question CSV",
            "--questions or STUDYDECK_QUESTIONS",
        )
    }
}

/// Check that an input path is set and points at an existing file.
pub fn require_file<'a>(path: Option<&'a Path>, what: &str, hint: &str) -> Result<&'a Path> {
    let Some(path) = path else {
        anyhow::bail!("{what} not configured. Pass {hint}.");
    };
    if !path.is_file() {
        anyhow::bail!("{what} not found at {}", path.display());
    }
    Ok(path)
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{key} has an invalid value: {value:?}")),
        _ => Ok(None),
    }
}
