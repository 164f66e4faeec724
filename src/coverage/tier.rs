// Coverage tiers and their thresholds.
//
// The default bands (0.8 and 0.4) are rules of thumb, not calibrated
// values, so both are configurable.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Score bands for classifying a coverage score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageThresholds {
    /// Scores at or above this are `HighRisk` (default 0.8)
    pub high: f64,
    /// Scores at or above this (and below `high`) are `Ambiguous` (default 0.4)
    pub low: f64,
}

impl Default for CoverageThresholds {
    fn default() -> Self {
        Self {
            high: 0.8,
            low: 0.4,
        }
    }
}

impl CoverageThresholds {
    /// Build thresholds, requiring `0 <= low <= high <= 1`.
    pub fn new(high: f64, low: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&high) || !(0.0..=1.0).contains(&low) {
            anyhow::bail!("Coverage thresholds must be between 0.0 and 1.0 (high={high}, low={low})");
        }
        if low > high {
            anyhow::bail!("Low coverage threshold ({low}) must not exceed the high threshold ({high})");
        }
        Ok(Self { high, low })
    }

    pub fn classify(&self, score: f64) -> CoverageTier {
        CoverageTier::from_score(score, self)
    }
}

/// How much of a transcript the existing deck already covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CoverageTier {
    /// Clearly distinct from existing content
    New,
    /// Partial overlap; worth a manual look
    Ambiguous,
    /// Already covered; converting it would likely duplicate cards
    HighRisk,
}

impl CoverageTier {
    pub const ALL: [CoverageTier; 3] = [CoverageTier::HighRisk, CoverageTier::Ambiguous, CoverageTier::New];

    pub fn from_score(score: f64, thresholds: &CoverageThresholds) -> Self {
        match score {
            s if s >= thresholds.high => CoverageTier::HighRisk,
            s if s >= thresholds.low => CoverageTier::Ambiguous,
            _ => CoverageTier::New,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageTier::New => "New",
            CoverageTier::Ambiguous => "Ambiguous",
            CoverageTier::HighRisk => "High Risk",
        }
    }
}

impl std::fmt::Display for CoverageTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands() {
        let t = CoverageThresholds::default();
        assert_eq!(t.classify(1.0), CoverageTier::HighRisk);
        assert_eq!(t.classify(0.8), CoverageTier::HighRisk);
        assert_eq!(t.classify(0.799), CoverageTier::Ambiguous);
        assert_eq!(t.classify(0.4), CoverageTier::Ambiguous);
        assert_eq!(t.classify(0.399), CoverageTier::New);
        assert_eq!(t.classify(0.0), CoverageTier::New);
    }

    #[test]
    fn test_custom_bands() {
        let t = CoverageThresholds::new(0.5, 0.3).unwrap();
        assert_eq!(t.classify(0.5), CoverageTier::HighRisk);
        assert_eq!(t.classify(0.3), CoverageTier::Ambiguous);
    }

    #[test]
    fn test_invalid_thresholds() {
        assert!(CoverageThresholds::new(0.3, 0.5).is_err());
        assert!(CoverageThresholds::new(1.2, 0.5).is_err());
        assert!(CoverageThresholds::new(0.8, -0.1).is_err());
        assert!(CoverageThresholds::new(f64::NAN, 0.1).is_err());
    }
}
