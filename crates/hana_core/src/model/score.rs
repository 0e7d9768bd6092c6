//! Score result shapes returned by the scorer.
//!
//! Breakdown values are integer percentages and are never persisted; only the
//! final `score` travels with a `PoemRecord`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Per-metric percentages for a single scoring call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub word_diversity: u8,
    pub structural_density: u8,
    pub sentiment: u8,
    pub theme_match: u8,
    pub cohesion: u8,
}

impl ScoreBreakdown {
    /// Returns `(label, percentage)` pairs in display order.
    pub fn items(&self) -> [(&'static str, u8); 5] {
        [
            ("Word Diversity", self.word_diversity),
            ("Structural Density", self.structural_density),
            ("Sentiment", self.sentiment),
            ("Theme Match", self.theme_match),
            ("Cohesion", self.cohesion),
        ]
    }
}

/// Reason a scoring call could not produce a real score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisError {
    /// Input was empty or whitespace only.
    EmptyPoem,
    /// The embedding service could not be obtained at all.
    ModelUnavailable(String),
}

impl Display for AnalysisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPoem => write!(f, "empty poem text"),
            Self::ModelUnavailable(reason) => write!(f, "embedding model unavailable: {reason}"),
        }
    }
}

impl Error for AnalysisError {}

/// Outcome of `Scorer::analyze`.
///
/// When `error` is set, `score` is 0 and the breakdown is all zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemAnalysis {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<AnalysisError>,
}

impl PoemAnalysis {
    pub fn scored(score: u8, breakdown: ScoreBreakdown) -> Self {
        Self {
            score,
            breakdown,
            error: None,
        }
    }

    pub fn failed(error: AnalysisError) -> Self {
        Self {
            score: 0,
            breakdown: ScoreBreakdown::default(),
            error: Some(error),
        }
    }

    pub fn is_scored(&self) -> bool {
        self.error.is_none()
    }
}
