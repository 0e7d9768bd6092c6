//! Poem record domain model.
//!
//! # Responsibility
//! - Define the persisted leaderboard record and its identity key.
//! - Validate submission-time requirements on author and poem text.
//!
//! # Invariants
//! - `score` is assigned once at submission and never mutated afterwards.
//! - Identity is `id` when present and non-blank, else `author-poem`.
//! - Legacy records without `id` or `score` must still deserialize.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Upper bound of the 0-100 score scale.
pub const MAX_SCORE: u8 = 100;

/// Validation failure for poem records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoemValidationError {
    BlankAuthor,
    BlankPoem,
    ScoreOutOfRange(u8),
}

impl Display for PoemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankAuthor => write!(f, "author must not be blank"),
            Self::BlankPoem => write!(f, "poem must not be blank"),
            Self::ScoreOutOfRange(score) => {
                write!(f, "score {score} is outside 0..={MAX_SCORE}")
            }
        }
    }
}

impl Error for PoemValidationError {}

/// One leaderboard entry as stored in the persisted collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemRecord {
    /// Stable identifier. Absent on legacy records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Only baseline poems carry a title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub author: String,
    /// Free text; line breaks are preserved.
    pub poem: String,
    #[serde(default)]
    pub score: u8,
}

impl PoemRecord {
    /// Creates a record with a fresh UUID v4 identity.
    pub fn new(author: impl Into<String>, poem: impl Into<String>, score: u8) -> Self {
        Self {
            id: Some(fresh_id()),
            title: None,
            author: author.into(),
            poem: poem.into(),
            score,
        }
    }

    /// Creates a record with a caller-provided identity.
    pub fn with_id(
        id: impl Into<String>,
        author: impl Into<String>,
        poem: impl Into<String>,
        score: u8,
    ) -> Self {
        Self {
            id: Some(id.into()),
            title: None,
            author: author.into(),
            poem: poem.into(),
            score,
        }
    }

    /// Returns the dedupe key used by leaderboard merges.
    pub fn identity_key(&self) -> String {
        match self.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("{}-{}", self.author, self.poem),
        }
    }

    /// Returns whether a non-blank `id` is present.
    pub fn has_id(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.trim().is_empty())
    }

    /// Assigns a fresh id when none is set. Existing ids are kept.
    pub fn ensure_id(&mut self) {
        if !self.has_id() {
            self.id = Some(fresh_id());
        }
    }

    /// Checks submission-level requirements.
    ///
    /// # Errors
    /// - `BlankAuthor` / `BlankPoem` when the trimmed value is empty.
    /// - `ScoreOutOfRange` when `score > 100`.
    pub fn validate(&self) -> Result<(), PoemValidationError> {
        if self.author.trim().is_empty() {
            return Err(PoemValidationError::BlankAuthor);
        }
        if self.poem.trim().is_empty() {
            return Err(PoemValidationError::BlankPoem);
        }
        if self.score > MAX_SCORE {
            return Err(PoemValidationError::ScoreOutOfRange(self.score));
        }
        Ok(())
    }
}

/// Validated submission input with trimmed author and poem text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPoem {
    pub id: Option<String>,
    pub author: String,
    pub poem: String,
    pub score: u8,
}

impl NewPoem {
    /// Trims and validates raw submission input.
    pub fn parse(author: &str, poem: &str, score: u8) -> Result<Self, PoemValidationError> {
        let author = author.trim();
        let poem = poem.trim();
        if author.is_empty() {
            return Err(PoemValidationError::BlankAuthor);
        }
        if poem.is_empty() {
            return Err(PoemValidationError::BlankPoem);
        }
        if score > MAX_SCORE {
            return Err(PoemValidationError::ScoreOutOfRange(score));
        }
        Ok(Self {
            id: None,
            author: author.to_string(),
            poem: poem.to_string(),
            score,
        })
    }

    /// Converts into a storable record, generating an id if none was given.
    pub fn into_record(self) -> PoemRecord {
        let mut record = PoemRecord {
            id: self.id,
            title: None,
            author: self.author,
            poem: self.poem,
            score: self.score,
        };
        record.ensure_id();
        record
    }
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}
