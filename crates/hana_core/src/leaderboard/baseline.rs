//! Baseline poem set shipped with the page.
//!
//! The baseline is either the built-in literal collection or a JSON document
//! with the same array shape as the persisted collection.

use crate::model::poem::PoemRecord;
use crate::repo::poem_repo::{decode_items, json_kind};
use log::info;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum BaselineError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    NotAnArray(&'static str),
}

impl Display for BaselineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read baseline `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid baseline JSON: {err}"),
            Self::NotAnArray(kind) => write!(f, "baseline must be a JSON array, got {kind}"),
        }
    }
}

impl Error for BaselineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::NotAnArray(_) => None,
        }
    }
}

/// Where the baseline set comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BaselineSource {
    #[default]
    Builtin,
    File(PathBuf),
}

impl BaselineSource {
    pub fn load(&self) -> Result<Vec<PoemRecord>, BaselineError> {
        match self {
            Self::Builtin => Ok(builtin()),
            Self::File(path) => load_from_path(path),
        }
    }
}

/// Returns the three poems seeded on a fresh leaderboard.
pub fn builtin() -> Vec<PoemRecord> {
    vec![
        seed(
            "initial-whispers",
            "Whispers of the Night",
            "Celestia Moon",
            "As the stars begin to gleam,\nAnd the world descends in a dream,\nA gentle hush, a whispered plea,\nFrom the moon, so bright and free.\n\nShadows dance in the pale moonlight,\nWhispering secrets to the quiet night,\nOf ancient tales and forgotten lore,\nAs the world outside begins to snore.\n\nIn this realm where silence thrives,\nA new sense of wonder truly survives,\nWith every heartbeat, soft and deep,\nAs the moonlit world does gently sleep.",
            72,
        ),
        seed(
            "initial-dance",
            "The Dance of Dawn",
            "Aurora Light",
            "With hues of pink and gold so grand,\nDawn breaks across the sleeping land,\nA gentle breeze begins to sigh,\nAs darkness fades from the eastern sky.\n\nBirds awaken with songs so sweet,\nAs dewdrops kiss the flowers' feet,\nA symphony of life anew,\nAs nature wakes, refreshed and true.\n\nIn this dance of day's first light,\nAll shadows flee from the vibrant sight,\nWith every step, a new embrace,\nAs the world awakens with grace.",
            68,
        ),
        seed(
            "initial-echoes",
            "Echoes in the Heart",
            "Lyric Soul",
            "In chambers of the heart, memories reside,\nEchoes of laughter, where moments glide,\nOf love and loss, a bittersweet array,\nIn the silent theatre of yesterday.\n\nEach beat, a drum, to stories untold,\nIn the depths of feeling, both brave and bold,\nA tapestry woven with joy and pain,\nIn the heart's rhythm, a soft refrain.\n\nAs the echoes linger, clear and bright,\nThey paint the soul with day's warm light,\nIn this grand hall, where time is kept,\nWhere the heart's own secrets softly slept.",
            75,
        ),
    ]
}

/// Reads a baseline JSON document from disk.
///
/// # Errors
/// - `Io` when the file cannot be read.
/// - `Parse` / `NotAnArray` when the document is not a JSON array.
///
/// Malformed array elements are skipped, not reported as errors.
pub fn load_from_path(path: &Path) -> Result<Vec<PoemRecord>, BaselineError> {
    let raw = std::fs::read_to_string(path).map_err(|source| BaselineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let poems = parse_baseline(&raw)?;
    info!(
        "event=baseline_load module=leaderboard status=ok path={} count={}",
        path.display(),
        poems.len()
    );
    Ok(poems)
}

/// Parses a baseline JSON array.
pub fn parse_baseline(raw: &str) -> Result<Vec<PoemRecord>, BaselineError> {
    match serde_json::from_str::<Value>(raw).map_err(BaselineError::Parse)? {
        Value::Array(items) => Ok(decode_items(items)),
        other => Err(BaselineError::NotAnArray(json_kind(&other))),
    }
}

fn seed(id: &str, title: &str, author: &str, poem: &str, score: u8) -> PoemRecord {
    PoemRecord {
        id: Some(id.to_string()),
        title: Some(title.to_string()),
        author: author.to_string(),
        poem: poem.to_string(),
        score,
    }
}
