//! Poem collection repository over a key-value store.
//!
//! # Responsibility
//! - Encode the persisted collection as one JSON array under one key.
//! - Tolerate corrupted or legacy payloads on read.
//!
//! # Invariants
//! - `load` never fails: unreadable, unparsable or non-array payloads read
//!   as an empty collection and are logged.
//! - Individual malformed elements are skipped with a warning; the rest
//!   of the collection is kept.

use crate::model::poem::{PoemRecord, PoemValidationError};
use crate::storage::{KeyValueStore, StoreError};
use log::{debug, error, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key the collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "poems";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for poem persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(PoemValidationError),
    Storage(StoreError),
    Serialization(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "failed to encode poem collection: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<PoemValidationError> for RepoError {
    fn from(value: PoemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Repository interface for the persisted poem collection.
pub trait PoemRepository {
    /// Reads the full collection, degrading to empty on any failure.
    fn load(&self) -> Vec<PoemRecord>;
    /// Replaces the full collection.
    fn save(&self, poems: &[PoemRecord]) -> RepoResult<()>;
}

/// Repository storing the collection as a JSON array in a `KeyValueStore`.
pub struct KvPoemRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvPoemRepository<S> {
    /// Uses the default `poems` key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }
}

impl<S: KeyValueStore> PoemRepository for KvPoemRepository<S> {
    fn load(&self) -> Vec<PoemRecord> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                error!(
                    "event=poems_load module=repo status=error error_code=storage_read_failed key={} error={}",
                    self.key, err
                );
                return Vec::new();
            }
        };

        let poems = decode_collection(&raw);
        debug!(
            "event=poems_load module=repo status=ok key={} count={}",
            self.key,
            poems.len()
        );
        poems
    }

    fn save(&self, poems: &[PoemRecord]) -> RepoResult<()> {
        let encoded = serde_json::to_string(poems)?;
        if let Err(err) = self.store.set(&self.key, &encoded) {
            error!(
                "event=poems_save module=repo status=error error_code=storage_write_failed key={} error={}",
                self.key, err
            );
            return Err(err.into());
        }
        debug!(
            "event=poems_save module=repo status=ok key={} count={}",
            self.key,
            poems.len()
        );
        Ok(())
    }
}

/// Decodes a stored JSON payload into records, skipping malformed elements.
///
/// Shared with baseline loading, which accepts the same array shape.
pub fn decode_collection(raw: &str) -> Vec<PoemRecord> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => decode_items(items),
        Ok(other) => {
            warn!(
                "event=poems_decode module=repo status=error error_code=not_an_array kind={}",
                json_kind(&other)
            );
            Vec::new()
        }
        Err(err) => {
            warn!(
                "event=poems_decode module=repo status=error error_code=invalid_json error={}",
                err
            );
            Vec::new()
        }
    }
}

pub(crate) fn decode_items(items: Vec<Value>) -> Vec<PoemRecord> {
    let mut poems = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<PoemRecord>(item) {
            Ok(poem) => poems.push(poem),
            Err(err) => warn!(
                "event=poems_decode module=repo status=skip index={} error={}",
                index, err
            ),
        }
    }
    poems
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
