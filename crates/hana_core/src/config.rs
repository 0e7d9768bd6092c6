//! Runtime configuration loaded from an optional JSON file.
//!
//! # Invariants
//! - Every field has a default; an empty object `{}` is a valid config.
//! - `HanaConfig::load` only returns configs that passed `validate`.

use crate::logging::default_log_level;
use crate::repo::poem_repo::DEFAULT_STORAGE_KEY;
use crate::scoring::{ScoreWeights, DEFAULT_EMBEDDING_DIM, DEFAULT_THEMES};
use crate::service::submission_service::DEFAULT_TOP_N;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE_NAME: &str = "hana.sqlite3";
const DEFAULT_STDERR_LOG_LEVEL: &str = "warn";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config JSON: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

/// Scorer tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    pub themes: Vec<String>,
    /// Vector size of the built-in hashed embedder.
    pub embedding_dim: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            themes: DEFAULT_THEMES.iter().map(|theme| theme.to_string()).collect(),
            embedding_dim: DEFAULT_EMBEDDING_DIM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HanaConfig {
    /// Unset means `warn` on stderr and the build-mode default for files.
    pub log_level: Option<String>,
    /// Rolling file logs are written here when set; must be absolute.
    pub log_dir: Option<PathBuf>,
    pub db_path: PathBuf,
    pub storage_key: String,
    pub top_n: usize,
    /// JSON baseline document; the built-in poems are used when unset.
    pub baseline_path: Option<PathBuf>,
    pub scoring: ScoringConfig,
}

impl Default for HanaConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            log_dir: None,
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            top_n: DEFAULT_TOP_N,
            baseline_path: None,
            scoring: ScoringConfig::default(),
        }
    }
}

impl HanaConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Level logging starts at for the configured target.
    pub fn effective_log_level(&self) -> &str {
        match (self.log_level.as_deref(), self.log_dir.as_ref()) {
            (Some(level), _) => level,
            (None, Some(_)) => default_log_level(),
            (None, None) => DEFAULT_STDERR_LOG_LEVEL,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.weights.validate().map_err(ConfigError::Invalid)?;
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".to_string()));
        }
        if self.scoring.embedding_dim == 0 {
            return Err(ConfigError::Invalid(
                "scoring.embedding_dim must be at least 1".to_string(),
            ));
        }
        if self.scoring.themes.iter().any(|theme| theme.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "scoring.themes must not contain blank entries".to_string(),
            ));
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be blank".to_string()));
        }
        Ok(())
    }
}
