//! Core logic for Hana's poem scoring and leaderboard.
//! This crate owns scoring heuristics, merge rules and persistence; callers
//! only supply services and render sinks.

pub mod companion;
pub mod config;
pub mod db;
pub mod leaderboard;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod scoring;
pub mod service;
pub mod storage;

pub use config::{ConfigError, HanaConfig, ScoringConfig};
pub use leaderboard::baseline::{BaselineError, BaselineSource};
pub use leaderboard::{merge_and_rank, top_n};
pub use logging::{
    default_log_level, init_logging, init_logging_with, logging_status, LogTarget, LoggingError,
};
pub use model::poem::{NewPoem, PoemRecord, PoemValidationError};
pub use model::score::{AnalysisError, PoemAnalysis, ScoreBreakdown};
pub use render::{LeaderboardEntry, LeaderboardSink, NullSink, RecordingSink, ScoreSink};
pub use repo::poem_repo::{KvPoemRepository, PoemRepository, RepoError, RepoResult};
pub use scoring::{
    cosine_similarity, Embedder, EmbeddingContext, EmbeddingLoader, HeuristicTagger, ScoreWeights,
    Scorer, ServiceError, ServiceResult, TagCounts, Tagger,
};
pub use service::leaderboard_service::LeaderboardService;
pub use service::submission_service::{SubmissionOutcome, SubmissionService, SubmitError};
pub use storage::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Builds a scorer from config using the built-in hashed embedder and the
/// heuristic tagger.
pub fn default_scorer(config: &ScoringConfig) -> Scorer {
    let context = EmbeddingContext::hashed(config.embedding_dim);
    Scorer::new(std::sync::Arc::new(context))
        .with_tagger(std::sync::Arc::new(HeuristicTagger::new()))
        .with_weights(config.weights)
        .with_themes(config.themes.iter().cloned())
}
