//! Poem scoring heuristics and the services they consume.
//!
//! # Responsibility
//! - Turn poem text into a 0-100 score with a five-metric breakdown.
//! - Define the embedding and tagging service seams.
//!
//! # Invariants
//! - Service failures degrade only the affected sub-score to 0.
//! - Only total absence of the embedding service aborts a scoring call.
//! - Scoring has no side effects beyond calling the services.

pub mod embedding;
pub mod lexical;
pub mod scorer;
pub mod similarity;
pub mod tagger;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub use embedding::{
    Embedder, EmbeddingContext, EmbeddingLoader, HashedEmbedder, HashedEmbedderLoader,
    DEFAULT_EMBEDDING_DIM,
};
pub use lexical::{word_diversity, STOPWORDS};
pub use scorer::{ScoreWeights, Scorer, DEFAULT_THEMES};
pub use similarity::cosine_similarity;
pub use tagger::{HeuristicTagger, TagCounts, Tagger};

/// Failure reported by an embedding or tagging service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service could not be obtained or initialized.
    Unavailable(String),
    /// The service was reachable but the call failed.
    Failed(String),
    /// The service answered with a shape the caller cannot use.
    InvalidResponse(String),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "service unavailable: {reason}"),
            Self::Failed(reason) => write!(f, "service call failed: {reason}"),
            Self::InvalidResponse(reason) => write!(f, "invalid service response: {reason}"),
        }
    }
}

impl Error for ServiceError {}

pub type ServiceResult<T> = Result<T, ServiceError>;
