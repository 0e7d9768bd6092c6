//! Five-metric poem scorer.
//!
//! # Responsibility
//! - Compute lexical diversity, structural density, sentiment, theme match
//!   and cohesion for one poem and combine them with fixed weights.
//!
//! # Invariants
//! - Empty input never touches the embedding context.
//! - Every sub-metric stays in `[0, 1]`; the final score stays in `0..=100`.
//! - A failing service call zeroes only the sub-metric that needed it.

use super::embedding::{Embedder, EmbeddingContext};
use super::lexical::word_diversity;
use super::similarity::{cosine_similarity, to_unit_interval};
use super::tagger::Tagger;
use super::{ServiceError, ServiceResult};
use crate::model::score::{AnalysisError, PoemAnalysis, ScoreBreakdown};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Poetic themes compared against the poem embedding.
pub const DEFAULT_THEMES: &[&str] = &[
    "love",
    "nature",
    "sadness",
    "hope",
    "death",
    "friendship",
    "beauty",
    "loss",
    "time",
    "journey",
];

const HAPPY_ANCHOR: &str = "happy";
const SAD_ANCHOR: &str = "sad";
const SINGLE_SENTENCE_COHESION: f64 = 0.5;

/// Percentage weights of each sub-metric. They must sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreWeights {
    pub diversity: f64,
    pub structural: f64,
    pub sentiment: f64,
    pub theme: f64,
    pub cohesion: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            diversity: 20.0,
            structural: 10.0,
            sentiment: 10.0,
            theme: 30.0,
            cohesion: 30.0,
        }
    }
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.diversity + self.structural + self.sentiment + self.theme + self.cohesion
    }

    fn values(&self) -> [f64; 5] {
        [
            self.diversity,
            self.structural,
            self.sentiment,
            self.theme,
            self.cohesion,
        ]
    }

    /// Checks that every weight is finite and non-negative and that they
    /// sum to 100.
    pub fn validate(&self) -> Result<(), String> {
        if self
            .values()
            .iter()
            .any(|weight| !weight.is_finite() || *weight < 0.0)
        {
            return Err("score weights must be finite and non-negative".to_string());
        }
        let total = self.total();
        if (total - 100.0).abs() > 1e-6 {
            return Err(format!("score weights must sum to 100, got {total}"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Metrics {
    diversity: f64,
    structural: f64,
    sentiment: f64,
    theme: f64,
    cohesion: f64,
}

impl Metrics {
    fn weighted_score(&self, weights: &ScoreWeights) -> u8 {
        let raw = self.diversity * weights.diversity
            + self.structural * weights.structural
            + self.sentiment * weights.sentiment
            + self.theme * weights.theme
            + self.cohesion * weights.cohesion;
        raw.round().clamp(0.0, 100.0) as u8
    }

    fn breakdown(&self) -> ScoreBreakdown {
        ScoreBreakdown {
            word_diversity: percent(self.diversity),
            structural_density: percent(self.structural),
            sentiment: percent(self.sentiment),
            theme_match: percent(self.theme),
            cohesion: percent(self.cohesion),
        }
    }
}

/// Poem scorer over an embedding context and an optional tagger.
pub struct Scorer {
    embeddings: Arc<EmbeddingContext>,
    tagger: Option<Arc<dyn Tagger>>,
    weights: ScoreWeights,
    themes: Vec<String>,
}

impl Scorer {
    /// Creates a scorer with default weights and themes and no tagger.
    pub fn new(embeddings: Arc<EmbeddingContext>) -> Self {
        Self {
            embeddings,
            tagger: None,
            weights: ScoreWeights::default(),
            themes: DEFAULT_THEMES.iter().map(|theme| theme.to_string()).collect(),
        }
    }

    pub fn with_tagger(mut self, tagger: Arc<dyn Tagger>) -> Self {
        self.tagger = Some(tagger);
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_themes<I, T>(mut self, themes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.themes = themes.into_iter().map(Into::into).collect();
        self
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn themes(&self) -> &[String] {
        &self.themes
    }

    /// Scores one poem.
    ///
    /// Returns a zeroed analysis with `EmptyPoem` for blank input and with
    /// `ModelUnavailable` when the embedding model cannot be loaded.
    pub fn analyze(&self, poem_text: &str) -> PoemAnalysis {
        if poem_text.trim().is_empty() {
            warn!("event=poem_analyze module=scoring status=rejected reason=empty_poem");
            return PoemAnalysis::failed(AnalysisError::EmptyPoem);
        }

        let embedder = match self.embeddings.embedder() {
            Ok(embedder) => embedder,
            Err(err) => {
                error!(
                    "event=poem_analyze module=scoring status=error error_code=model_unavailable error={}",
                    err
                );
                return PoemAnalysis::failed(AnalysisError::ModelUnavailable(err.to_string()));
            }
        };

        if self.tagger.is_none() {
            warn!(
                "event=poem_analyze module=scoring status=degraded reason=tagger_unavailable metrics=structural,cohesion"
            );
        }

        let metrics = Metrics {
            diversity: word_diversity(poem_text),
            structural: self.structural_density(poem_text),
            sentiment: degrade("sentiment", sentiment(embedder.as_ref(), poem_text)),
            theme: degrade(
                "theme_match",
                theme_match(embedder.as_ref(), poem_text, &self.themes),
            ),
            cohesion: self.cohesion(embedder.as_ref(), poem_text),
        };

        let score = metrics.weighted_score(&self.weights);
        let breakdown = metrics.breakdown();
        info!(
            "event=poem_analyze module=scoring status=ok score={} chars={}",
            score,
            poem_text.chars().count()
        );
        debug!("event=poem_analyze module=scoring breakdown={breakdown:?}");
        PoemAnalysis::scored(score, breakdown)
    }

    fn structural_density(&self, poem_text: &str) -> f64 {
        let Some(tagger) = self.tagger.as_ref() else {
            return 0.0;
        };
        let counts = match tagger.analyze(poem_text) {
            Ok(counts) => counts,
            Err(err) => {
                error!(
                    "event=metric module=scoring metric=structural_density status=error error={}",
                    err
                );
                return 0.0;
            }
        };
        if counts.word_count == 0 {
            return 0.0;
        }
        let weighted = 0.5 * counts.sentence_count as f64
            + 0.3 * counts.noun_count as f64
            + 0.2 * counts.verb_count as f64;
        (weighted / counts.word_count as f64).clamp(0.0, 1.0)
    }

    fn cohesion(&self, embedder: &dyn Embedder, poem_text: &str) -> f64 {
        let Some(tagger) = self.tagger.as_ref() else {
            return 0.0;
        };
        let result = tagger
            .sentences(poem_text)
            .and_then(|sentences| cohesion(embedder, &sentences));
        degrade("cohesion", result)
    }
}

fn sentiment(embedder: &dyn Embedder, poem_text: &str) -> ServiceResult<f64> {
    let vectors = embed_checked(embedder, &[poem_text, HAPPY_ANCHOR, SAD_ANCHOR])?;
    let happy = cosine_similarity(&vectors[0], &vectors[1]);
    let sad = cosine_similarity(&vectors[0], &vectors[2]);
    Ok(((happy - sad + 1.0) / 2.0).clamp(0.0, 1.0))
}

fn theme_match(embedder: &dyn Embedder, poem_text: &str, themes: &[String]) -> ServiceResult<f64> {
    if themes.is_empty() {
        warn!("event=metric module=scoring metric=theme_match status=skipped reason=no_themes");
        return Ok(0.0);
    }

    let mut texts: Vec<&str> = Vec::with_capacity(themes.len() + 1);
    texts.push(poem_text);
    texts.extend(themes.iter().map(String::as_str));

    let vectors = embed_checked(embedder, &texts)?;
    let (poem_vector, theme_vectors) = vectors
        .split_first()
        .ok_or_else(|| ServiceError::InvalidResponse("no poem embedding".to_string()))?;
    let best = theme_vectors
        .iter()
        .map(|theme_vector| cosine_similarity(poem_vector, theme_vector))
        .fold(-1.0_f64, f64::max);
    Ok(to_unit_interval(best))
}

fn cohesion(embedder: &dyn Embedder, sentences: &[String]) -> ServiceResult<f64> {
    let sentences: Vec<&str> = sentences
        .iter()
        .map(|sentence| sentence.trim())
        .filter(|sentence| !sentence.is_empty())
        .collect();

    match sentences.len() {
        0 => {
            warn!("event=metric module=scoring metric=cohesion status=skipped reason=no_sentences");
            Ok(0.0)
        }
        1 => {
            debug!("event=metric module=scoring metric=cohesion status=neutral reason=single_sentence");
            Ok(SINGLE_SENTENCE_COHESION)
        }
        _ => {
            let vectors = embed_checked(embedder, &sentences)?;
            let similarities: Vec<f64> = vectors
                .windows(2)
                .map(|pair| cosine_similarity(&pair[0], &pair[1]))
                .collect();
            let average = similarities.iter().sum::<f64>() / similarities.len() as f64;
            Ok(to_unit_interval(average))
        }
    }
}

/// Embeds `texts` and rejects responses with the wrong vector count.
fn embed_checked(embedder: &dyn Embedder, texts: &[&str]) -> ServiceResult<Vec<Vec<f32>>> {
    let vectors = embedder.embed(texts)?;
    if vectors.len() != texts.len() {
        return Err(ServiceError::InvalidResponse(format!(
            "expected {} embeddings, got {}",
            texts.len(),
            vectors.len()
        )));
    }
    Ok(vectors)
}

fn degrade(metric: &'static str, result: ServiceResult<f64>) -> f64 {
    match result {
        Ok(value) => value,
        Err(err) => {
            error!(
                "event=metric module=scoring metric={} status=error error={}",
                metric, err
            );
            0.0
        }
    }
}

fn percent(value: f64) -> u8 {
    (value * 100.0).round().clamp(0.0, 100.0) as u8
}
