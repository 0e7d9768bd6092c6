//! Sentence-embedding service seam and its lazily loaded context.
//!
//! # Responsibility
//! - Define the `Embedder` capability consumed by the scorer.
//! - Memoize the expensive model load behind an explicit context object.
//! - Provide a deterministic local embedder for headless use.
//!
//! # Invariants
//! - At most one load runs at a time; callers arriving during a load wait
//!   for it and share its outcome.
//! - A successful load is kept for the context lifetime.
//! - A failed or panicking load leaves the context empty; only a later call
//!   retries.

use super::{ServiceError, ServiceResult};
use log::{error, info};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Dimension used by `HashedEmbedder` unless configured otherwise.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Produces one fixed-length vector per input text.
pub trait Embedder: Send + Sync {
    fn embed(&self, texts: &[&str]) -> ServiceResult<Vec<Vec<f32>>>;
}

/// Loads an embedder. Called at most once per successful context load.
pub trait EmbeddingLoader: Send + Sync {
    fn load(&self) -> ServiceResult<Arc<dyn Embedder>>;
}

#[derive(Default)]
struct LoadSlot {
    model: Option<Arc<dyn Embedder>>,
    loading: bool,
    /// Incremented each time a load attempt finishes.
    attempts: u64,
    last_error: Option<ServiceError>,
}

/// Explicitly constructed holder of the lazily loaded embedding model.
///
/// Share it behind `Arc` when several callers score concurrently.
pub struct EmbeddingContext {
    loader: Box<dyn EmbeddingLoader>,
    slot: Mutex<LoadSlot>,
    finished: Condvar,
}

impl EmbeddingContext {
    pub fn new(loader: impl EmbeddingLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            slot: Mutex::new(LoadSlot::default()),
            finished: Condvar::new(),
        }
    }

    /// Context over the built-in hashed embedder.
    pub fn hashed(dimension: usize) -> Self {
        Self::new(HashedEmbedderLoader::new(dimension))
    }

    /// Returns whether a model has been loaded successfully.
    pub fn is_loaded(&self) -> bool {
        self.lock_slot()
            .map(|slot| slot.model.is_some())
            .unwrap_or(false)
    }

    /// Returns the loaded embedder, loading it on first use.
    ///
    /// # Errors
    /// - The loader's error when the load this call started or waited on
    ///   failed.
    pub fn embedder(&self) -> ServiceResult<Arc<dyn Embedder>> {
        let mut slot = self.lock_slot()?;
        if let Some(model) = slot.model.as_ref() {
            return Ok(Arc::clone(model));
        }

        if slot.loading {
            let awaited_attempt = slot.attempts;
            while slot.loading && slot.attempts == awaited_attempt {
                slot = self
                    .finished
                    .wait(slot)
                    .map_err(|_| poisoned_slot_error())?;
            }
            return match slot.model.as_ref() {
                Some(model) => Ok(Arc::clone(model)),
                None => Err(slot.last_error.clone().unwrap_or_else(|| {
                    ServiceError::Unavailable("embedding model load did not complete".to_string())
                })),
            };
        }

        slot.loading = true;
        drop(slot);

        info!("event=embedding_load module=scoring status=start");
        let started_at = Instant::now();
        let mut pending = PendingLoad {
            context: self,
            settled: false,
        };
        let outcome = self.loader.load();

        let mut slot = self.lock_slot()?;
        slot.loading = false;
        slot.attempts += 1;
        let result = match outcome {
            Ok(model) => {
                info!(
                    "event=embedding_load module=scoring status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                slot.model = Some(Arc::clone(&model));
                slot.last_error = None;
                Ok(model)
            }
            Err(err) => {
                error!(
                    "event=embedding_load module=scoring status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                slot.last_error = Some(err.clone());
                Err(err)
            }
        };
        pending.settled = true;
        drop(slot);
        self.finished.notify_all();
        result
    }

    fn lock_slot(&self) -> ServiceResult<MutexGuard<'_, LoadSlot>> {
        self.slot.lock().map_err(|_| poisoned_slot_error())
    }
}

/// Releases the load slot when a load exits without recording its outcome,
/// which happens when the loader panics.
struct PendingLoad<'a> {
    context: &'a EmbeddingContext,
    settled: bool,
}

impl Drop for PendingLoad<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut slot = self
            .context
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        slot.loading = false;
        slot.attempts += 1;
        slot.last_error = Some(ServiceError::Unavailable(
            "embedding model load aborted".to_string(),
        ));
        drop(slot);
        error!("event=embedding_load module=scoring status=error error_code=load_aborted");
        self.context.finished.notify_all();
    }
}

fn poisoned_slot_error() -> ServiceError {
    ServiceError::Unavailable("embedding context lock poisoned".to_string())
}

/// Deterministic hashed bag-of-words embedder.
///
/// Each lower-cased alphanumeric token is hashed into one bucket; the vector
/// is then L2-normalized. Texts sharing vocabulary score as similar, texts
/// with disjoint vocabulary score 0.
#[derive(Debug, Clone)]
pub struct HashedEmbedder {
    dimension: usize,
}

impl HashedEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.dimension];
        for token in tokenize(text) {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let index = (hasher.finish() % self.dimension as u64) as usize;
            vector[index] += 1.0;
        }
        normalize_vector(&mut vector);
        vector
    }
}

impl Default for HashedEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIM)
    }
}

impl Embedder for HashedEmbedder {
    fn embed(&self, texts: &[&str]) -> ServiceResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}

/// Loader producing a `HashedEmbedder`; never fails.
#[derive(Debug, Clone)]
pub struct HashedEmbedderLoader {
    dimension: usize,
}

impl HashedEmbedderLoader {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl EmbeddingLoader for HashedEmbedderLoader {
    fn load(&self) -> ServiceResult<Arc<dyn Embedder>> {
        Ok(Arc::new(HashedEmbedder::new(self.dimension)))
    }
}

fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

fn normalize_vector(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{tokenize, Embedder, HashedEmbedder};

    #[test]
    fn tokenize_lowercases_and_splits_on_punctuation() {
        assert_eq!(tokenize("Moon, STARS!night"), vec!["moon", "stars", "night"]);
    }

    #[test]
    fn hashed_embedding_is_deterministic_and_normalized() {
        let embedder = HashedEmbedder::new(64);
        let vectors = embedder.embed(&["hello world", "hello world"]).unwrap();
        assert_eq!(vectors[0], vectors[1]);
        let norm: f32 = vectors[0].iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn text_without_tokens_embeds_to_zero_vector() {
        let embedder = HashedEmbedder::new(16);
        let vectors = embedder.embed(&["?!"]).unwrap();
        assert!(vectors[0].iter().all(|v| *v == 0.0));
    }
}
