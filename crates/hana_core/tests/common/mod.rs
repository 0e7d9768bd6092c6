#![allow(dead_code)]

use hana_core::{Embedder, EmbeddingLoader, ServiceError, ServiceResult, TagCounts, Tagger};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Embedder answering from a fixed table; unknown texts map to `fallback`.
pub struct TableEmbedder {
    pub table: HashMap<String, Vec<f32>>,
    pub fallback: Vec<f32>,
}

impl TableEmbedder {
    pub fn new(entries: &[(&str, [f32; 3])], fallback: [f32; 3]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(text, vector)| (text.to_string(), vector.to_vec()))
                .collect(),
            fallback: fallback.to_vec(),
        }
    }
}

impl Embedder for TableEmbedder {
    fn embed(&self, texts: &[&str]) -> ServiceResult<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                self.table
                    .get(*text)
                    .cloned()
                    .unwrap_or_else(|| self.fallback.clone())
            })
            .collect())
    }
}

pub struct FailingEmbedder;

impl Embedder for FailingEmbedder {
    fn embed(&self, _texts: &[&str]) -> ServiceResult<Vec<Vec<f32>>> {
        Err(ServiceError::Failed("backend offline".to_string()))
    }
}

/// Returns a single vector regardless of how many texts were sent.
pub struct ShortEmbedder;

impl Embedder for ShortEmbedder {
    fn embed(&self, _texts: &[&str]) -> ServiceResult<Vec<Vec<f32>>> {
        Ok(vec![vec![1.0, 0.0, 0.0]])
    }
}

/// Loader that counts calls, optionally sleeps, panics on the first `panics`
/// attempts and fails the next `failures` attempts.
pub struct CountingLoader {
    pub calls: Arc<AtomicUsize>,
    pub delay: Duration,
    pub panics: usize,
    pub failures: usize,
    pub embedder: Arc<dyn Embedder>,
}

impl CountingLoader {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            delay: Duration::ZERO,
            panics: 0,
            failures: 0,
            embedder,
        }
    }
}

impl EmbeddingLoader for CountingLoader {
    fn load(&self) -> ServiceResult<Arc<dyn Embedder>> {
        let attempt = self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        if attempt < self.panics {
            panic!("loader attempt {attempt} crashed");
        }
        if attempt < self.panics.saturating_add(self.failures) {
            return Err(ServiceError::Unavailable(format!("attempt {attempt} failed")));
        }
        Ok(Arc::clone(&self.embedder))
    }
}

/// Tagger with canned answers.
pub struct FixedTagger {
    pub counts: TagCounts,
    pub sentences: Vec<String>,
}

impl FixedTagger {
    pub fn new(counts: TagCounts, sentences: &[&str]) -> Self {
        Self {
            counts,
            sentences: sentences.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Tagger for FixedTagger {
    fn analyze(&self, _text: &str) -> ServiceResult<TagCounts> {
        Ok(self.counts)
    }

    fn sentences(&self, _text: &str) -> ServiceResult<Vec<String>> {
        Ok(self.sentences.clone())
    }
}

pub struct BrokenTagger;

impl Tagger for BrokenTagger {
    fn analyze(&self, _text: &str) -> ServiceResult<TagCounts> {
        Err(ServiceError::Failed("tagger crashed".to_string()))
    }

    fn sentences(&self, _text: &str) -> ServiceResult<Vec<String>> {
        Err(ServiceError::Failed("tagger crashed".to_string()))
    }
}
