//! Semantic similarity scoring between two text blobs.
//!
//! Default backend: `EmbeddingScorer`, a local sentence-embedding model
//! (fastembed `AllMiniLML6V2`) with cosine similarity. The trait seam lets
//! tests substitute a deterministic stub without touching the matcher or the
//! handlers.

use std::path::Path;
use std::sync::Mutex;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::errors::AppError;

/// Scores how semantically similar two texts are, on a 0-100 scale with two
/// decimals. Deterministic for a fixed backend and fixed inputs.
///
/// Carried in `AppState` as `Arc<dyn SimilarityScorer>`.
pub trait SimilarityScorer: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> Result<f64, AppError>;
}

/// Production scorer backed by a pretrained sentence-embedding model.
///
/// The model is loaded once at startup and reused for every run. `embed`
/// needs `&mut self`, hence the mutex; only one matching run executes at a
/// time, so there is no contention.
pub struct EmbeddingScorer {
    model: Mutex<TextEmbedding>,
}

impl EmbeddingScorer {
    pub fn new(cache_dir: Option<&Path>) -> Result<Self, AppError> {
        let mut options =
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(dir.to_path_buf());
        }

        let model = TextEmbedding::try_new(options)
            .map_err(|e| AppError::Scorer(format!("failed to initialize embedding model: {e}")))?;

        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl SimilarityScorer for EmbeddingScorer {
    fn similarity(&self, a: &str, b: &str) -> Result<f64, AppError> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| AppError::Scorer("embedding model lock poisoned".to_string()))?;

        // Both texts go through the model in a single call.
        let mut embeddings = model
            .embed(vec![a, b], None)
            .map_err(|e| AppError::Scorer(format!("embedding failed: {e}")))?;

        if embeddings.len() != 2 {
            return Err(AppError::Scorer(format!(
                "expected 2 embeddings, got {}",
                embeddings.len()
            )));
        }
        let second = embeddings.pop().unwrap_or_default();
        let first = embeddings.pop().unwrap_or_default();

        Ok(scale_to_percent(cosine_similarity(&first, &second)))
    }
}

/// Cosine similarity between two vectors. Zero when either norm is zero.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Scale a cosine value to a 0-100 percentage, clamped and rounded to two
/// decimals. Raw cosine may come out slightly negative.
fn scale_to_percent(cosine: f32) -> f64 {
    round2((f64::from(cosine) * 100.0).clamp(0.0, 100.0))
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fixed-score stub for matcher and handler tests.
#[cfg(test)]
pub(crate) struct StubScorer(pub f64);

#[cfg(test)]
impl SimilarityScorer for StubScorer {
    fn similarity(&self, _a: &str, _b: &str) -> Result<f64, AppError> {
        Ok(self.0)
    }
}
