use std::sync::Arc;

use crate::matching::scoring::SimilarityScorer;

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    /// Similarity scorer, constructed once at startup. Production uses the
    /// embedding model; tests substitute a stub.
    pub scorer: Arc<dyn SimilarityScorer>,
}
