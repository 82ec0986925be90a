use chrono::{DateTime, Utc};
use eduai_corpus::Recommendation;
use serde::Serialize;

/// Search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Corpus position of the course
    pub position: usize,

    /// Cosine similarity (0.0 to 1.0)
    pub score: f32,

    /// Course fields shown to the caller
    #[serde(flatten)]
    pub recommendation: Recommendation,
}

impl SearchResult {
    pub fn new(position: usize, score: f32, recommendation: Recommendation) -> Self {
        Self {
            position,
            score,
            recommendation,
        }
    }
}

/// Index statistics
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    /// Courses in the corpus
    pub items: usize,

    /// Distinct indexed terms
    pub vocabulary_size: usize,

    /// Courses with no indexed terms (never recommended)
    pub empty_items: usize,

    /// Build completion time
    pub built_at: DateTime<Utc>,
}
