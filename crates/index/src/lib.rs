//! EduAI Similarity Index
//!
//! TF-IDF vector space over course text and cosine-ranked recommendations

pub mod analyzer;
pub mod engine;
pub mod recommender;
pub mod similarity;
pub mod stopwords;
pub mod types;
pub mod vocabulary;
pub mod weighting;

// Re-export main types
pub use analyzer::{Analyzer, AnalyzerConfig, DEFAULT_TOKEN_PATTERN};
pub use eduai_common::config::DEFAULT_TOP_N;
pub use engine::SimilarityIndex;
pub use recommender::CourseRecommender;
pub use stopwords::{StopWords, ENGLISH_STOP_WORDS};
pub use types::{IndexStats, SearchResult};
pub use vocabulary::Vocabulary;
