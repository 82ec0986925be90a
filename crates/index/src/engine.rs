use chrono::{DateTime, Utc};
use eduai_common::{EduAiError, Result};
use eduai_corpus::{Corpus, Recommendation};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use tracing::{debug, error, info, warn};

use crate::analyzer::{Analyzer, AnalyzerConfig};
use crate::types::{IndexStats, SearchResult};
use crate::vocabulary::Vocabulary;
use crate::weighting::{smoothed_idf, tfidf_matrix, tfidf_vector};

/// TF-IDF similarity index over a fixed course corpus
///
/// Immutable once built; every query only reads shared state, so a built
/// index can be shared across threads without locking.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    corpus: Corpus,
    analyzer: Analyzer,
    vocabulary: Vocabulary,
    idf: Array1<f32>,
    /// One unit-length (or zero) row per course
    weights: Array2<f32>,
    empty_items: usize,
    built_at: DateTime<Utc>,
}

impl SimilarityIndex {
    /// Build the vector space for a corpus
    pub fn build(corpus: Corpus, analyzer: Analyzer) -> Result<Self> {
        if corpus.is_empty() {
            return Err(EduAiError::model_build("Corpus is empty, nothing to index"));
        }

        let documents: Vec<Vec<String>> = corpus
            .iter()
            .map(|item| analyzer.analyze(item.combined_text()))
            .collect();

        let vocabulary = Vocabulary::from_documents(&documents);
        if vocabulary.is_empty() {
            return Err(EduAiError::model_build(format!(
                "Empty vocabulary: all {} courses reduce to stop words",
                corpus.len()
            )));
        }

        let doc_freq = vocabulary.document_frequencies(&documents);
        let idf = smoothed_idf(corpus.len(), &doc_freq);
        let weights = tfidf_matrix(&documents, &vocabulary, &idf);

        let empty_items = documents.iter().filter(|doc| doc.is_empty()).count();
        if empty_items > 0 {
            warn!(
                "{} courses have no indexable terms and will never be recommended",
                empty_items
            );
        }

        info!(
            "TF-IDF model built successfully - {} courses, {} terms",
            corpus.len(),
            vocabulary.len()
        );

        Ok(Self {
            corpus,
            analyzer,
            vocabulary,
            idf,
            weights,
            empty_items,
            built_at: Utc::now(),
        })
    }

    /// Compile the analyzer and build
    pub fn with_config(corpus: Corpus, config: AnalyzerConfig) -> Result<Self> {
        Self::build(corpus, Analyzer::new(config)?)
    }

    /// Top courses for a free-text query
    ///
    /// Only courses with strictly positive similarity are returned, so an
    /// empty or unmatched query yields an empty list.
    pub fn recommend(&self, query: &str, top_n: usize) -> Result<Vec<Recommendation>> {
        Ok(self
            .search(query, top_n)?
            .into_iter()
            .map(|result| result.recommendation)
            .collect())
    }

    /// Like [`recommend`](Self::recommend), keeping scores and positions
    pub fn search(&self, query: &str, top_n: usize) -> Result<Vec<SearchResult>> {
        if top_n == 0 {
            return Err(EduAiError::invalid_query("top_n must be at least 1"));
        }

        // Scoring faults never reach the caller
        match self.rank(query, top_n) {
            Ok(results) => Ok(results),
            Err(e) => {
                error!("Recommendation error: {}", e);
                Ok(Vec::new())
            }
        }
    }

    fn rank(&self, query: &str, top_n: usize) -> Result<Vec<SearchResult>> {
        let query_vec = self.query_vector(query);
        if query_vec.iter().all(|&w| w == 0.0) {
            debug!("No indexed terms in query '{}'", query);
            return Ok(Vec::new());
        }

        let scores = self.score(&query_vec)?;
        if let Some((pos, score)) = scores.iter().enumerate().find(|(_, s)| !s.is_finite()) {
            return Err(EduAiError::internal(format!(
                "Non-finite similarity {} for course {}",
                score, pos
            )));
        }

        let mut ranked: Vec<(usize, f32)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, score)| *score > 0.0)
            .collect();

        // Score desc, then corpus order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(top_n);

        let results = ranked
            .into_iter()
            .map(|(pos, score)| {
                self.corpus
                    .get(pos)
                    .map(|item| SearchResult::new(pos, score, item.recommendation()))
                    .ok_or_else(|| {
                        EduAiError::internal(format!("Score row {} has no course", pos))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Search completed - {} results for '{}'", results.len(), query);
        Ok(results)
    }

    /// Cosine similarity of every course against a unit query vector
    fn score(&self, query_vec: &Array1<f32>) -> Result<Array1<f32>> {
        if query_vec.len() != self.weights.ncols() {
            return Err(EduAiError::internal(format!(
                "Query vector has {} dimensions, index has {}",
                query_vec.len(),
                self.weights.ncols()
            )));
        }
        Ok(self.weights.dot(query_vec))
    }

    /// Project a query into the fixed vector space
    ///
    /// Unknown terms are dropped; the vocabulary never grows.
    pub fn query_vector(&self, query: &str) -> Array1<f32> {
        let terms = self.analyzer.analyze(query);
        tfidf_vector(&terms, &self.vocabulary, &self.idf)
    }

    /// Get index statistics
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            items: self.corpus.len(),
            vocabulary_size: self.vocabulary.len(),
            empty_items: self.empty_items,
            built_at: self.built_at,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn idf(&self) -> ArrayView1<'_, f32> {
        self.idf.view()
    }

    /// Term-weight matrix (courses × terms)
    pub fn weights(&self) -> ArrayView2<'_, f32> {
        self.weights.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_TOP_N;
    use crate::similarity::l2_norm;
    use crate::stopwords::StopWords;
    use eduai_corpus::Item;

    fn sample_corpus() -> Corpus {
        Corpus::from_items(vec![
            Item::new("Intro to CSS", "Learn web styling", "css,web", "Web", "Beginner"),
            Item::new(
                "Freelancing 101",
                "Start freelancing career",
                "freelance,career",
                "Business",
                "Beginner",
            ),
        ])
    }

    fn build(corpus: Corpus) -> SimilarityIndex {
        SimilarityIndex::with_config(corpus, AnalyzerConfig::default()).unwrap()
    }

    #[test]
    fn test_css_example() {
        let index = build(sample_corpus());
        let results = index.recommend("css", 1).unwrap();

        assert_eq!(
            results,
            vec![Recommendation {
                title: "Intro to CSS".to_string(),
                category: "Web".to_string(),
                level: "Beginner".to_string(),
                description: "Learn web styling".to_string(),
            }]
        );
    }

    #[test]
    fn test_zero_similarity_items_are_not_returned() {
        let index = build(sample_corpus());
        let results = index.recommend("css", DEFAULT_TOP_N).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_empty_query() {
        let index = build(sample_corpus());
        assert!(index.recommend("", DEFAULT_TOP_N).unwrap().is_empty());
    }

    #[test]
    fn test_stop_word_and_unknown_queries() {
        let index = build(sample_corpus());
        assert!(index.recommend("the and of", 3).unwrap().is_empty());
        assert!(index.recommend("quantum blockchain", 3).unwrap().is_empty());
        assert_eq!(index.vocabulary().position("quantum"), None);
    }

    #[test]
    fn test_zero_top_n_is_invalid() {
        let index = build(sample_corpus());
        let err = index.recommend("css", 0).unwrap_err();
        assert!(matches!(err, EduAiError::InvalidQuery(_)));
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let corpus = Corpus::from_items(vec![
            Item::new("Python Basics", "Programming", "python", "Code", "Beginner"),
            Item::new("Cooking", "Kitchen skills", "food", "Life", "Beginner"),
            Item::new("Python Basics", "Programming", "python", "Code", "Advanced"),
        ]);
        let index = build(corpus);

        let results = index.search("python", 5).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].position, 0);
        assert_eq!(results[1].position, 2);
        assert_eq!(results[0].score, results[1].score);
    }

    #[test]
    fn test_ranking_prefers_closer_text() {
        let corpus = Corpus::from_items(vec![
            Item::new("Web Design", "Layouts and colour", "design", "Web", "Beginner"),
            Item::new("CSS Grid", "Advanced css layouts with css grid", "css,grid", "Web", "Advanced"),
            Item::new("Accounting", "Ledgers", "finance", "Business", "Beginner"),
        ]);
        let index = build(corpus);

        let results = index.search("css layouts", 3).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].recommendation.title, "CSS Grid");
        assert_eq!(results[1].recommendation.title, "Web Design");
        assert!(results[0].score > results[1].score);
        assert!(results[0].score <= 1.0 + 1e-5);
    }

    #[test]
    fn test_full_text_query_ranks_item_first() {
        let index = build(sample_corpus());
        let item = index.corpus().get(1).unwrap();
        let results = index.search(item.combined_text(), 2).unwrap();
        assert_eq!(results[0].position, 1);
        assert!((results[0].score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_recommend_is_idempotent() {
        let index = build(sample_corpus());
        let first = index.search("web career", 5).unwrap();
        let second = index.search("web career", 5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rows_are_unit_or_zero() {
        let corpus = Corpus::from_items(vec![
            Item::new("Intro to CSS", "Learn web styling", "css,web", "Web", "Beginner"),
            Item::new("The", "of", "and", "Misc", ""),
        ]);
        let index = build(corpus);

        assert!((l2_norm(index.weights().row(0)) - 1.0).abs() < 1e-5);
        assert_eq!(l2_norm(index.weights().row(1)), 0.0);
        assert_eq!(index.stats().empty_items, 1);
    }

    #[test]
    fn test_empty_corpus_fails_build() {
        let err = SimilarityIndex::with_config(Corpus::default(), AnalyzerConfig::default())
            .unwrap_err();
        assert!(matches!(err, EduAiError::ModelBuild(_)));
    }

    #[test]
    fn test_stop_word_corpus_fails_build() {
        let corpus = Corpus::from_items(vec![Item::new("The", "and of", "to", "", "")]);
        let err = SimilarityIndex::with_config(corpus, AnalyzerConfig::default()).unwrap_err();
        assert!(matches!(err, EduAiError::ModelBuild(_)));
    }

    #[test]
    fn test_custom_stop_words_change_vocabulary() {
        let config = AnalyzerConfig::default().with_stop_words(StopWords::new(["css"]));
        let index = SimilarityIndex::with_config(sample_corpus(), config).unwrap();
        assert_eq!(index.vocabulary().position("css"), None);
        assert!(index.recommend("css", 5).unwrap().is_empty());
    }

    #[test]
    fn test_stats() {
        let index = build(sample_corpus());
        let stats = index.stats();
        assert_eq!(stats.items, 2);
        // intro css learn web styling / freelancing 101 start career freelance
        assert_eq!(stats.vocabulary_size, 10);
        assert_eq!(stats.empty_items, 0);
        assert_eq!(index.idf().len(), 10);
    }

    #[test]
    fn test_non_finite_scores_degrade_to_empty() {
        let mut index = build(sample_corpus());
        index.weights[[0, 0]] = f32::NAN;

        let results = index.recommend("css web", 5).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_result_serializes_flat() {
        let index = build(sample_corpus());
        let results = index.search("css", 1).unwrap();
        let json = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(json["title"], "Intro to CSS");
        assert_eq!(json["position"], 0);
        assert!(json.get("tags").is_none());
    }

    #[test]
    fn test_concurrent_readers() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SimilarityIndex>();

        let index = build(sample_corpus());
        let expected = index.recommend("freelancing", 5).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| index.recommend("freelancing", 5).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
