use eduai_common::{AppConfig, EduAiError, Result};
use eduai_corpus::{Corpus, CorpusLoader, Recommendation};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::analyzer::AnalyzerConfig;
use crate::engine::SimilarityIndex;
use crate::types::{IndexStats, SearchResult};

enum State {
    Unloaded,
    Loaded(Corpus),
    Built(SimilarityIndex),
}

/// Course recommender with an explicit load → build → query lifecycle
pub struct CourseRecommender {
    dataset_path: PathBuf,
    loader: CorpusLoader,
    analyzer_config: AnalyzerConfig,
    state: State,
}

impl CourseRecommender {
    /// Create an unloaded recommender for a dataset
    pub fn new(dataset_path: impl Into<PathBuf>, analyzer_config: AnalyzerConfig) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            loader: CorpusLoader::new(),
            analyzer_config,
            state: State::Unloaded,
        }
    }

    /// Create from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            config.dataset_path.clone(),
            AnalyzerConfig::from_app_config(config)?,
        ))
    }

    /// Replace the corpus loader (e.g. to force a source format)
    pub fn with_loader(mut self, loader: CorpusLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Read and validate the dataset; returns the number of courses kept
    pub fn load_data(&mut self) -> Result<usize> {
        if self.is_built() {
            return Err(EduAiError::model_build("Model already built"));
        }

        let corpus = self.loader.load(&self.dataset_path).map_err(|e| {
            error!("Error loading data: {}", e);
            e
        })?;

        let count = corpus.len();
        self.state = State::Loaded(corpus);
        Ok(count)
    }

    /// Build the similarity index from the loaded corpus
    pub fn build_model(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, State::Unloaded) {
            State::Loaded(corpus) => {
                let index = SimilarityIndex::with_config(corpus, self.analyzer_config.clone())
                    .map_err(|e| {
                        error!("Error building model: {}", e);
                        e
                    })?;
                self.state = State::Built(index);
                Ok(())
            }
            State::Unloaded => Err(EduAiError::model_build(
                "No corpus loaded, call load_data first",
            )),
            built @ State::Built(_) => {
                self.state = built;
                Err(EduAiError::model_build("Model already built"))
            }
        }
    }

    /// Load and build in one step
    pub fn initialize(&mut self) -> Result<()> {
        let count = self.load_data()?;
        self.build_model()?;
        info!(
            "Recommender ready - {} courses from {}",
            count,
            self.dataset_path.display()
        );
        Ok(())
    }

    pub fn is_built(&self) -> bool {
        matches!(self.state, State::Built(_))
    }

    /// Built index, or `NotBuilt`
    pub fn index(&self) -> Result<&SimilarityIndex> {
        match &self.state {
            State::Built(index) => Ok(index),
            _ => Err(EduAiError::not_built(
                "Call load_data and build_model before querying",
            )),
        }
    }

    pub fn recommend(&self, query: &str, top_n: usize) -> Result<Vec<Recommendation>> {
        self.index()?.recommend(query, top_n)
    }

    pub fn search(&self, query: &str, top_n: usize) -> Result<Vec<SearchResult>> {
        self.index()?.search(query, top_n)
    }

    pub fn stats(&self) -> Result<IndexStats> {
        Ok(self.index()?.stats())
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
title,description,tags,category,level
Intro to CSS,Learn web styling,\"css,web\",Web,Beginner
Freelancing 101,Start freelancing career,\"freelance,career\",Business,Beginner
";

    fn write_dataset(dir: &tempfile::TempDir, name: &str, data: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn test_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(&dir, "courses.csv", SAMPLE_CSV);
        let mut recommender = CourseRecommender::new(&path, AnalyzerConfig::default());

        assert!(matches!(
            recommender.recommend("css", 5),
            Err(EduAiError::NotBuilt(_))
        ));
        assert!(matches!(
            recommender.build_model(),
            Err(EduAiError::ModelBuild(_))
        ));

        assert_eq!(recommender.load_data().unwrap(), 2);
        assert!(matches!(recommender.stats(), Err(EduAiError::NotBuilt(_))));

        recommender.build_model().unwrap();
        assert!(recommender.is_built());

        let results = recommender.recommend("freelancing", 5).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Freelancing 101");
        assert_eq!(recommender.stats().unwrap().items, 2);
    }

    #[test]
    fn test_build_is_one_shot() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(&dir, "courses.csv", SAMPLE_CSV);
        let mut recommender = CourseRecommender::new(&path, AnalyzerConfig::default());
        recommender.initialize().unwrap();

        assert!(matches!(recommender.build_model(), Err(EduAiError::ModelBuild(_))));
        assert!(matches!(recommender.load_data(), Err(EduAiError::ModelBuild(_))));
        // Still usable
        assert_eq!(recommender.recommend("css", 1).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let mut recommender =
            CourseRecommender::new(dir.path().join("missing.csv"), AnalyzerConfig::default());
        assert!(matches!(
            recommender.initialize(),
            Err(EduAiError::DataSource(_))
        ));
        assert!(!recommender.is_built());
    }

    #[test]
    fn test_from_config_with_json_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(
            &dir,
            "courses.json",
            r#"[{"title": "MDCAT Biology", "description": "Entry test prep", "tags": ["mdcat", "biology"], "category": "Medical", "level": "Intermediate"}]"#,
        );
        let config = AppConfig {
            dataset_path: path,
            ..AppConfig::default()
        };

        let mut recommender = CourseRecommender::from_config(&config).unwrap();
        recommender.initialize().unwrap();
        let results = recommender.search("mdcat", 5).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recommendation.category, "Medical");
    }
}
