use crate::stopwords::StopWords;
use eduai_common::{AppConfig, EduAiError, Result};
use regex::Regex;

/// Maximal runs of two or more letters, digits or underscores
///
/// Combining marks are not word characters, so they split a run.
pub const DEFAULT_TOKEN_PATTERN: &str = r"[\p{L}\p{N}_]{2,}";

/// Tokenization rules shared by corpus text and queries
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Lowercase text before matching tokens
    pub lowercase: bool,

    /// Regex whose matches are the tokens
    pub token_pattern: String,

    /// Terms never indexed
    pub stop_words: StopWords,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            stop_words: StopWords::english(),
        }
    }
}

impl AnalyzerConfig {
    /// Build analyzer settings from application configuration
    ///
    /// Reads the stop-word file when one is configured.
    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        let stop_words = match &config.stop_words_path {
            Some(path) => StopWords::from_file(path)?,
            None => StopWords::english(),
        };

        Ok(Self {
            lowercase: config.token_lowercase,
            token_pattern: config
                .token_pattern
                .clone()
                .unwrap_or_else(|| DEFAULT_TOKEN_PATTERN.to_string()),
            stop_words,
        })
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    pub fn with_token_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.token_pattern = pattern.into();
        self
    }
}

/// Compiled tokenizer + stop-word filter
#[derive(Debug, Clone)]
pub struct Analyzer {
    lowercase: bool,
    pattern: Regex,
    stop_words: StopWords,
}

impl Analyzer {
    /// Compile analyzer; fails on an invalid token pattern
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let pattern = Regex::new(&config.token_pattern).map_err(|e| {
            EduAiError::config(format!(
                "Invalid token pattern '{}': {}",
                config.token_pattern, e
            ))
        })?;

        Ok(Self {
            lowercase: config.lowercase,
            pattern,
            stop_words: config.stop_words,
        })
    }

    /// Split text into tokens without stop-word filtering
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        self.pattern
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Tokenize and drop stop words; the terms an index sees
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let mut tokens = self.tokenize(text);
        tokens.retain(|token| !self.stop_words.contains(token));
        tokens
    }

}
