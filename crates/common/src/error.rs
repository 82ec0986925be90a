/// EduAI error types
#[derive(Debug, thiserror::Error)]
pub enum EduAiError {
    /// Corpus source could not be read or parsed
    #[error("Data source error: {0}")]
    DataSource(String),

    /// Similarity model could not be built
    #[error("Model build error: {0}")]
    ModelBuild(String),

    /// Caller passed an unusable query
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Query issued before the model was built
    #[error("Model not built: {0}")]
    NotBuilt(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EduAiError {
    /// Create data source error
    pub fn data_source<S: Into<String>>(msg: S) -> Self {
        Self::DataSource(msg.into())
    }

    /// Create model build error
    pub fn model_build<S: Into<String>>(msg: S) -> Self {
        Self::ModelBuild(msg.into())
    }

    /// Create invalid query error
    pub fn invalid_query<S: Into<String>>(msg: S) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Create not built error
    pub fn not_built<S: Into<String>>(msg: S) -> Self {
        Self::NotBuilt(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

// Host loop policy
impl EduAiError {
    /// Whether a long-running host can report this error and keep serving.
    ///
    /// Corpus and model failures abort startup; caller misuse does not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidQuery(_) => true,
            Self::NotBuilt(_) => true,
            Self::Internal(_) => true,
            Self::DataSource(_) => false,
            Self::ModelBuild(_) => false,
            Self::Config(_) => false,
            Self::Io(_) => false,
            Self::Json(_) => false,
            Self::Other(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let err = EduAiError::data_source("missing column 'tags'");
        assert_eq!(err.to_string(), "Data source error: missing column 'tags'");

        let err = EduAiError::invalid_query("top_n must be positive");
        assert_eq!(err.to_string(), "Invalid query: top_n must be positive");
    }

    #[test]
    fn test_is_recoverable() {
        assert!(EduAiError::invalid_query("x").is_recoverable());
        assert!(EduAiError::not_built("x").is_recoverable());
        assert!(!EduAiError::data_source("x").is_recoverable());
        assert!(!EduAiError::model_build("x").is_recoverable());
        assert!(!EduAiError::config("x").is_recoverable());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: EduAiError = io.into();
        assert!(matches!(err, EduAiError::Io(_)));
    }
}
