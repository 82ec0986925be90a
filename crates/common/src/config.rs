use crate::error::EduAiError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Number of recommendations when the caller has no preference
pub const DEFAULT_TOP_N: usize = 5;

/// EduAI application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Course dataset path (CSV or JSON)
    pub dataset_path: PathBuf,

    /// Number of recommendations when the caller does not ask for a count
    pub default_top_n: usize,

    /// Custom stop-word list (one word per line); built-in English list when unset
    pub stop_words_path: Option<PathBuf>,

    /// Lowercase text before tokenizing
    pub token_lowercase: bool,

    /// Token regex override
    pub token_pattern: Option<String>,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,

    /// Also write logs to `<log_dir>/eduai.log`
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("pakistani_courses_dataset.csv"),
            default_top_n: DEFAULT_TOP_N,
            stop_words_path: None,
            token_lowercase: true,
            token_pattern: None,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, EduAiError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to defaults; set but unparsable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EduAiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            dataset_path: lookup("DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_path),
            default_top_n: parse_value(&lookup, "DEFAULT_TOP_N")?
                .unwrap_or(defaults.default_top_n),
            stop_words_path: lookup("STOP_WORDS_PATH").map(PathBuf::from),
            token_lowercase: parse_bool(&lookup, "TOKEN_LOWERCASE")?
                .unwrap_or(defaults.token_lowercase),
            token_pattern: lookup("TOKEN_PATTERN").filter(|p| !p.is_empty()),
            log_dir: lookup("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_to_file: parse_bool(&lookup, "LOG_TO_FILE")?.unwrap_or(defaults.log_to_file),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), EduAiError> {
        if self.dataset_path.as_os_str().is_empty() {
            return Err(EduAiError::config("Dataset path cannot be empty"));
        }

        if self.default_top_n == 0 {
            return Err(EduAiError::config("Default top-n must be at least 1"));
        }

        if self.log_level.trim().is_empty() {
            return Err(EduAiError::config("Log level cannot be empty"));
        }

        Ok(())
    }
}

fn parse_value<F, T>(lookup: &F, key: &str) -> Result<Option<T>, EduAiError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            EduAiError::config(format!("Invalid value for {}: '{}'", key, raw))
        }),
    }
}

fn parse_bool<F>(lookup: &F, key: &str) -> Result<Option<bool>, EduAiError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(EduAiError::config(format!(
                "Invalid boolean for {}: '{}'",
                key, raw
            ))),
        },
    }
}
