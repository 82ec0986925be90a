pub mod config;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use config::{AppConfig, DEFAULT_TOP_N};
pub use error::EduAiError;
pub type Result<T> = std::result::Result<T, EduAiError>;
