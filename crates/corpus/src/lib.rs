//! EduAI course corpus
//!
//! Loads course records from CSV or JSON, drops incomplete rows and derives
//! the combined text each course is indexed by.

pub mod loader;
pub mod types;

// Re-export main types
pub use loader::{CorpusLoader, SourceFormat, REQUIRED_COLUMNS};
pub use types::{Corpus, CourseRecord, Item, Recommendation};
