use eduai_corpus::Recommendation;
use eduai_index::{IndexStats, SearchResult};
use std::fmt::Write;

/// Numbered listing: `N. Title (Category - Level)` then the description
pub fn format_recommendations(results: &[Recommendation]) -> String {
    let mut out = String::from("\nTop Recommendations:\n\n");
    for (i, course) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({} - {})\n   {}\n",
            i + 1,
            course.title,
            course.category,
            course.level,
            course.description
        );
    }
    out
}

/// Same listing with the similarity score after each heading
pub fn format_search_results(results: &[SearchResult]) -> String {
    let mut out = String::from("\nTop Recommendations:\n\n");
    for (i, result) in results.iter().enumerate() {
        let course = &result.recommendation;
        let _ = writeln!(
            out,
            "{}. {} ({} - {}) [score {:.3}]\n   {}\n",
            i + 1,
            course.title,
            course.category,
            course.level,
            result.score,
            course.description
        );
    }
    out
}

pub fn format_stats(stats: &IndexStats) -> String {
    format!(
        "Courses: {}\nVocabulary: {} terms\nCourses without indexed terms: {}\nBuilt at: {}\n",
        stats.items,
        stats.vocabulary_size,
        stats.empty_items,
        stats.built_at.to_rfc3339()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> Recommendation {
        Recommendation {
            title: "Intro to CSS".to_string(),
            category: "Web".to_string(),
            level: "Beginner".to_string(),
            description: "Learn web styling".to_string(),
        }
    }

    #[test]
    fn test_format_recommendations() {
        let text = format_recommendations(&[course()]);
        assert_eq!(
            text,
            "\nTop Recommendations:\n\n1. Intro to CSS (Web - Beginner)\n   Learn web styling\n\n"
        );
    }

    #[test]
    fn test_format_search_results() {
        let text = format_search_results(&[SearchResult::new(0, 0.5, course())]);
        assert!(text.contains("1. Intro to CSS (Web - Beginner) [score 0.500]"));
    }
}
