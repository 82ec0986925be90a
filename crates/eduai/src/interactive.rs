use anyhow::Result;
use eduai_common::AppConfig;
use eduai_corpus::SourceFormat;
use eduai_index::CourseRecommender;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::output::format_recommendations;

/// Menu-driven shell: pick a dataset, then query until the user exits
pub fn run<R: BufRead, W: Write>(
    config: &AppConfig,
    format: Option<SourceFormat>,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "\n=== Course Recommendation System ===")?;

    let mut config = config.clone();
    let answer = prompt(
        input,
        output,
        &format!(
            "Enter dataset path (default: {}): ",
            config.dataset_path.display()
        ),
    )?;
    if let Some(path) = answer.filter(|p| !p.trim().is_empty()) {
        config.dataset_path = PathBuf::from(path.trim());
    }

    let recommender = match crate::build_recommender(&config, format) {
        Ok(recommender) => recommender,
        Err(e) => {
            warn!("Startup failed: {}", e);
            writeln!(output, "Error loading dataset or building model.")?;
            return Ok(());
        }
    };

    loop {
        writeln!(output, "\n=== Menu ===")?;
        writeln!(output, "1. Get course recommendations")?;
        writeln!(output, "2. Exit")?;

        let Some(choice) = prompt(input, output, "Enter your choice: ")? else {
            break;
        };

        match choice.trim() {
            "1" => {
                if !query_once(&recommender, config.default_top_n, input, output)? {
                    break;
                }
            }
            "2" => break,
            _ => writeln!(output, "Invalid choice. Try again.")?,
        }
    }

    Ok(())
}

/// One query round; `false` when input ended
fn query_once<R: BufRead, W: Write>(
    recommender: &CourseRecommender,
    default_top_n: usize,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    let Some(query) = prompt(
        input,
        output,
        "Search by course name or topic (e.g. 'freelancing', 'mdcat', 'css'): ",
    )?
    else {
        return Ok(false);
    };

    let Some(count) = prompt(
        input,
        output,
        &format!("How many results? (default {}): ", default_top_n),
    )?
    else {
        return Ok(false);
    };

    let top_n = match parse_count(&count, default_top_n) {
        Some(n) => n,
        None => {
            writeln!(output, "Invalid number of results.")?;
            return Ok(true);
        }
    };

    debug!("Interactive query '{}' (top_n={})", query, top_n);
    match recommender.recommend(&query, top_n) {
        Ok(results) if !results.is_empty() => write!(output, "{}", format_recommendations(&results))?,
        Ok(_) => writeln!(output, "No relevant courses found.")?,
        Err(e) if e.is_recoverable() => writeln!(output, "Error: {}", e)?,
        Err(e) => return Err(e.into()),
    }

    Ok(true)
}

/// Empty input means the default; zero and non-numbers are rejected
fn parse_count(raw: &str, default_top_n: usize) -> Option<usize> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(default_top_n);
    }
    raw.parse::<usize>().ok().filter(|&n| n > 0)
}

/// Print a prompt and read one line; `None` at end of input
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> std::io::Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}
