use crate::error::EduAiError;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Log file name inside the log directory
pub const LOG_FILE_NAME: &str = "eduai.log";

/// Initialize logging system
///
/// Sets up logging to both stderr and a log file. Stdout is left to the
/// interactive shell.
///
/// # Arguments
/// * `log_dir` - Directory where log files will be stored
/// * `log_level` - Log level (trace, debug, info, warn, error)
pub fn setup_logging(log_dir: &Path, log_level: &str) -> Result<(), EduAiError> {
    // Create log directory
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir).map_err(|e| {
            EduAiError::config(format!(
                "Failed to create log directory {}: {}",
                log_dir.display(),
                e
            ))
        })?;
    }

    let log_file_path = log_dir.join(LOG_FILE_NAME);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .map_err(|e| {
            EduAiError::config(format!(
                "Failed to open log file {}: {}",
                log_file_path.display(),
                e
            ))
        })?;

    // RUST_LOG takes precedence
    let env_filter = build_filter(log_level);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(env_filter.clone());

    let file_layer = fmt::layer()
        .with_writer(log_file)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_span_events(FmtSpan::FULL)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| EduAiError::config(format!("Failed to install subscriber: {}", e)))?;

    tracing::info!(
        "Logging initialized: level={}, log_file={}",
        log_level,
        log_file_path.display()
    );

    Ok(())
}

/// Simple logging setup (stderr only)
pub fn setup_console_logging(log_level: &str) -> Result<(), EduAiError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(build_filter(log_level))
        .try_init()
        .map_err(|e| EduAiError::config(format!("Failed to install subscriber: {}", e)))?;

    tracing::debug!("Console logging initialized: level={}", log_level);

    Ok(())
}

fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(parse_log_level(log_level).to_string().to_lowercase()))
}

/// Parse string to tracing Level
pub fn parse_log_level(level: &str) -> Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to INFO", level);
            Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("trace"), Level::TRACE);
        assert_eq!(parse_log_level("debug"), Level::DEBUG);
        assert_eq!(parse_log_level("info"), Level::INFO);
        assert_eq!(parse_log_level("warn"), Level::WARN);
        assert_eq!(parse_log_level("error"), Level::ERROR);
        assert_eq!(parse_log_level("invalid"), Level::INFO);
    }

    #[test]
    fn test_parse_log_level_case_insensitive() {
        assert_eq!(parse_log_level("INFO"), Level::INFO);
        assert_eq!(parse_log_level(" InFo "), Level::INFO);
        assert_eq!(parse_log_level("WARNING"), Level::WARN);
    }

    #[test]
    fn test_setup_logging_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("log");

        // A global subscriber may already be installed by another test;
        // the directory and file are created before that can fail.
        let _ = setup_logging(&log_dir, "debug");

        assert!(log_dir.join(LOG_FILE_NAME).exists());
    }
}
