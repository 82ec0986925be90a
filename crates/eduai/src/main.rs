use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use eduai_common::{logger, AppConfig};
use eduai_corpus::{CorpusLoader, SourceFormat};
use eduai_index::CourseRecommender;
use std::path::PathBuf;

mod interactive;
mod output;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "eduai")]
#[command(about = "EduAI - course recommendations by text similarity", long_about = None)]
struct Cli {
    /// Course dataset (CSV or JSON)
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Dataset format; detected from the file extension when omitted
    #[arg(long, global = true, value_enum)]
    format: Option<DatasetFormat>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DatasetFormat {
    Csv,
    Json,
}

impl From<DatasetFormat> for SourceFormat {
    fn from(format: DatasetFormat) -> Self {
        match format {
            DatasetFormat::Csv => SourceFormat::Csv,
            DatasetFormat::Json => SourceFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend courses for a single query
    Recommend {
        /// Course name or topic
        query: String,

        /// Number of results
        #[arg(long, short = 'n')]
        top_n: Option<usize>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Show similarity scores
        #[arg(long)]
        scores: bool,
    },

    /// Show corpus and index statistics
    Stats {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Menu-driven shell (default)
    Interactive,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;
    if let Some(dataset) = cli.dataset {
        config.dataset_path = dataset;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    config.validate()?;
    let format = cli.format.map(SourceFormat::from);

    if config.log_to_file {
        logger::setup_logging(&config.log_dir, &config.log_level)?;
    } else {
        logger::setup_console_logging(&config.log_level)?;
    }

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Recommend {
            query,
            top_n,
            json,
            scores,
        } => {
            let recommender = build_recommender(&config, format)?;
            let top_n = top_n.unwrap_or(config.default_top_n);
            let results = recommender.search(&query, top_n)?;

            if json && scores {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if json {
                let courses: Vec<_> = results.into_iter().map(|r| r.recommendation).collect();
                println!("{}", serde_json::to_string_pretty(&courses)?);
            } else if results.is_empty() {
                println!("No relevant courses found.");
            } else if scores {
                print!("{}", output::format_search_results(&results));
            } else {
                let courses: Vec<_> = results.into_iter().map(|r| r.recommendation).collect();
                print!("{}", output::format_recommendations(&courses));
            }
        }
        Commands::Stats { json } => {
            let recommender = build_recommender(&config, format)?;
            let stats = recommender.stats()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", output::format_stats(&stats));
            }
        }
        Commands::Interactive => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            interactive::run(&config, format, &mut stdin.lock(), &mut stdout.lock())?;
        }
    }

    Ok(())
}

/// Load and index the configured dataset, optionally forcing its format
fn build_recommender(
    config: &AppConfig,
    format: Option<SourceFormat>,
) -> eduai_common::Result<CourseRecommender> {
    let mut recommender = CourseRecommender::from_config(config)?;
    if let Some(format) = format {
        recommender = recommender.with_loader(CorpusLoader::new().with_format(format));
    }
    tracing::info!(
        "Using dataset {} (format: {})",
        recommender.dataset_path().display(),
        format.map_or("auto".to_string(), |f| format!("{:?}", f).to_lowercase())
    );
    recommender.initialize()?;
    Ok(recommender)
}
