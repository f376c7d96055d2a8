use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use albumscrape::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "albumscrape",
    version,
    about = "Album review scraper: collect links, download pages, extract text records",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Configuration file (TOML); environment variables are used when absent
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect review links from the paginated listing
    Links {
        /// Maximum number of links to collect
        #[arg(short, long)]
        max_links: Option<usize>,

        /// URLs file to write
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Download every review page listed in the URLs file
    Fetch {
        /// URLs file to read
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory for downloaded pages
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Extract text records from downloaded pages
    Clean {
        /// Directory of downloaded pages
        #[arg(short, long)]
        input_dir: Option<PathBuf>,

        /// Directory for extracted records
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    // Initialize tracing/logging
    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;

    tracing::info!(config = ?cli.config, "albumscrape starting");

    match cli.command {
        Commands::Links { max_links, output } => {
            tracing::info!(max_links = ?max_links, output = ?output, "Starting links command");
            commands::links(config, max_links, output).await?;
        }

        Commands::Fetch { input, output_dir } => {
            tracing::info!(input = ?input, output_dir = ?output_dir, "Starting fetch command");
            commands::fetch(config, input, output_dir).await?;
        }

        Commands::Clean {
            input_dir,
            output_dir,
        } => {
            tracing::info!(
                input_dir = ?input_dir,
                output_dir = ?output_dir,
                "Starting clean command"
            );
            commands::clean(config, input_dir, output_dir)?;
        }
    }

    tracing::info!("albumscrape completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => tracing_subscriber::EnvFilter::new("albumscrape=debug,info"),
        Err(_) => tracing_subscriber::EnvFilter::new(format!("albumscrape={level},warn")),
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
