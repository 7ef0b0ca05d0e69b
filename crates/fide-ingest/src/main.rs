//! FIDE Ingest - loads the federation player list into the store

use anyhow::{Context, Result};
use clap::Parser;
use fide_common::logging::{init_logging, LogConfig, LogLevel};
use fide_ingest::config::{IngestConfig, DEFAULT_DATABASE_URL, DEFAULT_FEED_PATH};
use fide_ingest::{storage, FeedPipeline};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "fide-ingest")]
#[command(author, version, about = "Load the FIDE XML player list into the player store")]
struct Cli {
    /// Feed file (plain XML, .zip or .gz)
    #[arg(short, long, env = "FIDE_FEED_PATH", default_value = DEFAULT_FEED_PATH)]
    feed: PathBuf,

    /// SQLite connection string of the player store
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence over the flag
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("fide-ingest")
        .filter_directives("sqlx=warn")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    let config = IngestConfig::new(cli.feed, cli.database_url);
    config.validate()?;

    info!(feed = %config.feed_path.display(), "Starting ingestion");

    let pool = storage::connect_lazy(&config.database_url)
        .with_context(|| format!("Invalid database URL '{}'", config.database_url))?;

    let result = FeedPipeline::from_config(pool.clone(), &config).run().await;
    pool.close().await;

    let summary = result?;
    info!(
        decoded = summary.decoded,
        skipped = summary.skipped.len(),
        failed = summary.failed.len(),
        persisted = summary.persisted,
        "Ingestion complete"
    );

    Ok(())
}
