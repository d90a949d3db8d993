//! MDP Ingest - Movie data ingestion tool

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use mdp_common::logging::{init_logging, LogConfig, LogLevel};
use mdp_ingest::config::{IngestConfig, SnapshotBackend};
use mdp_ingest::orchestrator::Orchestrator;
use mdp_ingest::pacing::Pacer;
use mdp_ingest::sink::PgMovieSink;
use mdp_ingest::snapshot::{FsSnapshotStore, S3SnapshotStore, SnapshotStore};
use mdp_ingest::sources::{self, SourceId};
use mdp_ingest::trace::{recovery, PgTraceRecorder};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "mdp-ingest")]
#[command(author, version, about = "Movie data ingestion tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// Fetch one or more pages from a source
    Fetch {
        /// Source platform (bilibili, tencent or iqiyi)
        #[arg(short, long)]
        source: String,

        /// First page to fetch (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Number of consecutive pages to run
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },

    /// List tasks whose latest trace event is still PENDING
    Orphans,

    /// Re-run the pages touched by orphaned tasks
    Redrive {
        /// Only redrive pages of this source
        #[arg(short, long)]
        source: Option<String>,
    },

    /// Apply database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence over the flag defaults.
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("mdp-ingest".to_string())
        .build()
        .merge_env()?;

    init_logging(&log_config)?;

    let config = IngestConfig::from_env()?;
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Command::Fetch {
            source,
            page,
            pages,
        } => {
            let source: SourceId = source.parse().map_err(|err: String| anyhow::anyhow!(err))?;

            let orchestrator = build_orchestrator(&config, pool.clone())?;
            let client = sources::build_http_client(&config)?;
            let adapter = sources::build_adapter(source, client, &config);

            let summaries = orchestrator.run_pages(adapter.as_ref(), page, pages).await?;
            for summary in &summaries {
                info!(
                    source = %summary.source,
                    page = summary.page,
                    fetched = summary.fetched,
                    inserted = summary.inserted,
                    "page complete"
                );
            }
        },

        Command::Orphans => {
            let orphans = recovery::find_orphans(&pool).await?;
            if orphans.is_empty() {
                println!("no orphaned tasks");
            } else {
                println!("{}", serde_json::to_string_pretty(&orphans)?);
            }
        },

        Command::Redrive { source } => {
            let filter: Option<SourceId> = match source {
                Some(raw) => Some(raw.parse().map_err(|err: String| anyhow::anyhow!(err))?),
                None => None,
            };

            let pages = recovery::orphaned_pages(&pool, filter.map(|s| s.as_str())).await?;
            if pages.is_empty() {
                info!("no orphaned pages to redrive");
                return Ok(());
            }

            let orchestrator = build_orchestrator(&config, pool.clone())?;
            let client = sources::build_http_client(&config)?;

            for (source_name, batch) in pages {
                let source: SourceId = match source_name.parse() {
                    Ok(source) => source,
                    Err(_) => {
                        warn!(source = %source_name, "skipping orphaned page of unknown source");
                        continue;
                    },
                };

                let Ok(page) = u32::try_from(batch) else {
                    warn!(source = %source_name, batch, "skipping orphaned page outside the page range");
                    continue;
                };

                let adapter = sources::build_adapter(source, client.clone(), &config);
                let summary = orchestrator.run(adapter.as_ref(), page).await?;
                info!(
                    source = %summary.source,
                    page = summary.page,
                    inserted = summary.inserted,
                    "page redriven"
                );
            }
        },

        Command::Migrate => {
            sqlx::migrate!("../../migrations").run(&pool).await?;
            info!("migrations applied");
        },
    }

    Ok(())
}

fn build_orchestrator(config: &IngestConfig, pool: sqlx::PgPool) -> Result<Orchestrator> {
    let snapshots: Arc<dyn SnapshotStore> = match config.snapshot_backend {
        SnapshotBackend::Fs => Arc::new(FsSnapshotStore::new(&config.snapshot_dir)),
        SnapshotBackend::S3 => {
            let s3 = config
                .s3
                .as_ref()
                .context("s3 snapshot backend selected but not configured")?;
            Arc::new(S3SnapshotStore::new(s3))
        },
    };

    Ok(Orchestrator::new(
        Arc::new(PgTraceRecorder::new(pool.clone())),
        snapshots,
        Arc::new(PgMovieSink::new(pool)),
        Pacer::new(config.pace_delay_ms, config.pace_jitter_ms),
    ))
}
