//! MDP Ingest Library
//!
//! Tools for ingesting movie catalog data from streaming platforms
//! into the movie data platform.
//!
//! # Supported Data Sources
//!
//! - **Bilibili**: bangumi movie index plus per-movie episode pages
//! - **Tencent Video**: channel listing plus per-movie cover pages
//! - **iQiYi**: self-contained video library listing
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use mdp_ingest::config::IngestConfig;
//! use mdp_ingest::orchestrator::Orchestrator;
//! use mdp_ingest::pacing::Pacer;
//! use mdp_ingest::sink::PgMovieSink;
//! use mdp_ingest::snapshot::FsSnapshotStore;
//! use mdp_ingest::sources::{self, SourceId};
//! use mdp_ingest::trace::PgTraceRecorder;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = IngestConfig::from_env()?;
//!     let pool = sqlx::PgPool::connect(&config.database_url).await?;
//!
//!     let orchestrator = Orchestrator::new(
//!         Arc::new(PgTraceRecorder::new(pool.clone())),
//!         Arc::new(FsSnapshotStore::new(&config.snapshot_dir)),
//!         Arc::new(PgMovieSink::new(pool)),
//!         Pacer::new(config.pace_delay_ms, config.pace_jitter_ms),
//!     );
//!
//!     let client = sources::build_http_client(&config)?;
//!     let adapter = sources::build_adapter(SourceId::Bilibili, client, &config);
//!     orchestrator.run(adapter.as_ref(), 1).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod pacing;
pub mod sink;
pub mod snapshot;
pub mod sources;
pub mod task_key;
pub mod trace;

pub use error::{IngestError, Result};
