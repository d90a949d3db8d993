//! Ingestion configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

pub const DEFAULT_SNAPSHOT_DIR: &str = "/tmp/mdp-snapshots";
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_S3_REGION: &str = "us-east-1";
pub const DEFAULT_S3_PREFIX: &str = "snapshots";
pub const DEFAULT_PACE_DELAY_MS: u64 = 1_000;
pub const DEFAULT_PACE_JITTER_MS: u64 = 0;
pub const DEFAULT_MAX_CONCURRENT_ENRICHMENTS: usize = 8;

/// Zero means no client-side timeout.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 0;

/// Desktop browser identity the upstream platforms serve full payloads
/// to.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/87.0.4280.141 Safari/537.36";

/// Where raw response snapshots are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotBackend {
    Fs,
    S3,
}

impl FromStr for SnapshotBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fs" => Ok(SnapshotBackend::Fs),
            "s3" => Ok(SnapshotBackend::S3),
            other => Err(format!("invalid snapshot backend: {other}")),
        }
    }
}

/// S3 connection settings for the snapshot archive.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub endpoint: Option<String>,
    pub path_style: bool,
    pub prefix: String,
}

/// Runtime configuration for the ingestion pipeline.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub snapshot_backend: SnapshotBackend,
    pub snapshot_dir: String,
    pub s3: Option<S3Config>,
    pub pace_delay_ms: u64,
    pub pace_jitter_ms: u64,
    pub max_concurrent_enrichments: usize,
    pub http_timeout_secs: u64,
    pub user_agent: String,
}

impl IngestConfig {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a positive number")?;

        let snapshot_backend = env::var("MDP_SNAPSHOT_BACKEND")
            .unwrap_or_else(|_| "fs".to_string())
            .parse::<SnapshotBackend>()
            .map_err(|err| anyhow::anyhow!(err))?;

        let snapshot_dir =
            env::var("MDP_SNAPSHOT_DIR").unwrap_or_else(|_| DEFAULT_SNAPSHOT_DIR.to_string());

        let s3 = match snapshot_backend {
            SnapshotBackend::Fs => None,
            SnapshotBackend::S3 => Some(S3Config {
                bucket: env::var("MDP_S3_BUCKET")
                    .context("MDP_S3_BUCKET must be set for the s3 snapshot backend")?,
                region: env::var("MDP_S3_REGION")
                    .unwrap_or_else(|_| DEFAULT_S3_REGION.to_string()),
                access_key: env::var("MDP_S3_ACCESS_KEY")
                    .context("MDP_S3_ACCESS_KEY must be set for the s3 snapshot backend")?,
                secret_key: env::var("MDP_S3_SECRET_KEY")
                    .context("MDP_S3_SECRET_KEY must be set for the s3 snapshot backend")?,
                endpoint: env::var("MDP_S3_ENDPOINT").ok(),
                path_style: env::var("MDP_S3_PATH_STYLE")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .context("MDP_S3_PATH_STYLE must be true or false")?,
                prefix: env::var("MDP_S3_PREFIX")
                    .unwrap_or_else(|_| DEFAULT_S3_PREFIX.to_string()),
            }),
        };

        let pace_delay_ms = env::var("MDP_PACE_DELAY_MS")
            .unwrap_or_else(|_| DEFAULT_PACE_DELAY_MS.to_string())
            .parse()
            .context("MDP_PACE_DELAY_MS must be a number of milliseconds")?;

        let pace_jitter_ms = env::var("MDP_PACE_JITTER_MS")
            .unwrap_or_else(|_| DEFAULT_PACE_JITTER_MS.to_string())
            .parse()
            .context("MDP_PACE_JITTER_MS must be a number of milliseconds")?;

        let max_concurrent_enrichments = env::var("MDP_MAX_CONCURRENT_ENRICHMENTS")
            .unwrap_or_else(|_| DEFAULT_MAX_CONCURRENT_ENRICHMENTS.to_string())
            .parse()
            .context("MDP_MAX_CONCURRENT_ENRICHMENTS must be a positive number")?;

        let http_timeout_secs = env::var("MDP_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_HTTP_TIMEOUT_SECS.to_string())
            .parse()
            .context("MDP_HTTP_TIMEOUT_SECS must be a number of seconds")?;

        let user_agent =
            env::var("MDP_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        let config = Self {
            database_url,
            database_max_connections,
            snapshot_backend,
            snapshot_dir,
            s3,
            pace_delay_ms,
            pace_jitter_ms,
            max_concurrent_enrichments,
            http_timeout_secs,
            user_agent,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.database_max_connections == 0 {
            bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        if self.max_concurrent_enrichments == 0 {
            bail!("MDP_MAX_CONCURRENT_ENRICHMENTS must be at least 1");
        }

        if self.snapshot_backend == SnapshotBackend::Fs && self.snapshot_dir.is_empty() {
            bail!("MDP_SNAPSHOT_DIR must not be empty");
        }

        Ok(())
    }
}
