//! Error types for the ingestion pipeline.

use thiserror::Error;

/// Errors surfaced by the ingestion pipeline.
///
/// Every variant is terminal for the page run that produced it. The
/// orchestrator never retries; an operator inspects the trace log and
/// re-runs the page.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Network failure or a non-success HTTP status from an upstream
    /// platform.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream payload did not have the expected structure.
    #[error("parse error: {0}")]
    Parse(String),

    /// Writing records to the database failed.
    #[error("persistence error: {0}")]
    Persistence(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
