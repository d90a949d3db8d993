//! Trace recording for pipeline checkpoints.
//!
//! Every unit of work appends a PENDING event before it starts and a
//! FINISHED event after it completes. Events are never updated in
//! place. A task key whose latest event is still PENDING marks work
//! that died in flight, which is exactly what the recovery scan looks
//! for.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod postgres;
pub mod recovery;

pub use postgres::PgTraceRecorder;

/// Pipeline step a trace event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceScope {
    /// Fetching one page from an upstream platform.
    BatchFetch,
    /// Persisting the flattened records of one page.
    Persist,
}

impl TraceScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceScope::BatchFetch => "batch-fetch",
            TraceScope::Persist => "persist",
        }
    }
}

impl std::fmt::Display for TraceScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a trace event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceStatus {
    Pending,
    Finished,
}

impl TraceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceStatus::Pending => "PENDING",
            TraceStatus::Finished => "FINISHED",
        }
    }
}

impl std::fmt::Display for TraceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One checkpoint event.
#[derive(Debug, Clone)]
pub struct TraceEvent {
    pub task_id: String,
    pub scope: TraceScope,
    pub source: String,
    pub batch: u32,
    pub page_size: u32,
    pub status: TraceStatus,
    pub begin_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl TraceEvent {
    /// A PENDING event stamped now.
    pub fn pending(
        task_id: impl Into<String>,
        scope: TraceScope,
        source: impl Into<String>,
        batch: u32,
        page_size: u32,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            scope,
            source: source.into(),
            batch,
            page_size,
            status: TraceStatus::Pending,
            begin_time: Utc::now(),
            end_time: None,
        }
    }

    /// The FINISHED counterpart of a PENDING event. Keeps the original
    /// begin time and stamps the end time now.
    pub fn finished(&self) -> Self {
        Self {
            status: TraceStatus::Finished,
            end_time: Some(Utc::now()),
            ..self.clone()
        }
    }
}

/// Appends checkpoint events to the trace log.
#[async_trait]
pub trait TraceRecorder: Send + Sync {
    async fn record(&self, event: &TraceEvent) -> anyhow::Result<()>;
}
