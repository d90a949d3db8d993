//! Page run orchestration.
//!
//! A run works through one page of one source as a fixed sequence of
//! checkpointed steps: announce the fetch, fetch, snapshot the raw
//! payload, flatten, announce the persist, insert, then pace before
//! the next run. There is no atomicity across the steps and no retry;
//! a crash leaves the current step's PENDING trace event as evidence,
//! and the recovery scan surfaces it for an operator.
//!
//! Trace and snapshot writes are observability, not pipeline state.
//! When one of them fails the run logs a warning and keeps going; the
//! next checkpoint or the run's outcome still tells the story.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::Result;
use crate::pacing::Pacer;
use crate::sink::{self, RecordSink};
use crate::snapshot::SnapshotStore;
use crate::sources::{SourceAdapter, SourceId};
use crate::task_key::KeyGenerator;
use crate::trace::{TraceEvent, TraceRecorder, TraceScope};

/// Outcome of one page run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub source: SourceId,
    pub page: u32,
    pub fetched: usize,
    pub inserted: u64,
    pub batch_task_id: String,
    pub persist_task_id: String,
}

pub struct Orchestrator {
    keys: KeyGenerator,
    recorder: Arc<dyn TraceRecorder>,
    snapshots: Arc<dyn SnapshotStore>,
    sink: Arc<dyn RecordSink>,
    pacer: Pacer,
}

impl Orchestrator {
    pub fn new(
        recorder: Arc<dyn TraceRecorder>,
        snapshots: Arc<dyn SnapshotStore>,
        sink: Arc<dyn RecordSink>,
        pacer: Pacer,
    ) -> Self {
        Self {
            keys: KeyGenerator::new(),
            recorder,
            snapshots,
            sink,
            pacer,
        }
    }

    /// Runs one page of `adapter` end to end.
    ///
    /// Any fetch or insert error is terminal: the run stops where it
    /// is, keeps whatever it already wrote, and leaves the step's
    /// PENDING event unanswered.
    pub async fn run(&self, adapter: &dyn SourceAdapter, page: u32) -> Result<RunSummary> {
        let source = adapter.source();
        let page_size = adapter.page_size();

        info!(source = %source, page, "fetching page");

        let batch_task_id = self.keys.generate(TraceScope::BatchFetch.as_str());
        let batch_pending = TraceEvent::pending(
            &batch_task_id,
            TraceScope::BatchFetch,
            source.as_str(),
            page,
            page_size,
        );
        self.record(&batch_pending).await;

        let batch = adapter.fetch(page).await?;

        self.capture(source.as_str(), page, page_size, batch.raw.as_bytes())
            .await;
        self.record(&batch_pending.finished()).await;

        let rows = sink::flatten(&batch.records);

        info!(source = %source, page, records = rows.len(), "persisting records");

        let persist_task_id = self.keys.generate(TraceScope::Persist.as_str());
        let persist_pending = TraceEvent::pending(
            &persist_task_id,
            TraceScope::Persist,
            source.as_str(),
            page,
            page_size,
        );
        self.record(&persist_pending).await;

        let inserted = self.sink.insert_many(&rows).await?;

        self.record(&persist_pending.finished()).await;

        self.pacer.pause().await;

        Ok(RunSummary {
            source,
            page,
            fetched: batch.records.len(),
            inserted,
            batch_task_id,
            persist_task_id,
        })
    }

    /// Runs `pages` consecutive pages starting at `start_page`,
    /// stopping at the first failure.
    pub async fn run_pages(
        &self,
        adapter: &dyn SourceAdapter,
        start_page: u32,
        pages: u32,
    ) -> Result<Vec<RunSummary>> {
        let mut summaries = Vec::with_capacity(pages as usize);

        for page in start_page..start_page.saturating_add(pages) {
            summaries.push(self.run(adapter, page).await?);
        }

        Ok(summaries)
    }

    async fn record(&self, event: &TraceEvent) {
        if let Err(err) = self.recorder.record(event).await {
            warn!(
                error = %err,
                task_id = %event.task_id,
                status = %event.status,
                "failed to record trace event"
            );
        }
    }

    async fn capture(&self, source: &str, page: u32, page_size: u32, raw: &[u8]) {
        if let Err(err) = self.snapshots.capture(source, page, page_size, raw).await {
            warn!(error = %err, source, page, "failed to capture raw snapshot");
        }
    }
}
