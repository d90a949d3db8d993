//! Orchestrator behavior tests against in-memory backends.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mdp_common::types::MovieRecord;
use mdp_ingest::error::{IngestError, Result};
use mdp_ingest::orchestrator::Orchestrator;
use mdp_ingest::pacing::Pacer;
use mdp_ingest::sink::{MovieRow, RecordSink};
use mdp_ingest::snapshot::SnapshotStore;
use mdp_ingest::sources::{FetchBatch, SourceAdapter, SourceId};
use mdp_ingest::trace::{TraceEvent, TraceRecorder, TraceScope, TraceStatus};

#[derive(Default)]
struct MemoryRecorder {
    events: Mutex<Vec<TraceEvent>>,
}

#[async_trait]
impl TraceRecorder for MemoryRecorder {
    async fn record(&self, event: &TraceEvent) -> anyhow::Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

struct FailingRecorder;

#[async_trait]
impl TraceRecorder for FailingRecorder {
    async fn record(&self, _event: &TraceEvent) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("trace store down"))
    }
}

#[derive(Default)]
struct MemorySnapshots {
    captures: Mutex<Vec<(String, u32, u32, String)>>,
}

impl MemorySnapshots {
    fn latest_for(&self, source: &str, page: u32) -> Option<String> {
        self.captures
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(s, p, _, _)| s == source && *p == page)
            .map(|(_, _, _, raw)| raw.clone())
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshots {
    async fn capture(&self, source: &str, page: u32, page_size: u32, raw: &[u8]) -> anyhow::Result<()> {
        self.captures.lock().unwrap().push((
            source.to_string(),
            page,
            page_size,
            String::from_utf8_lossy(raw).to_string(),
        ));
        Ok(())
    }
}

struct FailingSnapshots;

#[async_trait]
impl SnapshotStore for FailingSnapshots {
    async fn capture(&self, _: &str, _: u32, _: u32, _: &[u8]) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("snapshot backend down"))
    }
}

#[derive(Default)]
struct MemorySink {
    batches: Mutex<Vec<Vec<MovieRow>>>,
}

impl MemorySink {
    fn calls(&self) -> usize {
        self.batches.lock().unwrap().len()
    }

    fn total_rows(&self) -> usize {
        self.batches.lock().unwrap().iter().map(Vec::len).sum()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn insert_many(&self, rows: &[MovieRow]) -> Result<u64> {
        self.batches.lock().unwrap().push(rows.to_vec());
        Ok(rows.len() as u64)
    }
}

struct FailingSink;

#[async_trait]
impl RecordSink for FailingSink {
    async fn insert_many(&self, _rows: &[MovieRow]) -> Result<u64> {
        Err(IngestError::Persistence(sqlx::Error::PoolClosed))
    }
}

/// Serves a fixed set of records for every page and remembers which
/// pages were requested.
struct StubAdapter {
    records_per_page: usize,
    fetched_pages: Mutex<Vec<u32>>,
}

impl StubAdapter {
    fn with_records(records_per_page: usize) -> Self {
        Self {
            records_per_page,
            fetched_pages: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SourceAdapter for StubAdapter {
    fn source(&self) -> SourceId {
        SourceId::Bilibili
    }

    fn page_size(&self) -> u32 {
        60
    }

    async fn fetch(&self, page: u32) -> Result<FetchBatch> {
        self.fetched_pages.lock().unwrap().push(page);

        let records = (0..self.records_per_page)
            .map(|i| {
                let mut record = MovieRecord::new(self.source().as_str());
                record.title = format!("Movie {page}-{i}");
                record.put_metadata("id", format!("{page}{i:04}"));
                record
            })
            .collect();

        Ok(FetchBatch {
            records,
            raw: format!(r#"{{"page":{page}}}"#),
        })
    }
}

struct FailingAdapter;

#[async_trait]
impl SourceAdapter for FailingAdapter {
    fn source(&self) -> SourceId {
        SourceId::Tencent
    }

    fn page_size(&self) -> u32 {
        30
    }

    async fn fetch(&self, _page: u32) -> Result<FetchBatch> {
        Err(IngestError::Parse("tencent list has no cards".to_string()))
    }
}

struct Harness {
    recorder: Arc<MemoryRecorder>,
    snapshots: Arc<MemorySnapshots>,
    sink: Arc<MemorySink>,
    orchestrator: Orchestrator,
}

fn harness() -> Harness {
    let recorder = Arc::new(MemoryRecorder::default());
    let snapshots = Arc::new(MemorySnapshots::default());
    let sink = Arc::new(MemorySink::default());

    let orchestrator = Orchestrator::new(
        recorder.clone(),
        snapshots.clone(),
        sink.clone(),
        Pacer::new(0, 0),
    );

    Harness {
        recorder,
        snapshots,
        sink,
        orchestrator,
    }
}

fn events_of(recorder: &MemoryRecorder) -> Vec<TraceEvent> {
    recorder.events.lock().unwrap().clone()
}

#[tokio::test]
async fn a_page_run_persists_records_and_balanced_traces() {
    let h = harness();
    let adapter = StubAdapter::with_records(3);

    let summary = h.orchestrator.run(&adapter, 1).await.unwrap();
    assert_eq!(summary.fetched, 3);
    assert_eq!(summary.inserted, 3);

    assert_eq!(h.sink.calls(), 1);
    assert_eq!(h.sink.total_rows(), 3);

    let events = events_of(&h.recorder);
    assert_eq!(events.len(), 4);

    assert_eq!(events[0].scope, TraceScope::BatchFetch);
    assert_eq!(events[0].status, TraceStatus::Pending);
    assert_eq!(events[1].scope, TraceScope::BatchFetch);
    assert_eq!(events[1].status, TraceStatus::Finished);
    assert_eq!(events[2].scope, TraceScope::Persist);
    assert_eq!(events[2].status, TraceStatus::Pending);
    assert_eq!(events[3].scope, TraceScope::Persist);
    assert_eq!(events[3].status, TraceStatus::Finished);

    for event in &events {
        assert_eq!(event.source, "bilibili");
        assert_eq!(event.batch, 1);
        assert_eq!(event.page_size, 60);
    }

    // Each FINISHED event answers its PENDING counterpart
    assert_eq!(events[1].task_id, events[0].task_id);
    assert_eq!(events[3].task_id, events[2].task_id);
    assert_ne!(events[0].task_id, events[2].task_id);

    for finished in [&events[1], &events[3]] {
        assert!(finished.end_time.unwrap() >= finished.begin_time);
    }

    assert_eq!(
        h.snapshots.latest_for("bilibili", 1),
        Some(r#"{"page":1}"#.to_string())
    );
}

#[tokio::test]
async fn re_running_a_page_appends_a_second_copy() {
    let h = harness();
    let adapter = StubAdapter::with_records(3);

    h.orchestrator.run(&adapter, 1).await.unwrap();
    h.orchestrator.run(&adapter, 1).await.unwrap();

    // Both copies of every record are kept
    assert_eq!(h.sink.calls(), 2);
    assert_eq!(h.sink.total_rows(), 6);
    assert_eq!(events_of(&h.recorder).len(), 8);

    let batches = h.sink.batches.lock().unwrap();
    assert_eq!(batches[0][0].dedupe_key, batches[1][0].dedupe_key);
}

#[tokio::test]
async fn zero_records_still_drive_the_sink_and_traces() {
    let h = harness();
    let adapter = StubAdapter::with_records(0);

    let summary = h.orchestrator.run(&adapter, 2).await.unwrap();
    assert_eq!(summary.fetched, 0);
    assert_eq!(summary.inserted, 0);

    // The sink is still called, with an empty batch
    assert_eq!(h.sink.calls(), 1);
    assert_eq!(h.sink.total_rows(), 0);

    let events = events_of(&h.recorder);
    assert_eq!(events.len(), 4);
    assert_eq!(events[3].scope, TraceScope::Persist);
    assert_eq!(events[3].status, TraceStatus::Finished);
}

#[tokio::test]
async fn a_fetch_failure_leaves_only_the_pending_event() {
    let h = harness();

    let err = h.orchestrator.run(&FailingAdapter, 5).await.unwrap_err();
    assert!(matches!(err, IngestError::Parse(_)));

    let events = events_of(&h.recorder);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].scope, TraceScope::BatchFetch);
    assert_eq!(events[0].status, TraceStatus::Pending);
    assert_eq!(events[0].source, "tencent");

    // No snapshot, and the sink is never reached
    assert!(h.snapshots.captures.lock().unwrap().is_empty());
    assert_eq!(h.sink.calls(), 0);
}

#[tokio::test]
async fn an_insert_failure_leaves_the_persist_pending() {
    let recorder = Arc::new(MemoryRecorder::default());
    let snapshots = Arc::new(MemorySnapshots::default());

    let orchestrator = Orchestrator::new(
        recorder.clone(),
        snapshots.clone(),
        Arc::new(FailingSink),
        Pacer::new(0, 0),
    );

    let adapter = StubAdapter::with_records(2);
    let err = orchestrator.run(&adapter, 1).await.unwrap_err();
    assert!(matches!(err, IngestError::Persistence(_)));

    let events = events_of(&recorder);
    assert_eq!(events.len(), 3);
    assert_eq!(events[1].status, TraceStatus::Finished);
    assert_eq!(events[2].scope, TraceScope::Persist);
    assert_eq!(events[2].status, TraceStatus::Pending);

    // The fetch itself succeeded, so its snapshot exists
    assert!(snapshots.latest_for("bilibili", 1).is_some());
}

#[tokio::test]
async fn trace_recorder_failures_do_not_abort_the_run() {
    let sink = Arc::new(MemorySink::default());

    let orchestrator = Orchestrator::new(
        Arc::new(FailingRecorder),
        Arc::new(MemorySnapshots::default()),
        sink.clone(),
        Pacer::new(0, 0),
    );

    let adapter = StubAdapter::with_records(2);
    let summary = orchestrator.run(&adapter, 1).await.unwrap();

    assert_eq!(summary.inserted, 2);
    assert_eq!(sink.total_rows(), 2);
}

#[tokio::test]
async fn snapshot_failures_do_not_abort_the_run() {
    let recorder = Arc::new(MemoryRecorder::default());
    let sink = Arc::new(MemorySink::default());

    let orchestrator = Orchestrator::new(
        recorder.clone(),
        Arc::new(FailingSnapshots),
        sink.clone(),
        Pacer::new(0, 0),
    );

    let adapter = StubAdapter::with_records(2);
    orchestrator.run(&adapter, 1).await.unwrap();

    assert_eq!(sink.total_rows(), 2);
    assert_eq!(events_of(&recorder).len(), 4);
}

#[tokio::test(start_paused = true)]
async fn pacing_runs_even_for_empty_pages() {
    let recorder = Arc::new(MemoryRecorder::default());

    let orchestrator = Orchestrator::new(
        recorder,
        Arc::new(MemorySnapshots::default()),
        Arc::new(MemorySink::default()),
        Pacer::new(1_000, 0),
    );

    let adapter = StubAdapter::with_records(0);

    let started = tokio::time::Instant::now();
    orchestrator.run(&adapter, 1).await.unwrap();

    assert_eq!(started.elapsed(), Duration::from_millis(1_000));
}

#[tokio::test]
async fn run_pages_walks_consecutive_pages() {
    let h = harness();
    let adapter = StubAdapter::with_records(1);

    let summaries = h.orchestrator.run_pages(&adapter, 3, 2).await.unwrap();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].page, 3);
    assert_eq!(summaries[1].page, 4);
    assert_eq!(*adapter.fetched_pages.lock().unwrap(), vec![3, 4]);

    // One page, one snapshot
    assert!(h.snapshots.latest_for("bilibili", 3).is_some());
    assert!(h.snapshots.latest_for("bilibili", 4).is_some());
}
