//! Postgres-backed trace recorder.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use super::{TraceEvent, TraceRecorder};

#[derive(Clone)]
pub struct PgTraceRecorder {
    pool: PgPool,
}

impl PgTraceRecorder {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TraceRecorder for PgTraceRecorder {
    async fn record(&self, event: &TraceEvent) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO trace_events
                (task_id, scope, source, batch, page_size, status, begin_time, end_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&event.task_id)
        .bind(event.scope.as_str())
        .bind(&event.source)
        .bind(i64::from(event.batch))
        .bind(i64::from(event.page_size))
        .bind(event.status.as_str())
        .bind(event.begin_time)
        .bind(event.end_time)
        .execute(&self.pool)
        .await
        .context("Failed to append trace event")?;

        Ok(())
    }
}
