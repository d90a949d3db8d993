//! Orphaned tasks query
//!
//! A task whose latest event is still PENDING never got its FINISHED
//! counterpart: the invocation it belonged to crashed or aborted
//! mid-step. This view is the operator's crash evidence; nothing in
//! the server re-drives the work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::AppError;

/// A work unit whose latest trace event is PENDING
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrphanedTaskItem {
    pub task_id: String,
    pub scope: String,
    pub source: String,
    pub batch: i64,
    pub page_size: i64,
    pub begin_time: DateTime<Utc>,
}

pub async fn handle(pool: &PgPool) -> Result<Vec<OrphanedTaskItem>, AppError> {
    let orphans = sqlx::query_as::<_, OrphanedTaskItem>(
        r#"
        SELECT t.task_id, t.scope, t.source, t.batch, t.page_size, t.begin_time
        FROM trace_events t
        JOIN (
            SELECT task_id, MAX(id) AS last_id
            FROM trace_events
            GROUP BY task_id
        ) latest ON latest.last_id = t.id
        WHERE t.status = 'PENDING'
        ORDER BY t.begin_time
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(orphans)
}
