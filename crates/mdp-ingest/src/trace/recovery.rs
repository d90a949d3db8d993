//! Crash evidence scanning.
//!
//! The pipeline never cleans up after itself, so a crash between a
//! PENDING event and its FINISHED counterpart leaves the PENDING row
//! as the task's last word. These scans surface such tasks for an
//! operator; nothing here re-runs work on its own.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// A task whose latest trace event is still PENDING.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrphanedTask {
    pub task_id: String,
    pub scope: String,
    pub source: String,
    pub batch: i64,
    pub page_size: i64,
    pub begin_time: DateTime<Utc>,
}

/// Lists all orphaned tasks, oldest first.
pub async fn find_orphans(pool: &PgPool) -> Result<Vec<OrphanedTask>> {
    let orphans = sqlx::query_as::<_, OrphanedTask>(
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
    .await
    .context("Failed to scan for orphaned tasks")?;

    Ok(orphans)
}

/// Distinct `(source, batch)` pairs touched by orphaned tasks. These
/// are the pages an operator re-runs to redrive interrupted work.
pub async fn orphaned_pages(pool: &PgPool, source: Option<&str>) -> Result<Vec<(String, i64)>> {
    let pages = match source {
        Some(source) => {
            sqlx::query_as::<_, (String, i64)>(
                r#"
                SELECT DISTINCT t.source, t.batch
                FROM trace_events t
                JOIN (
                    SELECT task_id, MAX(id) AS last_id
                    FROM trace_events
                    GROUP BY task_id
                ) latest ON latest.last_id = t.id
                WHERE t.status = 'PENDING' AND t.source = $1
                ORDER BY t.source, t.batch
                "#,
            )
            .bind(source)
            .fetch_all(pool)
            .await
        },
        None => {
            sqlx::query_as::<_, (String, i64)>(
                r#"
                SELECT DISTINCT t.source, t.batch
                FROM trace_events t
                JOIN (
                    SELECT task_id, MAX(id) AS last_id
                    FROM trace_events
                    GROUP BY task_id
                ) latest ON latest.last_id = t.id
                WHERE t.status = 'PENDING'
                ORDER BY t.source, t.batch
                "#,
            )
            .fetch_all(pool)
            .await
        },
    }
    .context("Failed to list orphaned pages")?;

    Ok(pages)
}
