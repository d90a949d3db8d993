//! List trace events query
//!
//! Serves the raw event log, newest first. Events are immutable; a
//! task's history is every event sharing its task_id, so filtering by
//! task_id reconstructs one work unit's PENDING/FINISHED story.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::AppError;
use crate::features::shared::{Paginated, PaginationParams};

/// Filters for the trace event listing
///
/// Pagination fields are inlined rather than flattened: query-string
/// deserialization cannot see through `#[serde(flatten)]` for numeric
/// fields.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TraceFilter {
    /// Only events of this task
    pub task_id: Option<String>,
    /// Only events of this scope ("batch-fetch" or "persist")
    pub scope: Option<String>,
    /// Only events of this source platform
    pub source: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl TraceFilter {
    fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.page_size)
    }
}

/// One recorded trace event
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TraceEventItem {
    pub id: i64,
    pub task_id: String,
    pub scope: String,
    pub source: String,
    pub batch: i64,
    pub page_size: i64,
    pub status: String,
    pub begin_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub recorded_at: DateTime<Utc>,
}

fn push_filters<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &'a TraceFilter) {
    if let Some(task_id) = &filter.task_id {
        builder.push(" AND task_id = ").push_bind(task_id);
    }
    if let Some(scope) = &filter.scope {
        builder.push(" AND scope = ").push_bind(scope);
    }
    if let Some(source) = &filter.source {
        builder.push(" AND source = ").push_bind(source);
    }
}

pub async fn handle(
    pool: &PgPool,
    filter: &TraceFilter,
) -> Result<Paginated<TraceEventItem>, AppError> {
    let mut count_query =
        QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM trace_events WHERE 1=1");
    push_filters(&mut count_query, filter);

    let total: i64 = count_query.build_query_scalar().fetch_one(pool).await?;

    let mut list_query = QueryBuilder::<Postgres>::new(
        r#"
        SELECT id, task_id, scope, source, batch, page_size,
               status, begin_time, end_time, recorded_at
        FROM trace_events
        WHERE 1=1
        "#,
    );
    push_filters(&mut list_query, filter);
    let pagination = filter.pagination();
    list_query
        .push(" ORDER BY id DESC LIMIT ")
        .push_bind(pagination.page_size())
        .push(" OFFSET ")
        .push_bind(pagination.offset());

    let items = list_query
        .build_query_as::<TraceEventItem>()
        .fetch_all(pool)
        .await?;

    Ok(Paginated::from_items(items, &pagination, total))
}
