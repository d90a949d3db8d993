//! Trace routes
//!
//! Public read-only routes over the ingestion trace log.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use sqlx::PgPool;

use super::queries::{list, orphaned, OrphanedTaskItem, TraceEventItem, TraceFilter};
use crate::error::AppError;
use crate::features::shared::Paginated;

/// Create trace routes
pub fn traces_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_traces))
        .route("/orphaned", get(list_orphaned))
}

/// List trace events, newest first
///
/// GET /traces?task_id=&scope=&source=&page=1&page_size=20
async fn list_traces(
    State(db): State<PgPool>,
    Query(filter): Query<TraceFilter>,
) -> Result<Json<Paginated<TraceEventItem>>, AppError> {
    let page = list::handle(&db, &filter).await?;
    Ok(Json(page))
}

/// List work units whose latest event is PENDING
///
/// GET /traces/orphaned
async fn list_orphaned(
    State(db): State<PgPool>,
) -> Result<Json<Vec<OrphanedTaskItem>>, AppError> {
    let orphans = orphaned::handle(&db).await?;
    Ok(Json(orphans))
}
