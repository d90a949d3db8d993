//! List movies query
//!
//! Returns one insertion-ordered page of the movie store. The store is
//! append-only and never deduplicated, so `id` order is exactly the
//! order the ingestion pipeline persisted records in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;

use crate::error::AppError;
use crate::features::shared::{Paginated, PaginationParams};

/// One stored movie as the API serves it
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MovieItem {
    pub id: i64,
    pub title: String,
    pub cover_url: String,
    pub description: String,
    pub score: f64,
    pub actors: Value,
    pub directors: Value,
    pub genres: Value,
    pub release_date: String,
    pub source: String,
    pub dedupe_key: String,
    pub metadata: Value,
    pub ingested_at: DateTime<Utc>,
}

pub async fn handle(
    pool: &PgPool,
    params: &PaginationParams,
) -> Result<Paginated<MovieItem>, AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
        .fetch_one(pool)
        .await?;

    let items = sqlx::query_as::<_, MovieItem>(
        r#"
        SELECT id, title, cover_url, description, score,
               actors, directors, genres, release_date,
               source, dedupe_key, metadata, ingested_at
        FROM movies
        ORDER BY id
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(params.page_size())
    .bind(params.offset())
    .fetch_all(pool)
    .await?;

    Ok(Paginated::from_items(items, params, total))
}
