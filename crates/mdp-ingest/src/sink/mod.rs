//! Movie record persistence.
//!
//! Inserts are append-only. Re-running a page stores the same movies
//! again; the `dedupe_key` column exists so duplicate rows can be
//! found and reconciled offline, but nothing in the write path
//! enforces uniqueness.

use async_trait::async_trait;
use mdp_common::checksum::sha256_hex_parts;
use mdp_common::types::MovieRecord;
use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::error::Result;

/// Rows per INSERT statement, to stay well under the Postgres bind
/// parameter limit.
const INSERT_CHUNK_SIZE: usize = 500;

/// A movie record flattened into one insertable row.
#[derive(Debug, Clone)]
pub struct MovieRow {
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
}

/// Flattens fetched records into insertable rows, preserving order.
pub fn flatten(records: &[MovieRecord]) -> Vec<MovieRow> {
    records.iter().map(flatten_one).collect()
}

fn flatten_one(record: &MovieRecord) -> MovieRow {
    let source = record.source_name().to_string();
    let identity = natural_identity(record);
    let dedupe_key = sha256_hex_parts(&[&source, &identity, &record.title]);

    MovieRow {
        title: record.title.clone(),
        cover_url: record.cover_url.clone(),
        description: record.description.clone(),
        score: record.score,
        actors: Value::from(record.actors.clone()),
        directors: Value::from(record.directors.clone()),
        genres: Value::from(record.genres.clone()),
        release_date: record.release_date.clone(),
        source,
        dedupe_key,
        metadata: Value::Object(record.metadata.clone()),
    }
}

/// The platform's own identifier for a record, falling back to the
/// title when none was captured.
fn natural_identity(record: &MovieRecord) -> String {
    for key in ["id", "cid", "entity_id"] {
        match record.metadata.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {},
        }
    }
    record.title.clone()
}

/// Appends flattened rows to the movie store.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Inserts `rows`, returning how many were written. Never
    /// deduplicates.
    async fn insert_many(&self, rows: &[MovieRow]) -> Result<u64>;
}

#[derive(Clone)]
pub struct PgMovieSink {
    pool: PgPool,
}

impl PgMovieSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordSink for PgMovieSink {
    async fn insert_many(&self, rows: &[MovieRow]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted: u64 = 0;

        for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
            let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO movies (title, cover_url, description, score, actors, \
                 directors, genres, release_date, source, dedupe_key, metadata) ",
            );

            query_builder.push_values(chunk, |mut b, row| {
                b.push_bind(&row.title)
                    .push_bind(&row.cover_url)
                    .push_bind(&row.description)
                    .push_bind(row.score)
                    .push_bind(&row.actors)
                    .push_bind(&row.directors)
                    .push_bind(&row.genres)
                    .push_bind(&row.release_date)
                    .push_bind(&row.source)
                    .push_bind(&row.dedupe_key)
                    .push_bind(&row.metadata);
            });

            let result = query_builder.build().execute(&mut *tx).await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;

        debug!(rows = inserted, "inserted movie rows");
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_id(source: &str, id: &str, title: &str) -> MovieRecord {
        let mut record = MovieRecord::new(source);
        record.title = title.to_string();
        record.put_metadata("id", id);
        record
    }

    #[test]
    fn flatten_preserves_order_and_source() {
        let records = vec![
            record_with_id("bilibili", "101", "Movie A"),
            record_with_id("bilibili", "102", "Movie B"),
        ];

        let rows = flatten(&records);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "Movie A");
        assert_eq!(rows[1].title, "Movie B");
        assert_eq!(rows[0].source, "bilibili");
    }

    #[test]
    fn same_record_hashes_to_the_same_dedupe_key() {
        let record = record_with_id("bilibili", "101", "Movie A");
        let rows = flatten(&[record.clone(), record]);

        assert_eq!(rows[0].dedupe_key, rows[1].dedupe_key);
    }

    #[test]
    fn different_platform_ids_hash_differently() {
        let a = record_with_id("bilibili", "101", "Movie A");
        let b = record_with_id("bilibili", "102", "Movie A");

        let rows = flatten(&[a, b]);
        assert_ne!(rows[0].dedupe_key, rows[1].dedupe_key);
    }

    #[test]
    fn identity_falls_back_to_the_title() {
        let mut record = MovieRecord::new("tencent");
        record.title = "Untracked".to_string();

        assert_eq!(natural_identity(&record), "Untracked");
    }

    #[test]
    fn numeric_platform_ids_are_recognized() {
        let mut record = MovieRecord::new("iqiyi");
        record.title = "Numbered".to_string();
        record.put_metadata_number("entity_id", 4433);

        assert_eq!(natural_identity(&record), "4433");
    }
}
