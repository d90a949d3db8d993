//! Common types used across MDP

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Score value meaning "rating unavailable or unparseable".
///
/// Distinguishes a missing rating from a real zero; adapters must coerce
/// any non-numeric upstream score to this value instead of failing.
pub const SENTINEL_SCORE: f64 = -1.0;

/// Metadata key naming the originating source. Present and non-empty on
/// every record the system produces.
pub const METADATA_SOURCE_KEY: &str = "source";

/// The canonical record shape all source adapters produce.
///
/// Field order within `actors` and `directors` preserves the upstream
/// ordering; `release_date` keeps whatever textual format the source used.
///
/// # Examples
///
/// ```rust
/// use mdp_common::types::{MovieRecord, SENTINEL_SCORE};
///
/// let record = MovieRecord::new("iqiyi");
/// assert_eq!(record.source_name(), "iqiyi");
/// assert_eq!(record.score, SENTINEL_SCORE);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Display title
    pub title: String,

    /// Cover image URL
    pub cover_url: String,

    /// Short description or subtitle
    pub description: String,

    /// Numeric rating; [`SENTINEL_SCORE`] when the source had none
    pub score: f64,

    /// Actor names, upstream order preserved
    pub actors: Vec<String>,

    /// Director names, upstream order preserved
    pub directors: Vec<String>,

    /// Genre tags
    pub genres: Vec<String>,

    /// Release date as the source formatted it
    pub release_date: String,

    /// Source-specific attributes; always carries a non-empty `source` key
    pub metadata: Map<String, Value>,
}

impl MovieRecord {
    /// Creates an empty record stamped with its originating source.
    ///
    /// Seeding the `source` metadata key here is what upholds the
    /// every-record-names-its-source invariant; adapters fill in the rest.
    pub fn new(source: impl Into<String>) -> Self {
        let mut metadata = Map::new();
        metadata.insert(
            METADATA_SOURCE_KEY.to_string(),
            Value::String(source.into()),
        );

        Self {
            title: String::new(),
            cover_url: String::new(),
            description: String::new(),
            score: SENTINEL_SCORE,
            actors: Vec::new(),
            directors: Vec::new(),
            genres: Vec::new(),
            release_date: String::new(),
            metadata,
        }
    }

    /// Name of the originating source from the mandatory metadata key.
    pub fn source_name(&self) -> &str {
        self.metadata
            .get(METADATA_SOURCE_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Inserts a string metadata attribute, skipping empty values.
    pub fn put_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.metadata.insert(key.into(), Value::String(value));
        }
    }

    /// Inserts a numeric metadata attribute.
    pub fn put_metadata_number(&mut self, key: impl Into<String>, value: i64) {
        self.metadata.insert(key.into(), Value::from(value));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_carries_source() {
        let record = MovieRecord::new("tencent");
        assert_eq!(record.source_name(), "tencent");
        assert!(!record.source_name().is_empty());
    }

    #[test]
    fn test_new_record_uses_sentinel_score() {
        let record = MovieRecord::new("bilibili");
        assert_eq!(record.score, SENTINEL_SCORE);
    }

    #[test]
    fn test_put_metadata_skips_empty_values() {
        let mut record = MovieRecord::new("iqiyi");
        record.put_metadata("url", "");
        record.put_metadata("id", "12345");

        assert!(!record.metadata.contains_key("url"));
        assert_eq!(
            record.metadata.get("id").and_then(Value::as_str),
            Some("12345")
        );
    }

    #[test]
    fn test_put_metadata_number() {
        let mut record = MovieRecord::new("bilibili");
        record.put_metadata_number("season_id", 4242);
        assert_eq!(
            record.metadata.get("season_id").and_then(Value::as_i64),
            Some(4242)
        );
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let mut record = MovieRecord::new("tencent");
        record.title = "Example".to_string();
        record.score = 8.5;
        record.actors = vec!["A".to_string(), "B".to_string()];

        let json = serde_json::to_string(&record).unwrap();
        let back: MovieRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.actors, vec!["A", "B"]);
    }
}
