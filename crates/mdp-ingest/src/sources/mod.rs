//! Upstream platform adapters.
//!
//! Each adapter turns one listing page into an ordered batch of
//! [`MovieRecord`]s plus the raw payload the batch was parsed from.
//! Adapters never retry and never partially succeed: a transport
//! failure, a non-success status or a payload missing expected
//! structure fails the whole page, including a failure in a single
//! record's enrichment request.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use mdp_common::types::{MovieRecord, SENTINEL_SCORE};
use serde_json::Value;

use crate::config::IngestConfig;
use crate::error::Result;

pub mod bilibili;
pub mod iqiyi;
pub mod tencent;

pub use bilibili::BilibiliAdapter;
pub use iqiyi::IqiyiAdapter;
pub use tencent::TencentAdapter;

/// Platforms the pipeline can ingest from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    Bilibili,
    Tencent,
    Iqiyi,
}

impl SourceId {
    pub const ALL: [SourceId; 3] = [SourceId::Bilibili, SourceId::Tencent, SourceId::Iqiyi];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::Bilibili => "bilibili",
            SourceId::Tencent => "tencent",
            SourceId::Iqiyi => "iqiyi",
        }
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bilibili" => Ok(SourceId::Bilibili),
            "tencent" => Ok(SourceId::Tencent),
            "iqiyi" => Ok(SourceId::Iqiyi),
            other => Err(format!("unknown source: {other}")),
        }
    }
}

/// One fetched page: parsed records plus the raw payload they came
/// from.
#[derive(Debug, Clone)]
pub struct FetchBatch {
    pub records: Vec<MovieRecord>,
    pub raw: String,
}

/// A platform adapter.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn source(&self) -> SourceId;

    /// Page size this adapter requests from the platform.
    fn page_size(&self) -> u32;

    /// Fetches one page of records, in the order the platform listed
    /// them.
    async fn fetch(&self, page: u32) -> Result<FetchBatch>;
}

/// HTTP client shared by all adapters.
pub fn build_http_client(config: &IngestConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);

    if config.http_timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(config.http_timeout_secs));
    }

    Ok(builder.build()?)
}

/// Builds the adapter for `source`.
pub fn build_adapter(
    source: SourceId,
    client: reqwest::Client,
    config: &IngestConfig,
) -> Box<dyn SourceAdapter> {
    match source {
        SourceId::Bilibili => Box::new(BilibiliAdapter::new(
            client,
            config.max_concurrent_enrichments,
        )),
        SourceId::Tencent => Box::new(TencentAdapter::new(
            client,
            config.max_concurrent_enrichments,
        )),
        SourceId::Iqiyi => Box::new(IqiyiAdapter::new(client)),
    }
}

/// Parses a platform score, falling back to the sentinel for missing,
/// empty or unparseable values.
pub(crate) fn coerce_score(value: Option<&str>) -> f64 {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(SENTINEL_SCORE)
}

/// Like [`coerce_score`] but for JSON values that may already be
/// numeric.
pub(crate) fn coerce_score_value(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(SENTINEL_SCORE),
        Some(Value::String(s)) => coerce_score(Some(s)),
        _ => SENTINEL_SCORE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_ids_round_trip_through_strings() {
        for source in SourceId::ALL {
            let parsed: SourceId = source.as_str().parse().unwrap();
            assert_eq!(parsed, source);
        }

        assert_eq!("Bilibili".parse::<SourceId>().unwrap(), SourceId::Bilibili);
        assert!("netflix".parse::<SourceId>().is_err());
    }

    #[test]
    fn numeric_scores_parse() {
        assert_eq!(coerce_score(Some("8.5")), 8.5);
        assert_eq!(coerce_score(Some(" 7.2 ")), 7.2);
        assert_eq!(coerce_score(Some("9")), 9.0);
    }

    #[test]
    fn unusable_scores_fall_back_to_the_sentinel() {
        assert_eq!(coerce_score(Some("N/A")), SENTINEL_SCORE);
        assert_eq!(coerce_score(Some("")), SENTINEL_SCORE);
        assert_eq!(coerce_score(None), SENTINEL_SCORE);
    }

    #[test]
    fn json_scores_accept_numbers_and_strings() {
        assert_eq!(coerce_score_value(Some(&Value::from(8.1))), 8.1);
        assert_eq!(coerce_score_value(Some(&Value::from("6.9"))), 6.9);
        assert_eq!(coerce_score_value(Some(&Value::Null)), SENTINEL_SCORE);
        assert_eq!(coerce_score_value(None), SENTINEL_SCORE);
    }
}
