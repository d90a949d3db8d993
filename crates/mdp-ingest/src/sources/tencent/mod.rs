//! Tencent Video channel adapter.
//!
//! One fetch posts to the channel listing for a page of movie cards,
//! then visits each movie's cover page and parses the state blob
//! embedded in it. The cover requests run concurrently with a bounded
//! fan-out; the page fails as a whole if any one of them fails.

pub mod config;
pub mod models;
pub mod parser;

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use mdp_common::types::MovieRecord;
use tracing::debug;

use crate::error::Result;
use crate::sources::{FetchBatch, SourceAdapter, SourceId};

use self::config::TencentConfig;
use self::models::MovieCard;

pub struct TencentAdapter {
    client: reqwest::Client,
    config: TencentConfig,
    max_concurrent: usize,
}

impl TencentAdapter {
    pub fn new(client: reqwest::Client, max_concurrent: usize) -> Self {
        Self::with_config(client, TencentConfig::default(), max_concurrent)
    }

    pub fn with_config(
        client: reqwest::Client,
        config: TencentConfig,
        max_concurrent: usize,
    ) -> Self {
        Self {
            client,
            config,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Resolves a listing card into a full record via its cover page.
    async fn enrich(&self, card: MovieCard) -> Result<MovieRecord> {
        let url = format!("{}{}.html", self.config.detail_url_base, card.params.cid);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;

        let state = parser::extract_detail_state(&body)?;
        parser::build_record(&card, &state)
    }
}

#[async_trait]
impl SourceAdapter for TencentAdapter {
    fn source(&self) -> SourceId {
        SourceId::Tencent
    }

    fn page_size(&self) -> u32 {
        self.config.page_size
    }

    async fn fetch(&self, page: u32) -> Result<FetchBatch> {
        let payload = config::list_payload(page);
        let response = self
            .client
            .post(&self.config.list_url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        let raw = response.text().await?;

        let cards = parser::parse_list(&raw)?;
        debug!(page, cards = cards.len(), "fetched tencent channel page");

        let records: Vec<MovieRecord> =
            stream::iter(cards.into_iter().map(|card| self.enrich(card)))
                .buffered(self.max_concurrent)
                .try_collect()
                .await?;

        Ok(FetchBatch { records, raw })
    }
}
