//! Bilibili movie index adapter.
//!
//! One fetch hits the bangumi index for a page of movies, then visits
//! each movie's first episode page to scrape its cast. The episode
//! requests run concurrently with a bounded fan-out; the page fails as
//! a whole if any one of them fails.

pub mod config;
pub mod models;
pub mod parser;

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use mdp_common::types::MovieRecord;
use tracing::debug;

use crate::error::Result;
use crate::sources::{FetchBatch, SourceAdapter, SourceId};

use self::config::BilibiliConfig;
use self::models::IndexItem;

pub struct BilibiliAdapter {
    client: reqwest::Client,
    config: BilibiliConfig,
    max_concurrent: usize,
}

impl BilibiliAdapter {
    pub fn new(client: reqwest::Client, max_concurrent: usize) -> Self {
        Self::with_config(client, BilibiliConfig::default(), max_concurrent)
    }

    pub fn with_config(
        client: reqwest::Client,
        config: BilibiliConfig,
        max_concurrent: usize,
    ) -> Self {
        Self {
            client,
            config,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Scrapes the cast off the movie's first episode page and builds
    /// the final record.
    async fn enrich(&self, item: IndexItem) -> Result<MovieRecord> {
        let url = format!("{}{}", self.config.episode_url_base, item.first_ep.ep_id);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;

        let actors = parser::parse_actors(&body);
        Ok(parser::build_record(&item, actors))
    }
}

#[async_trait]
impl SourceAdapter for BilibiliAdapter {
    fn source(&self) -> SourceId {
        SourceId::Bilibili
    }

    fn page_size(&self) -> u32 {
        self.config.page_size
    }

    async fn fetch(&self, page: u32) -> Result<FetchBatch> {
        let params = config::index_params(page, self.config.page_size);
        let response = self
            .client
            .get(&self.config.index_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;
        let raw = response.text().await?;

        let items = parser::parse_index(&raw)?;
        debug!(page, items = items.len(), "fetched bilibili index page");

        let records: Vec<MovieRecord> =
            stream::iter(items.into_iter().map(|item| self.enrich(item)))
                .buffered(self.max_concurrent)
                .try_collect()
                .await?;

        Ok(FetchBatch { records, raw })
    }
}
