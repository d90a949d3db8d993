//! iQiYi video library adapter.
//!
//! The library listing is self-contained, so one fetch is exactly one
//! request. There is no per-record enrichment step.

pub mod config;
pub mod models;
pub mod parser;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::sources::{FetchBatch, SourceAdapter, SourceId};

use self::config::IqiyiConfig;

pub struct IqiyiAdapter {
    client: reqwest::Client,
    config: IqiyiConfig,
}

impl IqiyiAdapter {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_config(client, IqiyiConfig::default())
    }

    pub fn with_config(client: reqwest::Client, config: IqiyiConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl SourceAdapter for IqiyiAdapter {
    fn source(&self) -> SourceId {
        SourceId::Iqiyi
    }

    fn page_size(&self) -> u32 {
        self.config.page_size
    }

    async fn fetch(&self, page: u32) -> Result<FetchBatch> {
        let params = config::library_params(page, self.config.page_size);
        let response = self
            .client
            .get(&self.config.library_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;
        let raw = response.text().await?;

        let items = parser::parse_library(&raw)?;
        debug!(page, items = items.len(), "fetched iqiyi library page");

        let records = items.iter().map(parser::build_record).collect();
        Ok(FetchBatch { records, raw })
    }
}
