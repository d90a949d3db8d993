//! S3-backed snapshot store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    Client,
};
use tracing::{debug, info};

use crate::config::S3Config;

use super::SnapshotStore;

#[derive(Clone)]
pub struct S3SnapshotStore {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3SnapshotStore {
    pub fn new(config: &S3Config) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "mdp-snapshots",
        );

        let mut s3_config_builder = aws_sdk_s3::Config::builder()
            .credentials_provider(credentials)
            .region(Region::new(config.region.clone()))
            .force_path_style(config.path_style);

        if let Some(endpoint) = &config.endpoint {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(s3_config_builder.build());

        info!("Snapshot S3 client initialized for bucket: {}", config.bucket);

        Self {
            client,
            bucket: config.bucket.clone(),
            prefix: config.prefix.clone(),
        }
    }

    fn build_key(&self, source: &str, page: u32) -> String {
        format!("{}/{}/page_{:05}.json", self.prefix, source, page)
    }
}

#[async_trait]
impl SnapshotStore for S3SnapshotStore {
    async fn capture(&self, source: &str, page: u32, page_size: u32, raw: &[u8]) -> Result<()> {
        let key = self.build_key(source, page);

        debug!(
            "Uploading {} bytes to s3://{}/{} (page size {})",
            raw.len(),
            self.bucket,
            key,
            page_size
        );

        // put_object replaces any existing object under the same key
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type("application/json")
            .body(ByteStream::from(raw.to_vec()))
            .send()
            .await
            .context("Failed to upload snapshot to S3")?;

        Ok(())
    }
}
