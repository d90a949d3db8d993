//! Wire models for the Bilibili bangumi index.

use serde::Deserialize;
use serde_json::Value;

/// Top-level index response. `data.list` is required; a payload
/// without it fails the page.
#[derive(Debug, Deserialize)]
pub struct IndexResponse {
    pub data: IndexData,
}

#[derive(Debug, Deserialize)]
pub struct IndexData {
    pub list: Vec<IndexItem>,
}

/// One movie entry in the index listing.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexItem {
    pub title: String,
    pub cover: String,
    #[serde(rename = "subTitle", default)]
    pub sub_title: String,
    /// Rating as the platform renders it; missing for unrated titles.
    #[serde(default)]
    pub score: Option<Value>,
    /// Display string like `2021-10-01上映`.
    pub index_show: String,
    /// Play count display string like `1200万次播放`.
    pub order: Value,
    pub link: String,
    pub first_ep: FirstEpisode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirstEpisode {
    pub ep_id: i64,
}
