//! Wire models for the iQiYi video library.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct LibraryResponse {
    pub data: Vec<LibraryItem>,
}

/// One movie entry. The listing is self-contained; there is no detail
/// page to visit.
#[derive(Debug, Clone, Deserialize)]
pub struct LibraryItem {
    pub title: String,
    pub album_image_url_hover: String,
    pub creator: Vec<Person>,
    pub contributor: Vec<Person>,
    pub date: ReleaseDate,
    pub description: String,
    /// Community rating; may be a number, a string or absent.
    #[serde(default)]
    pub sns_score: Option<Value>,
    /// Semicolon-separated genre tags.
    #[serde(default)]
    pub tag: String,
    pub uploader_id: i64,
    pub order: i64,
    pub entity_id: i64,
    pub album_id: i64,
    pub tv_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseDate {
    pub year: i64,
    pub month: i64,
    pub day: i64,
}
