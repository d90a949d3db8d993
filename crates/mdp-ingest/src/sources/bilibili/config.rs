//! Bilibili endpoint configuration.

pub const DEFAULT_PAGE_SIZE: u32 = 60;
pub const DEFAULT_INDEX_URL: &str = "https://api.bilibili.com/pgc/season/index/result";
pub const DEFAULT_EPISODE_URL_BASE: &str = "https://www.bilibili.com/bangumi/play/ep";

#[derive(Debug, Clone)]
pub struct BilibiliConfig {
    /// Bangumi index listing endpoint.
    pub index_url: String,
    /// Episode page URL prefix; the episode id is appended directly.
    pub episode_url_base: String,
    pub page_size: u32,
}

impl Default for BilibiliConfig {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            episode_url_base: DEFAULT_EPISODE_URL_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Query parameters for one page of the movie index. Everything but
/// the page cursor is a fixed filter for the movie category.
pub fn index_params(page: u32, page_size: u32) -> Vec<(&'static str, String)> {
    vec![
        ("area", "-1".to_string()),
        ("style_id", "-1".to_string()),
        ("release_date", "-1".to_string()),
        ("season_status", "-1".to_string()),
        ("order", "2".to_string()),
        ("st", "2".to_string()),
        ("season_type", "2".to_string()),
        ("sort", "0".to_string()),
        ("page", page.to_string()),
        ("pagesize", page_size.to_string()),
        ("type", "1".to_string()),
    ]
}
