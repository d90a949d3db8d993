//! iQiYi endpoint configuration.

pub const DEFAULT_PAGE_SIZE: u32 = 24;
pub const DEFAULT_LIBRARY_URL: &str = "https://mesh.if.iqiyi.com/portal/lw/videolib/data";

/// Movie channel in the video library.
pub const MOVIE_CHANNEL_ID: &str = "1";

#[derive(Debug, Clone)]
pub struct IqiyiConfig {
    pub library_url: String,
    pub page_size: u32,
}

impl Default for IqiyiConfig {
    fn default() -> Self {
        Self {
            library_url: DEFAULT_LIBRARY_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Query parameters for one page of the video library.
pub fn library_params(page: u32, page_size: u32) -> Vec<(&'static str, String)> {
    vec![
        ("ret_num", page_size.to_string()),
        ("channel_id", MOVIE_CHANNEL_ID.to_string()),
        ("page_id", page.to_string()),
    ]
}
