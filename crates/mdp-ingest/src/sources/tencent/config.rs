//! Tencent Video endpoint configuration.

pub const DEFAULT_PAGE_SIZE: u32 = 30;
pub const DEFAULT_LIST_URL: &str = "https://pbaccess.video.qq.com/trpc.vector_layout.page_view.PageService/getPage?video_appid=3000010";
pub const DEFAULT_DETAIL_URL_BASE: &str = "https://v.qq.com/x/cover/";

#[derive(Debug, Clone)]
pub struct TencentConfig {
    /// Channel listing endpoint, POSTed to with [`list_payload`].
    pub list_url: String,
    /// Cover detail page prefix; `{cid}.html` is appended.
    pub detail_url_base: String,
    pub page_size: u32,
}

impl Default for TencentConfig {
    fn default() -> Self {
        Self {
            list_url: DEFAULT_LIST_URL.to_string(),
            detail_url_base: DEFAULT_DETAIL_URL_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Request payload for one page of the movie channel. The upstream
/// service reads the page number from all three spots.
pub fn list_payload(page: u32) -> serde_json::Value {
    let page = page.to_string();
    serde_json::json!({
        "page_context": {
            "page_index": page,
        },
        "page_params": {
            "page_id": "channel_list_second_page",
            "page_type": "operation",
            "channel_id": "100173",
            "filter_params": "",
            "page": page,
            "new_mark_label_enabled": "1",
        },
        "page_bypass_params": {
            "params": {
                "page_id": "channel_list_second_page",
                "page_type": "operation",
                "channel_id": "100173",
                "filter_params": "",
                "page": page,
                "caller_id": "3000010",
                "platform_id": "2",
                "data_mode": "default",
                "user_mode": "default",
            },
            "scene": "operation",
            "abtest_bypass_id": "747ad9f34a4c8887",
        },
    })
}
