//! Wire models for Tencent Video payloads.

use serde::Deserialize;

/// Channel listing response. A non-zero `ret` is an upstream-reported
/// error and fails the page.
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    pub ret: i64,
    #[serde(default)]
    pub msg: String,
    pub data: ListData,
}

#[derive(Debug, Deserialize)]
pub struct ListData {
    #[serde(rename = "CardList")]
    pub card_list: Vec<Card>,
}

/// The listing nests movie cards inside the second card's children;
/// single-card layouts put them in the first. Cards without children
/// exist, so the field is optional here and checked at selection time.
#[derive(Debug, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub children_list: Option<ChildrenList>,
}

#[derive(Debug, Deserialize)]
pub struct ChildrenList {
    pub list: CardHolder,
}

#[derive(Debug, Deserialize)]
pub struct CardHolder {
    pub cards: Vec<MovieCard>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieCard {
    pub params: CardParams,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardParams {
    pub cid: String,
    pub title: String,
    pub main_genre: String,
    /// Release timestamp, field name as the platform spells it.
    #[serde(rename = "epsode_pubtime")]
    pub episode_pubtime: String,
    pub area_name: String,
}

/// Embedded page state scraped off a cover detail page.
#[derive(Debug, Deserialize)]
pub struct DetailState {
    pub global: DetailGlobal,
    pub introduction: DetailIntroduction,
}

#[derive(Debug, Deserialize)]
pub struct DetailGlobal {
    #[serde(rename = "coverInfo")]
    pub cover_info: CoverInfo,
}

#[derive(Debug, Deserialize)]
pub struct CoverInfo {
    pub new_pic_vt: String,
    pub description: String,
    pub video_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailIntroduction {
    #[serde(rename = "introData")]
    pub intro_data: IntroData,
    #[serde(rename = "starData")]
    pub star_data: StarData,
}

#[derive(Debug, Deserialize)]
pub struct IntroData {
    pub list: Vec<IntroItem>,
}

#[derive(Debug, Deserialize)]
pub struct IntroItem {
    pub item_params: IntroParams,
}

#[derive(Debug, Deserialize)]
pub struct IntroParams {
    /// A JSON document serialized into a string field; the rating tag
    /// lives inside it.
    pub imgtag_ver: String,
}

#[derive(Debug, Deserialize)]
pub struct StarData {
    pub list: Vec<Star>,
}

#[derive(Debug, Deserialize)]
pub struct Star {
    pub star_name: String,
}

/// The doubly-encoded rating tag document.
#[derive(Debug, Deserialize)]
pub struct ImgTagVer {
    pub tag_4: ImgTag,
}

#[derive(Debug, Deserialize)]
pub struct ImgTag {
    pub text: String,
}
