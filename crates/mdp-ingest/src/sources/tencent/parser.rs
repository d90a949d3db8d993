//! Pure parsing for Tencent Video payloads.

use std::sync::LazyLock;

use mdp_common::types::MovieRecord;
use regex::Regex;

use crate::error::{IngestError, Result};
use crate::sources::{coerce_score, SourceId};

use super::models::{DetailState, ImgTagVer, ListResponse, MovieCard};

static STATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"window\.__PINIA__=(.+)?</script>").expect("state pattern is valid")
});

/// Parses one page of the channel listing down to its movie cards.
///
/// Movie cards normally sit in the second top-level card; a listing
/// with only one card keeps them in the first.
pub fn parse_list(raw: &str) -> Result<Vec<MovieCard>> {
    let response: ListResponse = serde_json::from_str(raw)
        .map_err(|err| IngestError::Parse(format!("tencent list payload: {err}")))?;

    if response.ret != 0 {
        return Err(IngestError::Parse(format!(
            "tencent list ret={}: {}",
            response.ret, response.msg
        )));
    }

    let mut card_list = response.data.card_list;
    if card_list.is_empty() {
        return Err(IngestError::Parse("tencent list has no cards".to_string()));
    }

    let index = if card_list.len() > 1 { 1 } else { 0 };
    let card = card_list.swap_remove(index);
    let children = card
        .children_list
        .ok_or_else(|| IngestError::Parse("tencent card has no children_list".to_string()))?;

    Ok(children.list.cards)
}

/// Extracts the embedded page state blob from a cover detail page.
///
/// The state is inlined as a one-line script assignment and is not
/// quite JSON: `undefined` literals, an `Array.prototype.slice.call(`
/// wrapper and its closing `)` have to be repaired before
/// deserializing.
pub fn extract_detail_state(html: &str) -> Result<DetailState> {
    let captures = STATE_PATTERN.captures(html).ok_or_else(|| {
        IngestError::Parse("tencent detail page has no embedded state".to_string())
    })?;

    let blob = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let repaired = blob
        .replace("undefined", "null")
        .replace("Array.prototype.slice.call(", "")
        .replace("})", "}");

    serde_json::from_str(&repaired)
        .map_err(|err| IngestError::Parse(format!("tencent detail state: {err}")))
}

/// Pulls the rating out of the doubly-encoded tag document.
pub fn parse_detail_score(state: &DetailState) -> Result<f64> {
    let intro = state
        .introduction
        .intro_data
        .list
        .first()
        .ok_or_else(|| IngestError::Parse("tencent detail state has no intro entry".to_string()))?;

    let tags: ImgTagVer = serde_json::from_str(&intro.item_params.imgtag_ver)
        .map_err(|err| IngestError::Parse(format!("tencent imgtag_ver: {err}")))?;

    let text = tags.tag_4.text;
    let text = text.strip_suffix('分').unwrap_or(&text);
    Ok(coerce_score(Some(text)))
}

/// Builds a record from a listing card plus its detail page state.
pub fn build_record(card: &MovieCard, state: &DetailState) -> Result<MovieRecord> {
    let cover_info = &state.global.cover_info;
    let vid = cover_info
        .video_ids
        .first()
        .ok_or_else(|| IngestError::Parse("tencent cover has no video ids".to_string()))?;

    let mut record = MovieRecord::new(SourceId::Tencent.as_str());
    record.title = card.params.title.clone();
    record.cover_url = cover_info.new_pic_vt.clone();
    record.description = cover_info.description.clone();
    record.score = parse_detail_score(state)?;
    record.genres = vec![card.params.main_genre.clone()];
    record.release_date = card.params.episode_pubtime.clone();
    record.actors = state
        .introduction
        .star_data
        .list
        .iter()
        .map(|star| star.star_name.clone())
        .collect();

    record.put_metadata("cid", card.params.cid.clone());
    record.put_metadata("vid", vid.clone());
    record.put_metadata("area", card.params.area_name.clone());
    Ok(record)
}
