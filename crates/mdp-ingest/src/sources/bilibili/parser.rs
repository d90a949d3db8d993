//! Pure parsing for Bilibili payloads.

use mdp_common::types::MovieRecord;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use crate::error::{IngestError, Result};
use crate::sources::{coerce_score_value, SourceId};

use super::models::{IndexItem, IndexResponse};

const ACTORS_LABEL: &str = "出演演员";
const ACTORS_LABEL_PREFIX: &str = "出演演员：";

/// Parses one page of the movie index.
pub fn parse_index(raw: &str) -> Result<Vec<IndexItem>> {
    let response: IndexResponse = serde_json::from_str(raw)
        .map_err(|err| IngestError::Parse(format!("bilibili index payload: {err}")))?;
    Ok(response.data.list)
}

/// Builds a record from one index item plus the actors scraped from
/// its first episode page.
pub fn build_record(item: &IndexItem, actors: Vec<String>) -> MovieRecord {
    let mut record = MovieRecord::new(SourceId::Bilibili.as_str());
    record.title = item.title.clone();
    record.cover_url = item.cover.clone();
    record.description = item.sub_title.clone();
    record.score = coerce_score_value(item.score.as_ref());
    record.actors = actors;
    record.release_date = item
        .index_show
        .strip_suffix("上映")
        .unwrap_or(&item.index_show)
        .to_string();

    record.put_metadata("id", item.first_ep.ep_id.to_string());
    record.put_metadata("order", play_count(&item.order));
    record.put_metadata("url", item.link.clone());
    record
}

fn play_count(order: &Value) -> String {
    let text = match order {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    text.strip_suffix("次播放").unwrap_or(&text).to_string()
}

/// Extracts actor names from an episode page.
///
/// The page has a div whose text starts with the 出演演员 label and
/// lists names separated by newlines. Quoted work titles show up in
/// the same block and are dropped.
pub fn parse_actors(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("div") else {
        return Vec::new();
    };

    for element in document.select(&selector) {
        if !direct_text_contains(element, ACTORS_LABEL) {
            continue;
        }

        let joined: String = element.text().map(str::trim).collect();
        let block = joined.strip_prefix(ACTORS_LABEL_PREFIX).unwrap_or(&joined);

        return block
            .split('\n')
            .map(str::trim)
            .filter(|name| is_actor_name(name))
            .map(str::to_string)
            .collect();
    }

    Vec::new()
}

fn direct_text_contains(element: ElementRef, needle: &str) -> bool {
    element
        .children()
        .filter_map(|node| node.value().as_text())
        .any(|text| text.contains(needle))
}

/// Quoted work titles share the actors block; they are not names.
fn is_actor_name(candidate: &str) -> bool {
    !candidate.is_empty() && !candidate.contains('《') && !candidate.contains('》')
}
