//! Pure parsing for iQiYi payloads.

use mdp_common::types::MovieRecord;

use crate::error::{IngestError, Result};
use crate::sources::{coerce_score_value, SourceId};

use super::models::{LibraryItem, LibraryResponse};

/// Parses one page of the video library.
pub fn parse_library(raw: &str) -> Result<Vec<LibraryItem>> {
    let response: LibraryResponse = serde_json::from_str(raw)
        .map_err(|err| IngestError::Parse(format!("iqiyi library payload: {err}")))?;
    Ok(response.data)
}

/// Builds a record from one library entry.
pub fn build_record(item: &LibraryItem) -> MovieRecord {
    let mut record = MovieRecord::new(SourceId::Iqiyi.as_str());
    record.title = item.title.clone();
    record.cover_url = item.album_image_url_hover.clone();
    record.description = item.description.clone();
    record.score = coerce_score_value(item.sns_score.as_ref());
    record.directors = item.creator.iter().map(|p| p.name.clone()).collect();
    record.actors = item.contributor.iter().map(|p| p.name.clone()).collect();
    record.genres = item
        .tag
        .split(';')
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();
    record.release_date = format!("{}-{}-{}", item.date.year, item.date.month, item.date.day);

    record.put_metadata_number("uploader_id", item.uploader_id);
    record.put_metadata_number("batch_order", item.order);
    record.put_metadata_number("entity_id", item.entity_id);
    record.put_metadata_number("album_id", item.album_id);
    record.put_metadata_number("tv_id", item.tv_id);
    record
}
