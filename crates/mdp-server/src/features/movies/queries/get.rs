//! Get movie query

use sqlx::PgPool;

use super::list::MovieItem;
use crate::error::AppError;

pub async fn handle(pool: &PgPool, id: i64) -> Result<MovieItem, AppError> {
    let movie = sqlx::query_as::<_, MovieItem>(
        r#"
        SELECT id, title, cover_url, description, score,
               actors, directors, genres, release_date,
               source, dedupe_key, metadata, ingested_at
        FROM movies
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    movie.ok_or_else(|| AppError::NotFound(format!("movie {id} does not exist")))
}
