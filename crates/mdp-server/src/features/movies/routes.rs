//! Movie routes
//!
//! Public read-only routes over persisted movie records.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use sqlx::PgPool;

use super::queries::{get, list, MovieItem};
use crate::error::AppError;
use crate::features::shared::{Paginated, PaginationParams};

/// Create movie routes
pub fn movies_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_movies))
        .route("/:id", get(get_movie))
}

/// List persisted movies in insertion order
///
/// GET /movies?page=1&page_size=20
async fn list_movies(
    State(db): State<PgPool>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<MovieItem>>, AppError> {
    let page = list::handle(&db, &params).await?;
    Ok(Json(page))
}

/// Get a single movie by id
///
/// GET /movies/:id
async fn get_movie(
    State(db): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Json<MovieItem>, AppError> {
    let movie = get::handle(&db, id).await?;
    Ok(Json(movie))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_movies_routes_exist() {
        let _router = movies_routes();
    }
}
