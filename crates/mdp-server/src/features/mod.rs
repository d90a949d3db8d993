//! Feature modules implementing the MDP read API
//!
//! Each feature is a vertical slice with its own `queries/` and
//! `routes.rs`. There are no commands: the ingestion pipeline is the
//! only writer, and it lives in the `mdp-ingest` crate.
//!
//! # Features
//!
//! - **movies**: paginated listing and lookup of persisted movie records
//! - **traces**: the ingestion trace log and its orphaned-task view

pub mod movies;
pub mod shared;
pub mod traces;

use axum::Router;
use sqlx::PgPool;

/// Creates the main API router with all feature routes mounted
///
/// - `/movies` - persisted movie records
/// - `/traces` - ingestion trace events
pub fn router(db: PgPool) -> Router<()> {
    Router::new()
        .nest("/movies", movies::movies_routes().with_state(db.clone()))
        .nest("/traces", traces::traces_routes().with_state(db))
}
