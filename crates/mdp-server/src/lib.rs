//! MDP Server Library
//!
//! Read-only HTTP API over the movie store and the ingestion trace log.
//!
//! # Overview
//!
//! The server exposes what the ingestion pipeline wrote, nothing more:
//!
//! - **Movies**: paginated, insertion-ordered listing plus single-record
//!   lookup
//! - **Traces**: the append-only PENDING/FINISHED lifecycle log, with a
//!   dedicated view of orphaned (interrupted) work units
//!
//! All writes happen in the `mdp-ingest` crate; this server holds no
//! mutable state beyond its connection pool, so every endpoint is a
//! query. Absence of data is a normal empty result, never an error.
//!
//! # Architecture
//!
//! Each feature is a vertical slice under `features/` with its own
//! `queries/` and `routes.rs`; handlers are plain async functions
//! returning `Result<Json<_>, AppError>`.
//!
//! ## Framework Stack
//!
//! - **Axum**: web framework and routing
//! - **SQLx**: PostgreSQL pool and runtime queries
//! - **Tower-http**: tracing, CORS and compression layers

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod middleware;

pub use error::AppError;
