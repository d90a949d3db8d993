//! Traces feature module
//!
//! Read-only access to the append-only trace event log the ingestion
//! pipeline writes, including the orphan view used to spot interrupted
//! work units.

pub mod queries;
pub mod routes;

pub use routes::traces_routes;
