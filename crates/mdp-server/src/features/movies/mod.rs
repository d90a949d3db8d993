//! Movies feature module
//!
//! Read-only access to the append-only movie store, in insertion order.

pub mod queries;
pub mod routes;

pub use routes::movies_routes;
