//! Movie queries

pub mod get;
pub mod list;

pub use list::MovieItem;
