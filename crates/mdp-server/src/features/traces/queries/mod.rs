//! Trace queries

pub mod list;
pub mod orphaned;

pub use list::{TraceEventItem, TraceFilter};
pub use orphaned::OrphanedTaskItem;
