//! Task key generation.
//!
//! Every pipeline step that emits trace events is tagged with a task
//! key so its PENDING and FINISHED events can be joined back together.
//! Keys combine a process-wide sequence counter with a random UUID, so
//! they stay unique however many runs share the process.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Generates task keys of the form `{category}:{seq:08}:{uuid}`.
#[derive(Debug, Default)]
pub struct KeyGenerator {
    counter: AtomicU64,
}

impl KeyGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Returns the next key in `category`'s namespace.
    pub fn generate(&self, category: &str) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}:{:08}:{}", category, seq, Uuid::new_v4())
    }
}
