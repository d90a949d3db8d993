//! MDP Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types and utilities for the MDP workspace.
//!
//! # Overview
//!
//! This crate provides common functionality used across all MDP workspace members:
//!
//! - **Types**: the canonical movie record every source adapter produces
//! - **Logging**: centralized tracing setup for binaries
//! - **Checksums**: hashing helpers used for record dedupe keys
//!
//! # Example
//!
//! ```no_run
//! use mdp_common::types::MovieRecord;
//!
//! let mut record = MovieRecord::new("bilibili");
//! record.title = "Some Title".to_string();
//! assert_eq!(record.source_name(), "bilibili");
//! ```

pub mod checksum;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use types::{MovieRecord, SENTINEL_SCORE};
