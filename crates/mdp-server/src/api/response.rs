//! Standard error envelope for the read API.
//!
//! Every non-2xx response carries the same JSON shape: a short
//! machine-readable `error` code and a human-readable `message`.

use serde::{Deserialize, Serialize};

/// Standard error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short error code, e.g. `not_found` or `internal`
    pub error: String,
    /// Human-readable description
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
