//! Shared pagination utilities
//!
//! Common pagination types used by the list queries. Out-of-range
//! parameters clamp instead of erroring: absence or nonsense from a
//! caller is answered with the nearest valid page, the same way
//! absence of data is answered with an empty slice.

use serde::{Deserialize, Serialize};

/// Smallest page size the API will serve.
pub const MIN_PAGE_SIZE: i64 = 20;

/// Largest page size the API will serve.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Common pagination request parameters
///
/// Page numbers are 1-indexed; values below 1 clamp to 1. Page size
/// defaults to [`MIN_PAGE_SIZE`] and clamps into
/// [`MIN_PAGE_SIZE`]..=[`MAX_PAGE_SIZE`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PaginationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
}

impl PaginationParams {
    /// Create new pagination parameters
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self { page, page_size }
    }

    /// Get the page number (1-indexed), clamped to at least 1
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Get the page size, clamped to the allowed range
    pub fn page_size(&self) -> i64 {
        self.page_size
            .unwrap_or(MIN_PAGE_SIZE)
            .clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
    }

    /// Calculate the offset for a SQL OFFSET clause
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.page_size()
    }
}

/// Wrapper for paginated list responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Items for the current page; empty is a normal result
    pub items: Vec<T>,

    /// Current page number (1-indexed)
    pub page: i64,

    /// Page size actually served
    pub page_size: i64,

    /// Total items across all pages
    pub total_items: i64,

    /// Total number of pages
    pub total_pages: i64,
}

impl<T> Paginated<T> {
    /// Create a paginated response from items, params, and total count
    pub fn from_items(items: Vec<T>, params: &PaginationParams, total_items: i64) -> Self {
        let page_size = params.page_size();
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + page_size - 1) / page_size
        };

        Self {
            items,
            page: params.page(),
            page_size,
            total_items,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_params_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), MIN_PAGE_SIZE);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_pagination_params_custom() {
        let params = PaginationParams::new(Some(3), Some(50));
        assert_eq!(params.page(), 3);
        assert_eq!(params.page_size(), 50);
        assert_eq!(params.offset(), 100);
    }

    #[test]
    fn test_page_below_one_clamps_to_one() {
        let params = PaginationParams::new(Some(0), None);
        assert_eq!(params.page(), 1);

        let params = PaginationParams::new(Some(-7), None);
        assert_eq!(params.page(), 1);
    }

    #[test]
    fn test_page_size_clamps_both_ways() {
        let params = PaginationParams::new(None, Some(5));
        assert_eq!(params.page_size(), MIN_PAGE_SIZE);

        let params = PaginationParams::new(None, Some(500));
        assert_eq!(params.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_paginated_counts_pages() {
        let params = PaginationParams::new(Some(1), Some(20));
        let paginated = Paginated::from_items(vec![1, 2, 3], &params, 45);

        assert_eq!(paginated.total_items, 45);
        assert_eq!(paginated.total_pages, 3);
        assert_eq!(paginated.page_size, 20);
    }

    #[test]
    fn test_paginated_empty_is_zero_pages() {
        let params = PaginationParams::default();
        let paginated: Paginated<i64> = Paginated::from_items(vec![], &params, 0);

        assert!(paginated.items.is_empty());
        assert_eq!(paginated.total_pages, 0);
    }
}
