use serde::{Deserialize, Serialize};

use crate::models::PostStatus;

/// 1-based page selection for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

impl PageRequest {
    /// Clamps nonsensical values: page and page size are at least 1.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Listing filter. All fields are optional; the default filter matches
/// every post visible to the caller, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostFilter {
    /// Only posts carrying this category label.
    pub category: Option<String>,
    /// Case-insensitive substring match over title, body and excerpt.
    pub search: Option<String>,
    /// Explicit status filter. When absent, visibility falls back to the
    /// session rule (published only for anonymous callers).
    pub status: Option<PostStatus>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

/// One page of listing results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matches across all pages.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_page_request_matches_listing_defaults() {
        let page = PageRequest::default();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 10);
    }

    #[test]
    fn normalized_lifts_zero_values() {
        let page = PageRequest {
            page: 0,
            page_size: 0,
        }
        .normalized();
        assert_eq!(page, PageRequest { page: 1, page_size: 1 });
    }

    #[test]
    fn default_filter_sorts_newest_first() {
        let filter = PostFilter::default();
        assert_eq!(filter.sort_by, SortBy::CreatedAt);
        assert_eq!(filter.sort_order, SortOrder::Desc);
        assert!(filter.category.is_none());
        assert!(filter.search.is_none());
        assert!(filter.status.is_none());
    }
}
