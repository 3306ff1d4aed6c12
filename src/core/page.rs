//! Pagination over filtered, stably-ordered collections

use serde::Serialize;

/// Raw pagination input from the query string.
///
/// Both values are optional; absent or unparsable input degrades to the
/// configured defaults rather than rejecting the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRequest {
    /// Requested page number, 1-indexed.
    pub page: Option<usize>,
    /// Requested page size.
    pub limit: Option<usize>,
}

/// Applies the configured page-size policy to a collection.
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    default_limit: usize,
    max_limit: usize,
}

impl Pager {
    pub fn new(default_limit: usize, max_limit: usize) -> Self {
        // keep the invariants sane even under a hostile config
        let max_limit = max_limit.max(1);
        let default_limit = default_limit.clamp(1, max_limit);
        Self {
            default_limit,
            max_limit,
        }
    }

    /// Effective page number, 1-indexed; zero degrades to the first page.
    fn page(&self, request: PageRequest) -> usize {
        request.page.unwrap_or(1).max(1)
    }

    /// Effective page size: the default when absent or zero, clamped to the
    /// configured maximum when above it.
    fn limit(&self, request: PageRequest) -> usize {
        match request.limit {
            None | Some(0) => self.default_limit,
            Some(limit) => limit.min(self.max_limit),
        }
    }

    /// Slice a collection into a page envelope.
    ///
    /// Purely a view: the relative order of `items` is preserved, and a
    /// page past the end yields an empty slice with an accurate total.
    pub fn paginate<T>(&self, items: Vec<T>, request: PageRequest) -> Page<T> {
        let page = self.page(request);
        let limit = self.limit(request);
        let total = items.len();
        let data: Vec<T> = items
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .collect();
        Page {
            data,
            pagination: PageMeta::new(page, limit, total),
        }
    }
}

/// Page envelope returned by list operations.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    /// Current page number (starts at 1).
    pub page: usize,
    /// Effective page size.
    pub limit: usize,
    /// Total number of items after filtering.
    pub total: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_prev: bool,
}

impl PageMeta {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = (page - 1) * limit;

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start + limit < total,
            has_prev: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn defaults_apply() {
        let pager = Pager::new(20, 100);
        let page = pager.paginate(items(45), PageRequest::default());
        assert_eq!(page.data.len(), 20);
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.limit, 20);
        assert_eq!(page.pagination.total, 45);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_next);
        assert!(!page.pagination.has_prev);
    }

    #[test]
    fn oversized_limit_is_clamped() {
        let pager = Pager::new(20, 50);
        let page = pager.paginate(
            items(200),
            PageRequest {
                page: None,
                limit: Some(1000),
            },
        );
        assert_eq!(page.pagination.limit, 50);
        assert_eq!(page.data.len(), 50);
    }

    #[test]
    fn zero_limit_falls_back_to_default() {
        let pager = Pager::new(20, 100);
        let page = pager.paginate(
            items(5),
            PageRequest {
                page: None,
                limit: Some(0),
            },
        );
        assert_eq!(page.pagination.limit, 20);
    }

    #[test]
    fn page_past_the_end_is_empty_with_accurate_total() {
        let pager = Pager::new(10, 100);
        let page = pager.paginate(
            items(25),
            PageRequest {
                page: Some(9),
                limit: None,
            },
        );
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 25);
        assert!(!page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }

    #[test]
    fn page_zero_degrades_to_first() {
        let pager = Pager::new(10, 100);
        let page = pager.paginate(
            items(25),
            PageRequest {
                page: Some(0),
                limit: None,
            },
        );
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.data, items(10));
    }

    #[test]
    fn slicing_preserves_order() {
        let pager = Pager::new(10, 100);
        let page = pager.paginate(
            items(25),
            PageRequest {
                page: Some(2),
                limit: Some(10),
            },
        );
        assert_eq!(page.data, (10..20).collect::<Vec<_>>());
        assert!(page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }

    #[test]
    fn meta_math() {
        let meta = PageMeta::new(1, 20, 145);
        assert_eq!(meta.total_pages, 8);
        assert!(meta.has_next);
        assert!(!meta.has_prev);

        let meta = PageMeta::new(8, 20, 145);
        assert!(!meta.has_next);
        assert!(meta.has_prev);

        let meta = PageMeta::new(1, 20, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
    }
}
