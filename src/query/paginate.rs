//! Pagination
//!
//! Pages are 1-indexed. Page `n` covers `[(n - 1) * limit, n * limit)`;
//! a page past the end is empty rather than an error.

use serde::Serialize;

/// Page size used when the client doesn't ask for one
pub const DEFAULT_PAGE_LIMIT: usize = 4;

/// Largest page size a client may ask for
pub const MAX_PAGE_LIMIT: usize = 100;

// == Pagination ==
/// Requested page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
}

impl Pagination {
    /// Builds a pagination request, substituting defaults for missing or
    /// zero values and capping the page size.
    pub fn new(page: Option<usize>, limit: Option<usize>) -> Self {
        Self {
            page: page.filter(|p| *p >= 1).unwrap_or(1),
            limit: limit
                .filter(|l| *l >= 1)
                .unwrap_or(DEFAULT_PAGE_LIMIT)
                .min(MAX_PAGE_LIMIT),
        }
    }

    pub fn start_index(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn end_index(&self) -> usize {
        self.page.saturating_mul(self.limit)
    }

    /// Position of this page within `total` results.
    pub fn page_info(&self, total: usize) -> PageInfo {
        let next = (self.end_index() < total).then(|| PageLink {
            page: self.page + 1,
            limit: self.limit,
        });
        let previous = (self.start_index() > 0).then(|| PageLink {
            page: self.page - 1,
            limit: self.limit,
        });

        PageInfo {
            current_page: self.page,
            total_pages: total.div_ceil(self.limit),
            limit: self.limit,
            next,
            previous,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pointer to a neighbouring page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub page: usize,
    pub limit: usize,
}

/// Where a page sits within the full result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<PageLink>,
}

/// One page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_results: usize,
    pub info: PageInfo,
}

/// Slices `items` to the requested page.
pub fn paginate<T: Clone>(items: &[T], pagination: Pagination) -> Page<T> {
    let total = items.len();
    let start = pagination.start_index();
    let end = pagination.end_index();

    let slice = if start < total {
        items[start..end.min(total)].to_vec()
    } else {
        Vec::new()
    };

    Page {
        items: slice,
        total_results: total,
        info: pagination.page_info(total),
    }
}
