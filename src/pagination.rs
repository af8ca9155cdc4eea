//! Pagination descriptor shared by every list page, plus the page window a
//! table footer renders.

use serde::Serialize;

pub const DEFAULT_ITEMS_PER_PAGE: u64 = 10;

/// `{total, page, limit, totalPages}` describing a paged result set.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl Default for PaginationInfo {
    fn default() -> Self {
        Self {
            total: 0,
            page: 1,
            limit: DEFAULT_ITEMS_PER_PAGE,
            total_pages: 0,
        }
    }
}

impl PaginationInfo {
    /// Builds a descriptor whose `total_pages` is computed locally.
    pub fn derive(total: u64, page: u64, limit: u64) -> Self {
        let limit = limit.max(1);
        Self {
            total,
            page: page.max(1),
            limit,
            total_pages: total.div_ceil(limit),
        }
    }

    /// Whether `total_pages == ceil(total / limit)`.
    ///
    /// Descriptors passed through from the backend are not checked on the way
    /// in; callers that care can test them here.
    pub fn is_consistent(&self) -> bool {
        self.limit >= 1 && self.page >= 1 && self.total_pages == self.total.div_ceil(self.limit)
    }

    /// Same totals with `total_pages` recomputed.
    pub fn recomputed(&self) -> Self {
        Self::derive(self.total, self.page, self.limit)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

fn get_pages(
    total_pages: u64,
    current_page: u64,
    left_edge: u64,
    left_current: u64,
    right_current: u64,
    right_edge: u64,
) -> Vec<Option<u64>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let past_last = last_page.saturating_add(1);
    let left_end = (1 + left_edge).min(past_last);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current + 1)
        .min(past_last);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One page of normalized records ready for a table.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Paginated<T> {
    pub records: Vec<T>,
    pub pagination: PaginationInfo,
    /// Page links to render; `None` marks a gap.
    pub pages: Vec<Option<u64>>,
}

impl<T> Paginated<T> {
    pub fn new(records: Vec<T>, pagination: PaginationInfo) -> Self {
        // The backend may send a page past the end.
        let current_page = pagination.page.clamp(1, pagination.total_pages.max(1));
        let pages = get_pages(pagination.total_pages, current_page, 2, 2, 4, 2);

        Self {
            records,
            pagination,
            pages,
        }
    }

    pub fn empty(pagination: PaginationInfo) -> Self {
        Self::new(Vec::new(), pagination)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
