//! Pagination utilities for service layer
//!
//! `Pagination` carries the request, `PaginatedList` one page of results plus totals.

use serde::Serialize;

pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Clamp to sane bounds and return `(0-based page index, page size)`.
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, MAX_PAGE_SIZE);
        ((page - 1) as u64, per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// One page of results.
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedList<T> {
    pub items: Vec<T>,
    /// 1-based
    pub page_number: u64,
    pub total_pages: u64,
    pub total_count: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl<T> PaginatedList<T> {
    pub fn new(items: Vec<T>, page_index: u64, total_count: u64, total_pages: u64) -> Self {
        let page_number = page_index + 1;
        Self {
            items,
            page_number,
            total_pages,
            total_count,
            has_previous_page: page_number > 1,
            has_next_page: page_number < total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PaginatedList, Pagination};

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (idx, per) = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(idx, 4);
        assert_eq!(per, 100);
    }

    #[test]
    fn page_flags() {
        let first = PaginatedList::new(vec![1, 2], 0, 5, 3);
        assert_eq!(first.page_number, 1);
        assert!(!first.has_previous_page);
        assert!(first.has_next_page);

        let last = PaginatedList::new(vec![5], 2, 5, 3);
        assert_eq!(last.items, vec![5]);
        assert!(last.has_previous_page);
        assert!(!last.has_next_page);

        let empty: PaginatedList<i32> = PaginatedList::new(vec![], 0, 0, 0);
        assert!(!empty.has_next_page);
    }
}
