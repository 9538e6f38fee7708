//! Offset pagination metadata returned alongside listings.

use serde::Serialize;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationMeta {
    /// Computes page counts for `total` rows split into pages of `limit`.
    ///
    /// `page` and `limit` are expected to be at least 1; a zero `limit` yields
    /// zero pages instead of dividing by zero.
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, page: usize, limit: usize, total: usize) -> Self {
        Self {
            data,
            meta: PaginationMeta::new(page, limit, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_five_rows_in_pages_of_ten() {
        let first = PaginationMeta::new(1, 10, 25);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next_page);
        assert!(!first.has_previous_page);

        let second = PaginationMeta::new(2, 10, 25);
        assert!(second.has_next_page);
        assert!(second.has_previous_page);

        let last = PaginationMeta::new(3, 10, 25);
        assert!(!last.has_next_page);
        assert!(last.has_previous_page);
    }

    #[test]
    fn page_past_the_end_is_consistent() {
        let meta = PaginationMeta::new(7, 10, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_next_page);
        assert!(meta.has_previous_page);
    }

    #[test]
    fn empty_listing_has_no_pages() {
        let meta = PaginationMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_previous_page);
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        assert_eq!(PaginationMeta::new(1, 10, 20).total_pages, 2);
        assert_eq!(PaginationMeta::new(1, 1, 1).total_pages, 1);
    }

    #[test]
    fn zero_limit_does_not_divide() {
        assert_eq!(PaginationMeta::new(1, 0, 5).total_pages, 0);
    }

    #[test]
    fn serializes_camel_case() {
        let value = serde_json::to_value(PaginationMeta::new(1, 10, 25)).unwrap();
        assert_eq!(value["totalPages"], 3);
        assert_eq!(value["hasNextPage"], true);
        assert_eq!(value["hasPreviousPage"], false);
    }
}
