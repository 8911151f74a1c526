use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 1000;

/// A page the caller asked for. Page indices are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub index: usize,
    pub size: usize,
}

impl PageRequest {
    /// Builds a request, lifting `index` to at least 1 and clamping `size` to `1..=MAX_PAGE_SIZE`.
    pub fn new(index: usize, size: usize) -> Self {
        Self {
            index: index.max(1),
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// First page with the given size.
    pub fn first(size: usize) -> Self {
        Self::new(1, size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Authoritative pagination for the visible page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl Pagination {
    /// Pagination for a page that has not been fetched yet: no totals known.
    pub fn empty(page: PageRequest) -> Self {
        Self {
            page_index: page.index,
            page_size: page.size,
            total_items: 0,
            total_pages: 0,
        }
    }

    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page_index, self.page_size)
    }

    pub fn has_next_page(&self) -> bool {
        self.page_index < self.total_pages
    }

    pub fn has_prev_page(&self) -> bool {
        self.page_index > 1
    }

    /// Number of pages needed for `total_items` at `page_size`.
    pub fn pages_for(total_items: usize, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        total_items.div_ceil(page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::empty(PageRequest::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_clamps() {
        assert_eq!(PageRequest::new(0, 0), PageRequest { index: 1, size: 1 });
        assert_eq!(PageRequest::new(3, 5_000).size, MAX_PAGE_SIZE);
        assert_eq!(PageRequest::default(), PageRequest { index: 1, size: 10 });
    }

    #[test]
    fn pages_for_rounds_up() {
        assert_eq!(Pagination::pages_for(0, 10), 0);
        assert_eq!(Pagination::pages_for(10, 10), 1);
        assert_eq!(Pagination::pages_for(11, 10), 2);
        assert_eq!(Pagination::pages_for(5, 0), 0);
    }

    #[test]
    fn navigation_flags() {
        let p = Pagination {
            page_index: 2,
            page_size: 10,
            total_items: 35,
            total_pages: 4,
        };
        assert!(p.has_next_page());
        assert!(p.has_prev_page());

        let first = Pagination::empty(PageRequest::first(10));
        assert!(!first.has_next_page());
        assert!(!first.has_prev_page());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&Pagination::default()).unwrap();
        assert_eq!(
            json,
            r#"{"pageIndex":1,"pageSize":10,"totalItems":0,"totalPages":0}"#
        );
    }
}
