//! Pagination envelope and query parameters

use serde::{Deserialize, Serialize};

/// Page size ceiling for list endpoints
const MAX_PAGE_SIZE: u32 = 100;

/// `?page&size` query parameters with the defaults the API documents
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl PageParams {
    /// Resolve defaults and clamp the size to 1..=100
    pub fn normalize(self) -> (u32, u32) {
        let page = self.page.unwrap_or(0);
        let size = self.size.unwrap_or(10).clamp(1, MAX_PAGE_SIZE);
        (page, size)
    }
}

/// One page of results with its metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page: u32, size: u32, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(u64::from(size));
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_applies_defaults_and_clamps() {
        let (page, size) = PageParams {
            page: None,
            size: None,
        }
        .normalize();
        assert_eq!((page, size), (0, 10));

        let (_, size) = PageParams {
            page: Some(2),
            size: Some(0),
        }
        .normalize();
        assert_eq!(size, 1);

        let (_, size) = PageParams {
            page: Some(2),
            size: Some(10_000),
        }
        .normalize();
        assert_eq!(size, 100);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Page<u32> = Page::new(vec![], 0, 10, 31);
        assert_eq!(page.total_pages, 4);

        let page: Page<u32> = Page::new(vec![], 0, 10, 0);
        assert_eq!(page.total_pages, 0);
    }
}
