// src/domain/pagination.rs

/// Page controls for a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub pages: u32,
}

impl Pagination {
    pub fn new(total_records: u64, page_size: u32, current: u32) -> Self {
        Self {
            current,
            pages: page_count(total_records, page_size),
        }
    }

    /// Page numbers to render, 1-based.
    pub fn page_numbers(&self) -> impl Iterator<Item = u32> {
        1..=self.pages
    }

    pub fn is_current(&self, page: u32) -> bool {
        page == self.current
    }
}

/// `ceil(total / page_size)`; zero for an empty set or a zero page size.
pub fn page_count(total_records: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_records.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
