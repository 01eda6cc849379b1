//! One page of a listing plus the numbers needed to navigate it.

/// A page of records.
///
/// Pages are 1-indexed. `count_pages` is `ceil(count_records / page_size)`,
/// so an empty listing has zero pages and no next or previous page from
/// page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationResult<T> {
    pub records: Vec<T>,
    pub count_records: i64,
    pub page_size: i64,
    pub count_pages: i64,
    pub current_page: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl<T> PaginationResult<T> {
    /// Builds the page metadata around already fetched `records`.
    ///
    /// `page_size` must be at least 1; callers validate it first.
    pub fn build(records: Vec<T>, count_records: i64, page_size: i64, current_page: i64) -> Self {
        let page_size = page_size.max(1);
        let count_pages = (count_records.max(0) + page_size - 1) / page_size;

        Self {
            records,
            count_records,
            page_size,
            count_pages,
            current_page,
            has_next_page: current_page < count_pages,
            has_previous_page: current_page > 1,
        }
    }

    /// Converts the records, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginationResult<U> {
        PaginationResult {
            records: self.records.into_iter().map(f).collect(),
            count_records: self.count_records,
            page_size: self.page_size,
            count_pages: self.count_pages,
            current_page: self.current_page,
            has_next_page: self.has_next_page,
            has_previous_page: self.has_previous_page,
        }
    }
}
