//! Page slicing for result lists.

/// One page of a larger list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page number
    pub number: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slice `items` into pages of `per_page` and return page `page` (1-based).
///
/// Out-of-range page numbers are clamped to the first or last page.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let number = page.clamp(1, total_pages.max(1));

    let start = (number - 1) * per_page;
    let end = (start + per_page).min(items.len());

    Page {
        items: &items[start.min(items.len())..end],
        number,
        total_pages,
    }
}
