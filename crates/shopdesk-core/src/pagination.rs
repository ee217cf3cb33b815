//! Paginated List Projection
//!
//! Pages are 1-based. `first_index..last_index` is the half-open range of
//! `items` currently visible.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice<'a, T> {
    pub visible: &'a [T],
    pub page: usize,
    pub total_pages: usize,
    pub first_index: usize,
    pub last_index: usize,
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    len.div_ceil(page_size).max(1)
}

/// Half-open index range shown on `page` of a `len`-item list
pub fn bounds(len: usize, page: usize, page_size: usize) -> (usize, usize) {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let first = (page - 1).saturating_mul(page_size).min(len);
    let last = page.saturating_mul(page_size).min(len);
    (first, last)
}

/// Visible slice of `items` for `page`. Out-of-range pages produce an empty
/// slice; clamping is the caller's job (see [`PageWindow`]).
pub fn project<T>(items: &[T], page: usize, page_size: usize) -> PageSlice<'_, T> {
    let page = page.max(1);
    let (first_index, last_index) = bounds(items.len(), page, page_size);

    PageSlice {
        visible: &items[first_index..last_index],
        page,
        total_pages: total_pages(items.len(), page_size),
        first_index,
        last_index,
    }
}

/// Current page + page size for one list view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: usize,
    per_page: usize,
}

impl PageWindow {
    pub const DEFAULT_PER_PAGE: usize = 10;

    pub fn new(per_page: usize) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Navigate to `page`, clamped into `1..=total_pages`.
    pub fn go_to(&mut self, page: usize, total_items: usize) {
        let last = total_pages(total_items, self.per_page);
        self.page = page.clamp(1, last);
    }

    pub fn next(&mut self, total_items: usize) {
        self.go_to(self.page + 1, total_items);
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// The filter predicate changed: start over at page 1.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Data refreshed underneath the window. A set that shrank past the
    /// current page goes back to page 1 rather than being clamped.
    pub fn refresh(&mut self, total_items: usize) {
        if self.page > total_pages(total_items, self.per_page) {
            self.reset();
        }
    }

    pub fn project<'a, T>(&self, items: &'a [T]) -> PageSlice<'a, T> {
        project(items, self.page, self.per_page)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PER_PAGE)
    }
}
