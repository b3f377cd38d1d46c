//! Client-side pagination of the order history.

use std::ops::Range;

/// Default order history page size.
pub const ORDERS_PER_PAGE: usize = 20;

/// Entry in the page-number control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page { number: usize, current: bool },
    Ellipsis,
}

/// Page position over a list of `total` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    total: usize,
    per_page: usize,
    current: usize,
}

impl Paginator {
    /// Start on page 1. A zero page size is treated as 1.
    #[must_use]
    pub fn new(total: usize, per_page: usize) -> Self {
        Self {
            total,
            per_page: per_page.max(1),
            current: 1,
        }
    }

    /// Number of entries being paginated.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub const fn per_page(&self) -> usize {
        self.per_page
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// `ceil(total / per_page)`; zero when there are no entries.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total.div_ceil(self.per_page)
    }

    /// Replace the entry count and go back to page 1.
    pub fn reset(&mut self, total: usize) {
        self.total = total;
        self.current = 1;
    }

    /// Move to `page`, clamped to `[1, max(total_pages, 1)]`.
    pub fn go_to(&mut self, page: i64) {
        let last = i64::try_from(self.total_pages().max(1)).unwrap_or(i64::MAX);
        let page = page.clamp(1, last);
        self.current = usize::try_from(page).unwrap_or(1);
    }

    pub fn previous(&mut self) {
        if self.has_previous() {
            self.current -= 1;
        }
    }

    pub fn next(&mut self) {
        if self.has_next() {
            self.current += 1;
        }
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current < self.total_pages()
    }

    /// Whether the page-number control is shown at all.
    #[must_use]
    pub const fn show_controls(&self) -> bool {
        self.total_pages() > 1
    }

    /// Index range of the current page within the full list.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        let start = (self.current - 1) * self.per_page;
        let end = (start + self.per_page).min(self.total);
        start.min(end)..end
    }

    /// Entries of the current page.
    #[must_use]
    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        items.get(range.start.min(end)..end).unwrap_or_default()
    }

    /// "Showing 21–40 of 45". Shown for any non-empty list, even a single page.
    #[must_use]
    pub fn range_label(&self) -> Option<String> {
        if self.total == 0 {
            return None;
        }
        let range = self.range();
        Some(format!(
            "Showing {}–{} of {}",
            range.start + 1,
            range.end,
            self.total
        ))
    }

    /// Page numbers next to the current one, plus the first and last page,
    /// with an ellipsis over each gap.
    #[must_use]
    pub fn window(&self) -> Vec<PageLink> {
        let last = self.total_pages();
        let mut links = Vec::new();
        let mut previous: Option<usize> = None;

        for number in 1..=last {
            let shown = number == 1 || number == last || number.abs_diff(self.current) <= 1;
            if !shown {
                continue;
            }
            if previous.is_some_and(|p| number - p > 1) {
                links.push(PageLink::Ellipsis);
            }
            links.push(PageLink::Page {
                number,
                current: number == self.current,
            });
            previous = Some(number);
        }
        links
    }
}
