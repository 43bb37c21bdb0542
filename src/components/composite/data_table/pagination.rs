//! Pagination
//!
//! Page window arithmetic for the DataTable and the headless footer model.

use std::fmt;
use std::ops::Range;

/// Current page of a table, owned by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageWindow {
    /// 0-based page index
    pub page_index: usize,
    /// Rows per page; 0 is treated as 1
    pub page_size: usize,
}

impl PageWindow {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    /// First page with the given size
    pub fn first(page_size: usize) -> Self {
        Self::new(0, page_size)
    }

    /// Page size after clamping
    pub fn effective_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Number of pages for `total` rows, at least 1
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.effective_size()).max(1)
    }

    /// Window with the page index clamped into the available pages
    pub fn clamp(&self, total: usize) -> Self {
        Self {
            page_index: self.page_index.min(self.total_pages(total) - 1),
            page_size: self.effective_size(),
        }
    }

    /// Row range of the clamped page within `total` rows
    pub fn range(&self, total: usize) -> Range<usize> {
        let window = self.clamp(total);
        let start = (window.page_index * window.page_size).min(total);
        let end = (start + window.page_size).min(total);
        start..end
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::first(crate::constants::DEFAULT_PAGE_SIZE)
    }
}

/// Pagination settings handed to the DataTable
pub struct PaginationConfig {
    pub window: PageWindow,
    on_total_change: Option<Box<dyn Fn(usize) + Send + Sync>>,
}

impl PaginationConfig {
    pub fn new(window: PageWindow) -> Self {
        Self {
            window,
            on_total_change: None,
        }
    }

    /// Called with the filtered row count whenever it changes
    pub fn on_total_change(mut self, handler: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_total_change = Some(Box::new(handler));
        self
    }

    pub(crate) fn notify_total(&self, total: usize) {
        if let Some(handler) = &self.on_total_change {
            handler(total);
        }
    }
}

impl fmt::Debug for PaginationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginationConfig")
            .field("window", &self.window)
            .field("on_total_change", &self.on_total_change.is_some())
            .finish()
    }
}

/// Footer summary: "1 - 10 of 42" and previous/next navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    window: PageWindow,
    total_items: usize,
    items_label: String,
}

impl Pagination {
    /// Create a footer model; the window is clamped against `total_items`
    pub fn new(window: PageWindow, total_items: usize) -> Self {
        Self {
            window: window.clamp(total_items),
            total_items,
            items_label: "items".to_string(),
        }
    }

    /// Set the items label
    pub fn items_label(mut self, label: impl Into<String>) -> Self {
        self.items_label = label.into();
        self
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// 1-based current page
    pub fn current_page(&self) -> usize {
        self.window.page_index + 1
    }

    pub fn total_pages(&self) -> usize {
        self.window.total_pages(self.total_items)
    }

    /// 1-based inclusive row range shown, `(0, 0)` when there are no rows
    pub fn range(&self) -> (usize, usize) {
        let range = self.window.range(self.total_items);
        if range.is_empty() {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        }
    }

    pub fn can_prev(&self) -> bool {
        self.window.page_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.current_page() < self.total_pages()
    }

    /// Page index after "previous", staying on the first page
    pub fn prev_page_index(&self) -> usize {
        self.window.page_index.saturating_sub(1)
    }

    /// Page index after "next", staying on the last page
    pub fn next_page_index(&self) -> usize {
        (self.window.page_index + 1).min(self.total_pages() - 1)
    }

    /// Range label, e.g. "11 - 20 of 42"
    pub fn label(&self) -> String {
        let (first, last) = self.range();
        format!("{first} - {last} of {}", self.total_items)
    }

    /// Count label, e.g. "42 users"
    pub fn count_label(&self) -> String {
        format!("{} {}", self.total_items, self.items_label)
    }
}

impl fmt::Display for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  page {} / {}",
            self.label(),
            self.current_page(),
            self.total_pages()
        )
    }
}
