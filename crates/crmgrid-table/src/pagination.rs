// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Zero-based page cursor over the visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_index: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// A zero page size is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Always at least one page, so an empty table still shows `1/1`.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Row indices of the current page, clipped to `total`.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = self.page_index.saturating_mul(self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }

    /// Pulls the cursor back onto the last page when rows disappear.
    pub fn clamp(&mut self, total: usize) -> bool {
        let last = self.page_count(total) - 1;
        if self.page_index > last {
            self.page_index = last;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self, total: usize) -> bool {
        if self.page_index + 1 < self.page_count(total) {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page_index > 0 {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }

    pub fn first_page(&mut self) -> bool {
        let moved = self.page_index != 0;
        self.page_index = 0;
        moved
    }

    /// Keeps the first row of the current page visible.
    pub fn set_page_size(&mut self, page_size: usize) {
        let first_row = self.page_index * self.page_size;
        self.page_size = page_size.max(1);
        self.page_index = first_row / self.page_size;
    }

    /// Moves to the page holding row `index`.
    pub fn show_row(&mut self, index: usize) {
        self.page_index = index / self.page_size;
    }
}
