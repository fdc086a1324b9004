//! Cursor-centred pagination for lists taller than the screen.

use std::ops::Range;

/// Rows of a list that fit on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl Window {
    /// Compute the visible slice of a `total`-row list with `rows` available.
    ///
    /// A list that fits is shown whole. Otherwise the window is centred on
    /// `cursor` and shifted back so it never runs past the end.
    pub fn compute(cursor: usize, total: usize, rows: usize) -> Self {
        if total <= rows {
            return Self {
                start: 0,
                end: total,
                total,
            };
        }

        let mut start = cursor.saturating_sub(rows / 2);
        let mut end = start + rows;
        if end > total {
            end = total;
            start = end.saturating_sub(rows);
        }

        Self { start, end, total }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn more_above(&self) -> bool {
        self.start > 0
    }

    pub fn more_below(&self) -> bool {
        self.end < self.total
    }
}

/// Row budget left after `reserved` lines of chrome, never below `floor`.
pub fn available_rows(height: u16, reserved: u16, floor: usize) -> usize {
    (height.saturating_sub(reserved) as usize).max(floor)
}
