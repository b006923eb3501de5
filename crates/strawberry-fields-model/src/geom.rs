// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

/// Inclusive axis-aligned cell bounds on a grid.
///
/// Both corners are part of the rectangle, so a single cell has
/// `top_row == bottom_row` and `top_col == bottom_col` and area 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    top_row: usize,
    top_col: usize,
    bottom_row: usize,
    bottom_col: usize,
}

impl Bounds {
    #[inline]
    pub fn new(top_row: usize, top_col: usize, bottom_row: usize, bottom_col: usize) -> Self {
        assert!(
            top_row <= bottom_row && top_col <= bottom_col,
            "bounds corners must be ordered: ({}, {})-({}, {})",
            top_row,
            top_col,
            bottom_row,
            bottom_col
        );
        Self {
            top_row,
            top_col,
            bottom_row,
            bottom_col,
        }
    }

    #[inline]
    pub fn cell(row: usize, col: usize) -> Self {
        Self::new(row, col, row, col)
    }

    #[inline]
    pub fn top_row(&self) -> usize {
        self.top_row
    }

    #[inline]
    pub fn top_col(&self) -> usize {
        self.top_col
    }

    #[inline]
    pub fn bottom_row(&self) -> usize {
        self.bottom_row
    }

    #[inline]
    pub fn bottom_col(&self) -> usize {
        self.bottom_col
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.bottom_row - self.top_row + 1
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.bottom_col - self.top_col + 1
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.num_rows() * self.num_cols()
    }

    #[inline]
    pub fn contains_cell(&self, row: usize, col: usize) -> bool {
        self.top_row <= row && row <= self.bottom_row && self.top_col <= col && col <= self.bottom_col
    }

    /// Smallest bounds containing both `self` and `other`.
    #[inline]
    pub fn hull(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.top_row.min(other.top_row),
            self.top_col.min(other.top_col),
            self.bottom_row.max(other.bottom_row),
            self.bottom_col.max(other.bottom_col),
        )
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {})-({}, {})",
            self.top_row, self.top_col, self.bottom_row, self.bottom_col
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_counts_inclusive_cells() {
        assert_eq!(Bounds::cell(3, 4).area(), 1);
        assert_eq!(Bounds::new(0, 0, 2, 2).area(), 9);
        assert_eq!(Bounds::new(1, 0, 1, 4).area(), 5);
    }

    #[test]
    fn test_hull_spans_both_rectangles() {
        let a = Bounds::cell(0, 0);
        let b = Bounds::cell(2, 4);
        let h = a.hull(&b);
        assert_eq!(h, Bounds::new(0, 0, 2, 4));
        assert_eq!(h, b.hull(&a));
        assert!(h.contains_cell(1, 2));
    }

    #[test]
    fn test_contains_cell_checks_both_axes() {
        let b = Bounds::new(1, 1, 2, 3);
        assert!(b.contains_cell(1, 1));
        assert!(b.contains_cell(2, 3));
        assert!(!b.contains_cell(0, 2));
        assert!(!b.contains_cell(1, 4));
    }

    #[test]
    #[should_panic]
    fn test_unordered_corners_are_rejected() {
        let _ = Bounds::new(2, 0, 1, 0);
    }
}
