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

use crate::geom::Bounds;

/// A strawberry field: a row-major 0/1 cell matrix together with the
/// coordinates of every strawberry. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    num_rows: usize,
    num_cols: usize,
    cells: Vec<u8>,
    strawberries: Vec<(usize, usize)>,
}

impl Grid {
    /// Builds a grid from equally sized rows of 0/1 cells.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Self {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        debug_assert!(rows.iter().all(|r| r.len() == num_cols));

        let mut cells = Vec::with_capacity(num_rows * num_cols);
        let mut strawberries = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            for (j, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    strawberries.push((i, j));
                }
                cells.push(cell);
            }
        }
        Self {
            num_rows,
            num_cols,
            cells,
            strawberries,
        }
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.num_rows * self.num_cols
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.num_cols + col]
    }

    #[inline]
    pub fn strawberries(&self) -> &[(usize, usize)] {
        &self.strawberries
    }

    /// Number of strawberries inside the inclusive rectangle.
    ///
    /// Naive summation; the area is at most 2500 cells.
    pub fn weight(&self, bounds: Bounds) -> usize {
        let mut weight = 0usize;
        for row in bounds.top_row()..=bounds.bottom_row() {
            for col in bounds.top_col()..=bounds.bottom_col() {
                weight += usize::from(self.cells[row * self.num_cols + col]);
            }
        }
        weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(
            rows.iter()
                .map(|r| r.bytes().map(|b| u8::from(b == b'@')).collect())
                .collect(),
        )
    }

    #[test]
    fn test_from_rows_collects_strawberries_in_row_major_order() {
        let g = grid(&["@..", ".@@"]);
        assert_eq!(g.num_rows(), 2);
        assert_eq!(g.num_cols(), 3);
        assert_eq!(g.num_cells(), 6);
        assert_eq!(g.strawberries(), &[(0, 0), (1, 1), (1, 2)]);
        assert_eq!(g.cell(0, 0), 1);
        assert_eq!(g.cell(0, 1), 0);
    }

    #[test]
    fn test_weight_sums_inclusive_rectangle() {
        let g = grid(&["@.@", "...", "@.@"]);
        assert_eq!(g.weight(Bounds::new(0, 0, 2, 2)), 4);
        assert_eq!(g.weight(Bounds::new(0, 0, 0, 2)), 2);
        assert_eq!(g.weight(Bounds::new(1, 0, 1, 2)), 0);
        assert_eq!(g.weight(Bounds::cell(2, 2)), 1);
    }
}
