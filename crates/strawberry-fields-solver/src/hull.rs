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

use crate::arena::{RectArena, RectId};
use crate::rect::Rectangle;
use strawberry_fields_model::prelude::{Bounds, Grid};

/// Shortcut for a cardinality bound of one: the bounding box over all
/// strawberries, skipping generation, matching and local search
/// entirely.
pub fn convex_hull(grid: &Grid, arena: &mut RectArena) -> RectId {
    let strawberries = grid.strawberries();
    assert!(!strawberries.is_empty(), "field has no strawberries");

    let mut top_row = usize::MAX;
    let mut top_col = usize::MAX;
    let mut bottom_row = 0usize;
    let mut bottom_col = 0usize;
    for &(row, col) in strawberries {
        top_row = top_row.min(row);
        top_col = top_col.min(col);
        bottom_row = bottom_row.max(row);
        bottom_col = bottom_col.max(col);
    }

    let bounds = Bounds::new(top_row, top_col, bottom_row, bottom_col);
    let hull = arena.alloc(Rectangle::from_grid(bounds, grid));
    arena.span(hull);
    hull
}
