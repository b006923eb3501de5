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
use fixedbitset::FixedBitSet;
use strawberry_fields_model::geom::Bounds;

/// Effect that replacing a pair with its join would have on a third
/// cover rectangle, ordered from harmless to forbidden.
///
/// `Void`: the join misses the rectangle entirely. `Decreasing`: the
/// rectangle lies inside the join and can be dropped. `NonIncreasing`:
/// the part outside the join is itself a rectangle, so the member can
/// shrink in place. `Increasing`: the leftover is not rectangular and
/// would have to split, growing the cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(i8)]
pub enum IntersectionKind {
    Void = -2,
    Decreasing = -1,
    NonIncreasing = 0,
    Increasing = 1,
}

/// Classification of one cover rectangle against a join hull. The
/// residual bounds are present exactly for `NonIncreasing` slices.
#[derive(Debug, Clone, Copy)]
pub struct Slice {
    rect: RectId,
    kind: IntersectionKind,
    residual: Option<Bounds>,
}

impl Slice {
    #[inline]
    pub fn rect(&self) -> RectId {
        self.rect
    }

    #[inline]
    pub fn kind(&self) -> IntersectionKind {
        self.kind
    }

    #[inline]
    pub fn residual(&self) -> Option<Bounds> {
        self.residual
    }
}

/// Classifies `rect` against `join` on the spans' common bit basis.
///
/// For the non-trivial case the leftover `rect \ join` is scanned once;
/// the top-left candidate corner comes from the first bit, the
/// bottom-right one from the last bit visited, and the leftover is
/// rectangular iff those corners are the row/column extrema and the
/// bounding box carries no holes.
pub fn classify(arena: &RectArena, rect: RectId, join: RectId) -> Slice {
    let rect_span = arena.span(rect);
    let join_span = arena.span(join);

    if rect_span.is_disjoint(join_span) {
        return Slice {
            rect,
            kind: IntersectionKind::Void,
            residual: None,
        };
    }
    if rect_span.is_subset(join_span) {
        return Slice {
            rect,
            kind: IntersectionKind::Decreasing,
            residual: None,
        };
    }

    let mut left_over = rect_span.clone();
    left_over.difference_with(join_span);
    debug_assert!(!left_over.is_clear());

    let num_cols = arena.num_cols();
    let mut min_row = usize::MAX;
    let mut max_row = 0usize;
    let mut min_col = usize::MAX;
    let mut max_col = 0usize;
    let mut first = usize::MAX;
    let mut last = 0usize;

    for pos in left_over.ones() {
        let col = pos % num_cols;
        let row = pos / num_cols;
        min_row = min_row.min(row);
        max_row = max_row.max(row);
        min_col = min_col.min(col);
        max_col = max_col.max(col);
        if first == usize::MAX {
            first = pos;
        }
        last = pos;
    }

    let top_row = first / num_cols;
    let top_col = first % num_cols;
    let bottom_row = last / num_cols;
    let bottom_col = last % num_cols;

    let mut test = FixedBitSet::with_capacity(left_over.len());
    for row in top_row..=bottom_row {
        for col in top_col..=bottom_col {
            test.insert(row * num_cols + col);
        }
    }

    let corners_are_minima = top_row == min_row && top_col == min_col;
    let corners_are_maxima = bottom_row == max_row && bottom_col == max_col;
    let no_holes = test == left_over;

    if corners_are_minima && corners_are_maxima && no_holes {
        Slice {
            rect,
            kind: IntersectionKind::NonIncreasing,
            residual: Some(Bounds::new(top_row, top_col, bottom_row, bottom_col)),
        }
    } else {
        Slice {
            rect,
            kind: IntersectionKind::Increasing,
            residual: None,
        }
    }
}
