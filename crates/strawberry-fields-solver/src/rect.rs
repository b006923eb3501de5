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

use fixedbitset::FixedBitSet;
use std::cell::OnceCell;
use std::cmp::Ordering;
use strawberry_fields_model::prelude::{Bounds, Grid};

/// The fixed per-rectangle surcharge: each greenhouse costs 10 plus its
/// area in cells.
pub const BASE_COST: i64 = 10;

/// An immutable greenhouse candidate: inclusive bounds plus cached area,
/// strawberry weight and weight-to-cost ratio.
///
/// The cell-membership bitset (the span) is built lazily by [`make_span`]
/// and never mutated afterwards. Set algebra on rectangles goes through
/// the span, not through bounds arithmetic.
///
/// [`make_span`]: Rectangle::make_span
#[derive(Debug, Clone)]
pub struct Rectangle {
    bounds: Bounds,
    area: usize,
    weight: usize,
    ratio: f64,
    span: OnceCell<FixedBitSet>,
}

impl Rectangle {
    /// Rectangle with its weight looked up on the grid.
    pub fn from_grid(bounds: Bounds, grid: &Grid) -> Self {
        let weight = grid.weight(bounds);
        Self::with_weight(bounds, weight)
    }

    /// Rectangle with an externally supplied weight. The generator uses
    /// this to avoid re-summing along a chain.
    pub fn with_weight(bounds: Bounds, weight: usize) -> Self {
        let area = bounds.area();
        assert!(area > 0, "rectangle must cover at least one cell");
        Self {
            bounds,
            area,
            weight,
            ratio: weight as f64 / (BASE_COST + area as i64) as f64,
            span: OnceCell::new(),
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.area
    }

    #[inline]
    pub fn weight(&self) -> usize {
        self.weight
    }

    #[inline]
    pub fn cost(&self) -> i64 {
        BASE_COST + self.area as i64
    }

    #[inline]
    pub fn weight_to_cost_ratio(&self) -> f64 {
        self.ratio
    }

    /// Ascending weight-to-cost comparison; the candidate list is sorted
    /// with this and consumed from the back.
    #[inline]
    pub fn ratio_cmp(&self, other: &Rectangle) -> Ordering {
        self.ratio.total_cmp(&other.ratio)
    }

    /// Materializes the cell-membership bitset for a `num_rows` x
    /// `num_cols` grid. Idempotent: the first call builds the bitset,
    /// later calls return the cached one unchanged.
    pub fn make_span(&self, num_rows: usize, num_cols: usize) -> &FixedBitSet {
        self.span.get_or_init(|| {
            let mut bits = FixedBitSet::with_capacity(num_rows * num_cols);
            for row in self.bounds.top_row()..=self.bounds.bottom_row() {
                for col in self.bounds.top_col()..=self.bounds.bottom_col() {
                    bits.insert(row * num_cols + col);
                }
            }
            bits
        })
    }

    /// The materialized span. Solver phases only reach a rectangle after
    /// its span has been built.
    #[inline]
    pub fn span(&self) -> &FixedBitSet {
        self.span.get().expect("span has not been materialized")
    }

    #[inline]
    pub fn intersects(&self, other: &Rectangle) -> bool {
        !self.span().is_disjoint(other.span())
    }

    #[inline]
    pub fn is_subset_of(&self, other: &Rectangle) -> bool {
        self.span().is_subset(other.span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_quantities() {
        let r = Rectangle::with_weight(Bounds::new(0, 0, 1, 2), 4);
        assert_eq!(r.area(), 6);
        assert_eq!(r.weight(), 4);
        assert_eq!(r.cost(), 16);
        assert!((r.weight_to_cost_ratio() - 4.0 / 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_make_span_sets_exactly_the_member_cells() {
        let r = Rectangle::with_weight(Bounds::new(1, 1, 2, 2), 0);
        let span = r.make_span(3, 4);
        let cells: Vec<usize> = span.ones().collect();
        assert_eq!(cells, vec![5, 6, 9, 10]);
        assert_eq!(span.len(), 12);
    }

    #[test]
    fn test_make_span_is_idempotent() {
        let r = Rectangle::with_weight(Bounds::new(0, 0, 0, 1), 1);
        let first: FixedBitSet = r.make_span(2, 2).clone();
        let second = r.make_span(2, 2);
        assert_eq!(&first, second);
    }

    #[test]
    fn test_span_algebra_drives_intersections() {
        let a = Rectangle::with_weight(Bounds::new(0, 0, 1, 1), 0);
        let b = Rectangle::with_weight(Bounds::new(1, 1, 2, 2), 0);
        let c = Rectangle::with_weight(Bounds::new(0, 0, 2, 2), 0);
        a.make_span(3, 3);
        b.make_span(3, 3);
        c.make_span(3, 3);
        assert!(a.intersects(&b));
        assert!(a.is_subset_of(&c));
        assert!(!b.is_subset_of(&a));

        let d = Rectangle::with_weight(Bounds::cell(2, 0), 0);
        d.make_span(3, 3);
        assert!(!a.intersects(&d));
    }

    #[test]
    fn test_ratio_ordering() {
        let sparse = Rectangle::with_weight(Bounds::new(0, 0, 0, 4), 1);
        let dense = Rectangle::with_weight(Bounds::cell(0, 0), 1);
        assert_eq!(sparse.ratio_cmp(&dense), Ordering::Less);
        assert_eq!(dense.ratio_cmp(&dense), Ordering::Equal);
    }
}
