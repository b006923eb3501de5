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

/// Upper bound on the number of rectangles an `m` x `n` field can
/// contribute after chain pruning; used to pre-size the candidate list.
#[inline]
fn max_rectangle_count(m: usize, n: usize) -> usize {
    ((m * n + 1) * (m * n) / 2).saturating_sub(m * (m - 1) * n * (n - 1) / 4)
}

/// Phase 1: enumerates the rectangle poset along `(row, col, right)`
/// chains, keeping only rectangles whose weight strictly exceeds the
/// previous emission on the same chain. The survivors are returned
/// sorted ascending by weight-to-cost ratio; spans are not materialized
/// here.
pub fn generate_rectangles(grid: &Grid, arena: &mut RectArena) -> Vec<RectId> {
    let m = grid.num_rows();
    let n = grid.num_cols();

    let mut candidates = Vec::new();
    arena.reserve(max_rectangle_count(m, n));

    for row in 0..m {
        for col in 0..n {
            for right in col..n {
                let mut weight = 0usize;
                for down in row..m {
                    let bounds = Bounds::new(row, col, down, right);
                    let w = grid.weight(bounds);
                    if w > weight {
                        candidates.push(arena.alloc(Rectangle::with_weight(bounds, w)));
                        weight = w;
                    }
                }
            }
        }
    }

    candidates.sort_by(|&a, &b| arena[a].ratio_cmp(&arena[b]));
    candidates
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
    fn test_every_strawberry_appears_as_a_singleton_candidate() {
        let g = grid(&["@.@", ".@.", "@.@"]);
        let mut arena = RectArena::new();
        arena.reset(3, 3);
        let candidates = generate_rectangles(&g, &mut arena);

        for &(row, col) in g.strawberries() {
            assert!(
                candidates
                    .iter()
                    .any(|&id| arena[id].bounds() == Bounds::cell(row, col)),
                "no singleton candidate for ({row}, {col})"
            );
        }
    }

    #[test]
    fn test_chain_weights_are_strictly_increasing() {
        let g = grid(&["@..@", "....", "@@.."]);
        let mut arena = RectArena::new();
        arena.reset(3, 4);
        let candidates = generate_rectangles(&g, &mut arena);

        // group by (top_row, top_col, bottom_col) and check monotonicity
        // along growing bottom_row
        for &a in &candidates {
            for &b in &candidates {
                let (ra, rb) = (&arena[a], &arena[b]);
                let (ba, bb) = (ra.bounds(), rb.bounds());
                if ba.top_row() == bb.top_row()
                    && ba.top_col() == bb.top_col()
                    && ba.bottom_col() == bb.bottom_col()
                    && ba.bottom_row() < bb.bottom_row()
                {
                    assert!(
                        ra.weight() < rb.weight(),
                        "chain weight not strictly increasing: {} vs {}",
                        ba,
                        bb
                    );
                }
            }
        }
    }

    #[test]
    fn test_zero_weight_rectangles_are_pruned() {
        let g = grid(&["@..", "...", "..@"]);
        let mut arena = RectArena::new();
        arena.reset(3, 3);
        let candidates = generate_rectangles(&g, &mut arena);
        assert!(candidates.iter().all(|&id| arena[id].weight() > 0));
    }

    #[test]
    fn test_candidates_sorted_ascending_by_ratio() {
        let g = grid(&["@...@", ".@...", "....."]);
        let mut arena = RectArena::new();
        arena.reset(3, 5);
        let candidates = generate_rectangles(&g, &mut arena);
        for pair in candidates.windows(2) {
            let (a, b) = (&arena[pair[0]], &arena[pair[1]]);
            assert!(a.weight_to_cost_ratio() <= b.weight_to_cost_ratio());
        }
    }

    #[test]
    fn test_single_cell_grid_yields_one_candidate() {
        let g = grid(&["@"]);
        let mut arena = RectArena::new();
        arena.reset(1, 1);
        let candidates = generate_rectangles(&g, &mut arena);
        assert_eq!(candidates.len(), 1);
        assert_eq!(arena[candidates[0]].bounds(), Bounds::cell(0, 0));
        assert_eq!(arena[candidates[0]].weight(), 1);
    }
}
