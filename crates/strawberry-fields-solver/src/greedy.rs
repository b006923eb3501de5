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
use strawberry_fields_model::prelude::Grid;

/// Phase 2: greedy disjoint set cover.
///
/// Consumes the candidate list from the back (highest ratio first),
/// skipping candidates that overlap the covering mask, until every
/// strawberry is matched. The returned cover is pairwise disjoint and
/// its union contains every strawberry.
pub fn greedy_match(
    grid: &Grid,
    arena: &RectArena,
    candidates: &mut Vec<RectId>,
    covering: &mut FixedBitSet,
) -> Vec<RectId> {
    debug_assert!(covering.is_clear());
    debug_assert_eq!(covering.len(), grid.num_cells());

    let mut unmatched = FixedBitSet::with_capacity(grid.num_cells());
    for &(row, col) in grid.strawberries() {
        unmatched.insert(row * grid.num_cols() + col);
    }

    let mut cover = Vec::new();
    while !unmatched.is_clear() {
        let id = next_disjoint_candidate(arena, candidates, covering);
        covering.union_with(arena.span(id));
        cover.push(id);
        unmatched.difference_with(covering);
    }
    candidates.clear();
    cover
}

/// Pops candidates until one does not intersect the covering mask,
/// materializing spans on the way.
///
/// The list cannot run dry while a strawberry is unmatched: the chain
/// generation emits every strawberry's singleton rectangle, and a
/// singleton only intersects the mask once its strawberry is covered.
fn next_disjoint_candidate(
    arena: &RectArena,
    candidates: &mut Vec<RectId>,
    covering: &FixedBitSet,
) -> RectId {
    while let Some(id) = candidates.pop() {
        let span = arena.span(id);
        if covering.is_disjoint(span) {
            return id;
        }
    }
    panic!("candidate list exhausted before every strawberry was covered");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::generate_rectangles;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(
            rows.iter()
                .map(|r| r.bytes().map(|b| u8::from(b == b'@')).collect())
                .collect(),
        )
    }

    fn run_greedy(g: &Grid) -> (RectArena, Vec<RectId>) {
        let mut arena = RectArena::new();
        arena.reset(g.num_rows(), g.num_cols());
        let mut candidates = generate_rectangles(g, &mut arena);
        let mut covering = FixedBitSet::with_capacity(g.num_cells());
        let cover = greedy_match(g, &arena, &mut candidates, &mut covering);
        (arena, cover)
    }

    fn assert_cover_invariants(g: &Grid, arena: &RectArena, cover: &[RectId]) {
        for (i, &a) in cover.iter().enumerate() {
            for &b in &cover[i + 1..] {
                assert!(
                    !arena[a].intersects(&arena[b]),
                    "cover members {} and {} overlap",
                    arena[a].bounds(),
                    arena[b].bounds()
                );
            }
        }
        for &(row, col) in g.strawberries() {
            assert!(
                cover
                    .iter()
                    .any(|&id| arena[id].bounds().contains_cell(row, col)),
                "strawberry ({row}, {col}) uncovered"
            );
        }
    }

    #[test]
    fn test_greedy_cover_is_disjoint_and_covers_all_strawberries() {
        let g = grid(&["@.@..", ".....", "@...@"]);
        let (arena, cover) = run_greedy(&g);
        assert_cover_invariants(&g, &arena, &cover);
    }

    #[test]
    fn test_highest_ratio_candidate_wins_first() {
        // the full row has the best weight-to-cost ratio (2/15 beats
        // every singleton's 1/11), so greedy covers the row in one piece
        let g = grid(&["@...@"]);
        let (arena, cover) = run_greedy(&g);
        assert_eq!(cover.len(), 1);
        assert_eq!(arena[cover[0]].area(), 5);
        assert_cover_invariants(&g, &arena, &cover);
    }

    #[test]
    fn test_distant_strawberries_stay_separate() {
        // singletons at ratio 1/11 beat any rectangle spanning both
        // strawberries (area >= 13 gives at most 2/23)
        let g = grid(&["@...........@"]);
        let (arena, cover) = run_greedy(&g);
        assert_eq!(cover.len(), 2);
        assert!(cover.iter().all(|&id| arena[id].area() == 1));
        assert_cover_invariants(&g, &arena, &cover);
    }

    #[test]
    fn test_dense_field_covered_by_single_rectangle() {
        let g = grid(&["@@@", "@@@"]);
        let (arena, cover) = run_greedy(&g);
        assert_eq!(cover.len(), 1);
        assert_eq!(arena[cover[0]].area(), 6);
        assert_eq!(arena[cover[0]].weight(), 6);
    }
}
