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
use crate::shade::Shade;
use crate::slice::{classify, IntersectionKind, Slice};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use strawberry_fields_model::prelude::Grid;

/// Rectangular hull of two disjoint cover members, allocated with its
/// span materialized. The hull generally overlaps other cover members;
/// classifying that overlap is the local search's job.
pub fn join_rectangles(grid: &Grid, arena: &mut RectArena, r1: RectId, r2: RectId) -> RectId {
    debug_assert!(!arena[r1].intersects(&arena[r2]));

    let bounds = arena[r1].bounds().hull(&arena[r2].bounds());
    let join = arena.alloc(Rectangle::from_grid(bounds, grid));
    arena.span(join);
    join
}

/// Phase 3: repeatedly replaces the best pair of cover members with
/// their join.
///
/// Every unordered pair is scored as a [`Shade`]; pairs whose join would
/// split a third member (an `Increasing` slice) are discarded. The best
/// shade is applied while it either lowers the total cost or the cover
/// is still above the cardinality bound, each application shrinking the
/// cover by at least one member or the cost strictly.
pub fn local_search(
    grid: &Grid,
    arena: &mut RectArena,
    cover: &mut Vec<RectId>,
    max_greenhouses: usize,
) {
    while cover.len() >= 2 {
        debug_assert_cover_disjoint(arena, cover);

        let mut best: Option<Shade> = None;
        for i in 0..cover.len() {
            for j in i + 1..cover.len() {
                let Some(shade) = build_shade(grid, arena, cover, i, j) else {
                    continue;
                };
                if best
                    .as_ref()
                    .is_none_or(|b| shade.cmp_priority(b) == Ordering::Less)
                {
                    best = Some(shade);
                }
            }
        }

        // every pair's join split some third member
        let Some(best) = best else { break };

        if best.penalty() <= 0 || cover.len() > max_greenhouses {
            apply_shade(cover, &best);
        } else {
            break;
        }
    }
}

/// Builds the shade for the cover pair at positions `i < j`, or `None`
/// when the join would force a third member to split.
fn build_shade(
    grid: &Grid,
    arena: &mut RectArena,
    cover: &[RectId],
    i: usize,
    j: usize,
) -> Option<Shade> {
    let (r1, r2) = (cover[i], cover[j]);
    let join = join_rectangles(grid, arena, r1, r2);

    let mut slices: SmallVec<[Slice; 8]> = SmallVec::new();
    for (k, &r3) in cover.iter().enumerate() {
        if k == i || k == j {
            continue;
        }
        let slice = classify(arena, r3, join);
        match slice.kind() {
            IntersectionKind::Void => {}
            IntersectionKind::Increasing => return None,
            _ => slices.push(slice),
        }
    }

    let mut envelope: SmallVec<[RectId; 4]> = SmallVec::new();
    let mut penumbra: BTreeMap<RectId, RectId> = BTreeMap::new();
    for slice in slices {
        match slice.kind() {
            IntersectionKind::Decreasing => envelope.push(slice.rect()),
            IntersectionKind::NonIncreasing => {
                let bounds = slice
                    .residual()
                    .expect("non-increasing slice carries residual bounds");
                let residual = arena.alloc(Rectangle::from_grid(bounds, grid));
                arena.span(residual);
                penumbra.insert(slice.rect(), residual);
            }
            _ => unreachable!("void and increasing slices were filtered"),
        }
    }

    Some(Shade::new(arena, r1, r2, join, envelope, penumbra))
}

/// Removes the pair and the envelope, appends the join and shrinks
/// penumbra members in place.
fn apply_shade(cover: &mut Vec<RectId>, shade: &Shade) {
    cover.retain(|&id| id != shade.r1() && id != shade.r2() && !shade.envelope().contains(&id));
    cover.push(shade.join());
    for (&original, &residual) in shade.penumbra() {
        for slot in cover.iter_mut() {
            if *slot == original {
                *slot = residual;
            }
        }
    }
}

/// Pairwise-disjointness audit between iterations; active only in debug
/// builds.
fn debug_assert_cover_disjoint(arena: &RectArena, cover: &[RectId]) {
    if !cfg!(debug_assertions) {
        return;
    }
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
}
