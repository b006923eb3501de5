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
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A candidate local-search move: replace `r1` and `r2` with their join,
/// drop every envelope member (contained in the join) and shrink every
/// penumbra member to its residual.
///
/// The penalty is the cost delta of applying the move; negative means
/// the move pays for itself. Between equal penalties the shade with the
/// smaller envelope wins, leaving more pairs available to later
/// iterations.
#[derive(Debug, Clone)]
pub struct Shade {
    r1: RectId,
    r2: RectId,
    join: RectId,
    envelope: SmallVec<[RectId; 4]>,
    penumbra: BTreeMap<RectId, RectId>,
    penalty: i64,
}

impl Shade {
    pub fn new(
        arena: &RectArena,
        r1: RectId,
        r2: RectId,
        join: RectId,
        envelope: SmallVec<[RectId; 4]>,
        penumbra: BTreeMap<RectId, RectId>,
    ) -> Self {
        let envelope_cost: i64 = envelope.iter().map(|&e| arena[e].cost()).sum();
        let penumbra_cost: i64 = penumbra
            .iter()
            .map(|(&original, &residual)| arena[original].area() as i64 - arena[residual].area() as i64)
            .sum();
        let penalty = arena[join].cost()
            - (arena[r1].cost() + arena[r2].cost() + envelope_cost + penumbra_cost);
        Self {
            r1,
            r2,
            join,
            envelope,
            penumbra,
            penalty,
        }
    }

    #[inline]
    pub fn r1(&self) -> RectId {
        self.r1
    }

    #[inline]
    pub fn r2(&self) -> RectId {
        self.r2
    }

    #[inline]
    pub fn join(&self) -> RectId {
        self.join
    }

    #[inline]
    pub fn envelope(&self) -> &[RectId] {
        &self.envelope
    }

    #[inline]
    pub fn penumbra(&self) -> &BTreeMap<RectId, RectId> {
        &self.penumbra
    }

    #[inline]
    pub fn penalty(&self) -> i64 {
        self.penalty
    }

    /// Ascending by penalty, then by envelope size.
    #[inline]
    pub fn cmp_priority(&self, other: &Shade) -> Ordering {
        self.penalty
            .cmp(&other.penalty)
            .then_with(|| self.envelope.len().cmp(&other.envelope.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::Rectangle;
    use smallvec::smallvec;
    use strawberry_fields_model::geom::Bounds;

    fn alloc(arena: &mut RectArena, bounds: Bounds, weight: usize) -> RectId {
        arena.alloc(Rectangle::with_weight(bounds, weight))
    }

    #[test]
    fn test_penalty_without_envelope_or_penumbra() {
        let mut arena = RectArena::new();
        arena.reset(1, 5);
        let r1 = alloc(&mut arena, Bounds::cell(0, 0), 1);
        let r2 = alloc(&mut arena, Bounds::cell(0, 4), 1);
        let join = alloc(&mut arena, Bounds::new(0, 0, 0, 4), 2);

        let shade = Shade::new(&arena, r1, r2, join, smallvec![], BTreeMap::new());
        // join costs 15, the singletons 11 each
        assert_eq!(shade.penalty(), 15 - 22);
    }

    #[test]
    fn test_penalty_counts_envelope_costs() {
        let mut arena = RectArena::new();
        arena.reset(1, 5);
        let r1 = alloc(&mut arena, Bounds::cell(0, 0), 1);
        let r2 = alloc(&mut arena, Bounds::cell(0, 4), 1);
        let inner = alloc(&mut arena, Bounds::cell(0, 2), 1);
        let join = alloc(&mut arena, Bounds::new(0, 0, 0, 4), 3);

        let shade = Shade::new(&arena, r1, r2, join, smallvec![inner], BTreeMap::new());
        assert_eq!(shade.penalty(), 15 - (11 + 11 + 11));
    }

    #[test]
    fn test_penalty_counts_penumbra_shrinkage() {
        let mut arena = RectArena::new();
        arena.reset(3, 4);
        let r1 = alloc(&mut arena, Bounds::cell(0, 0), 1);
        let r2 = alloc(&mut arena, Bounds::cell(2, 1), 1);
        let join = alloc(&mut arena, Bounds::new(0, 0, 2, 1), 2);
        let original = alloc(&mut arena, Bounds::new(1, 1, 1, 3), 1);
        let residual = alloc(&mut arena, Bounds::new(1, 2, 1, 3), 1);

        let mut penumbra = BTreeMap::new();
        penumbra.insert(original, residual);
        let shade = Shade::new(&arena, r1, r2, join, smallvec![], penumbra);
        // join 16, pair 22, penumbra shrinks by one cell
        assert_eq!(shade.penalty(), 16 - (11 + 11 + 1));
    }

    #[test]
    fn test_priority_prefers_lower_penalty_then_smaller_envelope() {
        let mut arena = RectArena::new();
        arena.reset(4, 9);
        let a = alloc(&mut arena, Bounds::cell(0, 0), 1);
        let b = alloc(&mut arena, Bounds::cell(0, 4), 1);
        let c = alloc(&mut arena, Bounds::cell(0, 2), 1);
        // both shades land on penalty -7; the envelope-free one wins
        let join_ab = alloc(&mut arena, Bounds::new(0, 0, 0, 4), 3);
        let join_ac = alloc(&mut arena, Bounds::new(0, 0, 3, 3), 3);

        let plain = Shade::new(&arena, a, b, join_ab, smallvec![], BTreeMap::new());
        let enveloped = Shade::new(&arena, a, c, join_ac, smallvec![b], BTreeMap::new());
        assert_eq!(plain.penalty(), enveloped.penalty());
        assert_eq!(plain.cmp_priority(&enveloped), Ordering::Less);

        let better = Shade::new(&arena, a, b, join_ab, smallvec![c], BTreeMap::new());
        assert_eq!(better.cmp_priority(&plain), Ordering::Less);
    }
}
