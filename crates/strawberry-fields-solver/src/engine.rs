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
use crate::generate::generate_rectangles;
use crate::greedy::greedy_match;
use crate::hull::convex_hull;
use crate::label::label_cover;
use crate::search::local_search;
use fixedbitset::FixedBitSet;
use std::time::Instant;
use strawberry_fields_model::prelude::{Bounds, Grid, Puzzle};

/// Covering of one puzzle, detached from the solver's arena: the labeled
/// member rectangles plus the rendered field rows, ready for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    cardinality: usize,
    cost: i64,
    num_cols: usize,
    members: Vec<(char, Bounds)>,
    rows: Vec<String>,
}

impl Solution {
    #[inline]
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// Sum of `10 + area` over the cover.
    #[inline]
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Labeled members in descending weight-to-cost order.
    #[inline]
    pub fn members(&self) -> &[(char, Bounds)] {
        &self.members
    }

    /// Field rows with every cell carrying its covering label or `'.'`.
    #[inline]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// One output block: cardinality, cost, a `=` separator row and the
    /// labeled field, terminated by a blank line.
    pub fn render_block(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Cardinality:{}\n", self.cardinality));
        out.push_str(&format!("Cost:{}\n", self.cost));
        out.push_str(&"=".repeat(self.num_cols));
        out.push('\n');
        for row in &self.rows {
            out.push_str(row);
            out.push('\n');
        }
        out.push('\n');
        out
    }
}

/// The covering pipeline: rectangle generation, greedy disjoint
/// matching and local search over joins, or the convex-hull shortcut
/// when at most one greenhouse is allowed. One arena backs all
/// rectangles of a solve and is purged on the next one.
#[derive(Debug, Default)]
pub struct Solver {
    arena: RectArena,
}

impl Solver {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solve(&mut self, puzzle: &Puzzle) -> Solution {
        let grid = puzzle.grid();
        let start = Instant::now();
        self.arena.reset(grid.num_rows(), grid.num_cols());

        let mut cover = if puzzle.max_greenhouses() > 1 {
            let mut candidates = generate_rectangles(grid, &mut self.arena);
            tracing::debug!(
                candidates = candidates.len(),
                "rectangle generation complete"
            );
            let mut covering = FixedBitSet::with_capacity(grid.num_cells());
            let mut cover = greedy_match(grid, &self.arena, &mut candidates, &mut covering);
            tracing::debug!(members = cover.len(), "greedy matching complete");
            local_search(grid, &mut self.arena, &mut cover, puzzle.max_greenhouses());
            tracing::debug!(members = cover.len(), "local search complete");
            cover
        } else {
            vec![convex_hull(grid, &mut self.arena)]
        };

        let labels = label_cover(&self.arena, &mut cover);
        let solution = render(grid, &self.arena, &cover, &labels);
        tracing::info!(
            "optimized {}x{} field of {} strawberries in {:?}",
            grid.num_rows(),
            grid.num_cols(),
            grid.strawberries().len(),
            start.elapsed()
        );
        solution
    }
}

fn render(grid: &Grid, arena: &RectArena, cover: &[RectId], labels: &[char]) -> Solution {
    let num_cols = grid.num_cols();
    let mut field = vec![vec!['.'; num_cols]; grid.num_rows()];
    let mut cost = 0i64;
    let mut members = Vec::with_capacity(cover.len());

    for (&id, &label) in cover.iter().zip(labels) {
        cost += arena[id].cost();
        members.push((label, arena[id].bounds()));
        for pos in arena.span(id).ones() {
            field[pos / num_cols][pos % num_cols] = label;
        }
    }

    Solution {
        cardinality: cover.len(),
        cost,
        num_cols,
        members,
        rows: field.into_iter().map(String::from_iter).collect(),
    }
}
