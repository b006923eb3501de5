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

use crate::rect::Rectangle;
use fixedbitset::FixedBitSet;
use std::ops::Index;

/// Handle to a rectangle in a [`RectArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RectId(u32);

impl RectId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for RectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rect#{}", self.0)
    }
}

/// Bulk allocator for every rectangle of one solve.
///
/// Rectangles are never freed individually; the arena is purged between
/// puzzles. The arena also carries the grid dimensions so that spans can
/// be materialized without threading them through every call site.
#[derive(Debug, Clone, Default)]
pub struct RectArena {
    num_rows: usize,
    num_cols: usize,
    slots: Vec<Rectangle>,
}

impl RectArena {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every rectangle and re-dimensions the arena for the next
    /// puzzle.
    pub fn reset(&mut self, num_rows: usize, num_cols: usize) {
        self.purge();
        self.num_rows = num_rows;
        self.num_cols = num_cols;
    }

    /// Drops every rectangle allocated so far.
    #[inline]
    pub fn purge(&mut self) {
        self.slots.clear();
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
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    pub fn alloc(&mut self, rect: Rectangle) -> RectId {
        assert!(self.slots.len() < u32::MAX as usize);
        let id = RectId(self.slots.len() as u32);
        self.slots.push(rect);
        id
    }

    #[inline]
    pub fn get(&self, id: RectId) -> &Rectangle {
        &self.slots[id.index()]
    }

    /// The rectangle's span, materialized on first use against this
    /// arena's grid dimensions.
    #[inline]
    pub fn span(&self, id: RectId) -> &FixedBitSet {
        self.slots[id.index()].make_span(self.num_rows, self.num_cols)
    }
}

impl Index<RectId> for RectArena {
    type Output = Rectangle;

    #[inline]
    fn index(&self, id: RectId) -> &Rectangle {
        &self.slots[id.index()]
    }
}
