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

use crate::problem::grid::Grid;

/// One covering instance: a strawberry field together with the upper
/// bound on the number of greenhouses the covering may use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    max_greenhouses: usize,
    grid: Grid,
}

impl Puzzle {
    #[inline]
    pub fn new(max_greenhouses: usize, grid: Grid) -> Self {
        Self {
            max_greenhouses,
            grid,
        }
    }

    #[inline]
    pub fn max_greenhouses(&self) -> usize {
        self.max_greenhouses
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}
