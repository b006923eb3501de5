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

use crate::problem::{err::PuzzleLoaderError, grid::Grid, puzzle::Puzzle};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Parses the puzzle text format: a cardinality line (first character a
/// decimal digit), one or more equally long field rows of `.`/`@`, and a
/// blank-line terminator. A trailing puzzle without a terminator is still
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleLoader {
    max_dimension: usize,
}

impl Default for PuzzleLoader {
    fn default() -> Self {
        Self { max_dimension: 50 }
    }
}

impl PuzzleLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn max_dimension(mut self, v: usize) -> Self {
        self.max_dimension = v;
        self
    }

    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Puzzle>, PuzzleLoaderError> {
        self.from_bufread(BufReader::new(File::open(path)?))
    }

    pub fn from_bufread<R: BufRead>(&self, br: R) -> Result<Vec<Puzzle>, PuzzleLoaderError> {
        let mut puzzles = Vec::new();

        // (bound, line number of the cardinality line)
        let mut bound: Option<(usize, usize)> = None;
        let mut rows: Vec<Vec<u8>> = Vec::new();
        let mut first_field_line = 0usize;

        for (idx, line) in br.lines().enumerate() {
            let line_no = idx + 1;
            let mut line = line?;
            if line.ends_with('\r') {
                line.pop();
            }

            if line.is_empty() {
                if !rows.is_empty() {
                    puzzles.push(self.finish_puzzle(
                        bound.take(),
                        std::mem::take(&mut rows),
                        first_field_line,
                    )?);
                } else if let Some((_, k_line)) = bound {
                    return Err(PuzzleLoaderError::EmptyPuzzle { line: k_line });
                }
                continue;
            }

            if rows.is_empty() && line.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                if let Some((_, k_line)) = bound {
                    // two cardinality lines in a row
                    return Err(PuzzleLoaderError::EmptyPuzzle { line: k_line });
                }
                let digits: String = line.chars().take_while(char::is_ascii_digit).collect();
                let k = digits
                    .parse::<usize>()
                    .map_err(|_| PuzzleLoaderError::InvalidBound { line: line_no })?;
                bound = Some((k, line_no));
                continue;
            }

            if bound.is_none() {
                return Err(PuzzleLoaderError::MissingBound { line: line_no });
            }

            if rows.is_empty() {
                first_field_line = line_no;
            }
            rows.push(self.parse_field_row(&line, line_no, rows.first().map(Vec::len))?);
            if rows.len() > self.max_dimension {
                return Err(PuzzleLoaderError::FieldTooLarge {
                    line: line_no,
                    limit: self.max_dimension,
                });
            }
        }

        // trailing puzzle without a blank-line terminator
        if !rows.is_empty() {
            puzzles.push(self.finish_puzzle(bound.take(), rows, first_field_line)?);
        } else if let Some((_, k_line)) = bound {
            return Err(PuzzleLoaderError::EmptyPuzzle { line: k_line });
        }

        Ok(puzzles)
    }

    fn parse_field_row(
        &self,
        line: &str,
        line_no: usize,
        expected: Option<usize>,
    ) -> Result<Vec<u8>, PuzzleLoaderError> {
        let mut row = Vec::with_capacity(line.len());
        for (i, c) in line.chars().enumerate() {
            match c {
                '.' => row.push(0),
                '@' => row.push(1),
                _ => {
                    return Err(PuzzleLoaderError::UnknownCell {
                        line: line_no,
                        column: i + 1,
                        cell: c,
                    });
                }
            }
        }
        if let Some(expected) = expected {
            if row.len() != expected {
                return Err(PuzzleLoaderError::RaggedRow {
                    line: line_no,
                    expected,
                    got: row.len(),
                });
            }
        } else if row.len() > self.max_dimension {
            return Err(PuzzleLoaderError::FieldTooLarge {
                line: line_no,
                limit: self.max_dimension,
            });
        }
        Ok(row)
    }

    fn finish_puzzle(
        &self,
        bound: Option<(usize, usize)>,
        rows: Vec<Vec<u8>>,
        first_field_line: usize,
    ) -> Result<Puzzle, PuzzleLoaderError> {
        // rows can only accumulate after a cardinality line was seen
        let (k, _) = bound.expect("field rows without a cardinality line");
        let grid = Grid::from_rows(rows);
        if grid.strawberries().is_empty() {
            return Err(PuzzleLoaderError::BarrenField {
                line: first_field_line,
            });
        }
        Ok(Puzzle::new(k, grid))
    }
}
