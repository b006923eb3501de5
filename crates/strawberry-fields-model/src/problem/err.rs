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

#[derive(Debug)]
pub enum PuzzleLoaderError {
    Io(std::io::Error),
    /// A field line appeared before any cardinality line.
    MissingBound { line: usize },
    /// A field line whose length differs from the first row of its puzzle.
    RaggedRow {
        line: usize,
        expected: usize,
        got: usize,
    },
    /// A field character other than `.` or `@`.
    UnknownCell { line: usize, column: usize, cell: char },
    /// A cardinality line whose leading digit run does not parse.
    InvalidBound { line: usize },
    /// A cardinality line followed by no field lines.
    EmptyPuzzle { line: usize },
    /// A field containing no strawberries at all.
    BarrenField { line: usize },
    /// A field exceeding the loader's dimension limit.
    FieldTooLarge { line: usize, limit: usize },
}

impl From<std::io::Error> for PuzzleLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl std::fmt::Display for PuzzleLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use PuzzleLoaderError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            MissingBound { line } => {
                write!(f, "line {line}: field row before any cardinality line")
            }
            RaggedRow {
                line,
                expected,
                got,
            } => write!(
                f,
                "line {line}: ragged field row (expected {expected} columns, got {got})"
            ),
            UnknownCell { line, column, cell } => write!(
                f,
                "line {line}, column {column}: unrecognized cell character {cell:?}"
            ),
            InvalidBound { line } => {
                write!(f, "line {line}: cardinality bound does not parse")
            }
            EmptyPuzzle { line } => {
                write!(f, "line {line}: cardinality line without field rows")
            }
            BarrenField { line } => {
                write!(f, "line {line}: field contains no strawberries")
            }
            FieldTooLarge { line, limit } => {
                write!(f, "line {line}: field exceeds the {limit}x{limit} limit")
            }
        }
    }
}

impl std::error::Error for PuzzleLoaderError {}
