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

use std::io::Cursor;
use strawberry_fields_model::prelude::{Puzzle, PuzzleLoader};
use strawberry_fields_solver::prelude::{Solution, Solver};

fn solve_stream(input: &str) -> (Vec<Solution>, String) {
    let puzzles = PuzzleLoader::new()
        .from_bufread(Cursor::new(input))
        .expect("input parses");
    let mut solver = Solver::new();
    let mut output = String::new();
    let mut solutions = Vec::new();
    let mut total_cost = 0i64;
    for puzzle in &puzzles {
        let solution = solver.solve(puzzle);
        total_cost += solution.cost();
        output.push_str(&solution.render_block());
        solutions.push(solution);
    }
    output.push_str(&format!("Total Cost: {total_cost}\n"));
    (solutions, output)
}

fn assert_solution_invariants(puzzle: &Puzzle, solution: &Solution) {
    // pairwise disjoint members
    for (i, &(_, a)) in solution.members().iter().enumerate() {
        for &(_, b) in &solution.members()[i + 1..] {
            let row_overlap = a.top_row() <= b.bottom_row() && b.top_row() <= a.bottom_row();
            let col_overlap = a.top_col() <= b.bottom_col() && b.top_col() <= a.bottom_col();
            assert!(!(row_overlap && col_overlap), "members {a} and {b} overlap");
        }
    }
    // every strawberry covered
    for &(row, col) in puzzle.grid().strawberries() {
        assert!(
            solution
                .members()
                .iter()
                .any(|&(_, b)| b.contains_cell(row, col)),
            "strawberry ({row}, {col}) uncovered"
        );
    }
    // printed cost equals the sum over members
    let recomputed: i64 = solution
        .members()
        .iter()
        .map(|&(_, b)| 10 + b.area() as i64)
        .sum();
    assert_eq!(solution.cost(), recomputed);
}

#[test]
fn test_multi_puzzle_stream_renders_blocks_and_total() {
    let (_, output) = solve_stream("1\n@\n\n2\n@...@\n");
    assert_eq!(
        output,
        "Cardinality:1\nCost:11\n=\nA\n\n\
         Cardinality:1\nCost:15\n=====\nAAAAA\n\n\
         Total Cost: 26\n"
    );
}

#[test]
fn test_trailing_puzzle_without_terminator_is_solved() {
    let (solutions, output) = solve_stream("1\n@..\n..@");
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].cost(), 16);
    assert!(output.ends_with("Total Cost: 16\n"));
}

#[test]
fn test_patterned_field_upholds_cover_invariants() {
    let mut field = String::from("6\n");
    for row in 0..12 {
        for col in 0..20 {
            field.push(if (row * 7 + col * 3) % 5 == 0 { '@' } else { '.' });
        }
        field.push('\n');
    }

    let puzzles = PuzzleLoader::new()
        .from_bufread(Cursor::new(field.as_str()))
        .expect("input parses");
    let mut solver = Solver::new();
    let solution = solver.solve(&puzzles[0]);
    assert_solution_invariants(&puzzles[0], &solution);
}

#[test]
fn test_rendered_rows_match_member_labels() {
    let (solutions, _) = solve_stream("4\n@.@..\n.....\n@...@\n");
    let solution = &solutions[0];
    for (label, bounds) in solution.members() {
        for row in bounds.top_row()..=bounds.bottom_row() {
            let line: Vec<char> = solution.rows()[row].chars().collect();
            for col in bounds.top_col()..=bounds.bottom_col() {
                assert_eq!(line[col], *label);
            }
        }
    }
}
