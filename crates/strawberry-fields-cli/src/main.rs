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

use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use strawberry_fields_model::prelude::PuzzleLoader;
use strawberry_fields_solver::prelude::Solver;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "strawberryfields",
    about = "Covers every strawberry in a field with at most K cheap greenhouses",
    version
)]
struct Args {
    /// Input file containing the puzzles
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Input file (flag form of the positional argument)
    #[arg(short, long, default_value = "strawberries.txt")]
    file: PathBuf,

    /// Output file the covering blocks are appended to
    #[arg(short, long, default_value = "optimal_covering.txt")]
    output: PathBuf,

    /// Write per-puzzle run records to this file as JSON
    #[arg(long, value_name = "FILE")]
    stats: Option<PathBuf>,
}

#[derive(Serialize)]
struct RunRecord {
    puzzle: usize,
    num_rows: usize,
    num_cols: usize,
    strawberries: usize,
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    runtime_ms: u128,
    cardinality: usize,
    cost: i64,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn main() {
    enable_tracing();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let input = args.input.clone().unwrap_or_else(|| args.file.clone());
    let puzzles = PuzzleLoader::new().from_path(&input)?;
    tracing::info!("loaded {} puzzle(s) from {}", puzzles.len(), input.display());

    let mut out = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&args.output)?;

    let mut solver = Solver::new();
    let mut records: Vec<RunRecord> = Vec::with_capacity(puzzles.len());
    let mut total_cost = 0i64;

    for (index, puzzle) in puzzles.iter().enumerate() {
        let start_ts = Utc::now();
        let t0 = Instant::now();

        let solution = solver.solve(puzzle);

        total_cost += solution.cost();
        write!(out, "{}", solution.render_block())?;

        records.push(RunRecord {
            puzzle: index + 1,
            num_rows: puzzle.grid().num_rows(),
            num_cols: puzzle.grid().num_cols(),
            strawberries: puzzle.grid().strawberries().len(),
            start_ts,
            end_ts: Utc::now(),
            runtime_ms: t0.elapsed().as_millis(),
            cardinality: solution.cardinality(),
            cost: solution.cost(),
        });
    }

    writeln!(out, "Total Cost: {total_cost}")?;
    tracing::info!(
        "total cost {} over {} puzzle(s), appended to {}",
        total_cost,
        puzzles.len(),
        args.output.display()
    );

    if let Some(stats) = &args.stats {
        let json = serde_json::to_string_pretty(&records)?;
        std::fs::write(stats, json)?;
        tracing::info!("wrote {} run record(s) to {}", records.len(), stats.display());
    }

    Ok(())
}
