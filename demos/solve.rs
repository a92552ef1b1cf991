// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Exercises the library end to end: reads a puzzle in the plain-text
//! format, solves it, and prints every loop found as a sequence of dot
//! coordinates. Not part of the library's public contract.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use slitherlink::config::SolverConfigBuilder;
use slitherlink::graph::GraphBuilder;
use slitherlink::search::{Outcome, SearchEngine};
use slitherlink::sink::VecSink;
use slitherlink::text_format;

#[derive(Parser)]
struct Args {
    /// Path to a puzzle in the plain-text format (rows/cols header, then one
    /// row of whitespace-separated clues per line).
    puzzle: PathBuf,

    /// Enumerate every solution instead of stopping at the first.
    #[arg(long)]
    all: bool,

    /// Stop after this many solutions (only meaningful with --all).
    #[arg(long)]
    max_solutions: Option<usize>,

    /// Wall-clock budget in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let text = fs::read_to_string(&args.puzzle)?;
    let grid = text_format::parse(&text)?;
    let graph = GraphBuilder::build(&grid)?;

    let mut builder = SolverConfigBuilder::default();
    builder.find_all(args.all).max_solutions(args.max_solutions).verbose(true);
    if let Some(ms) = args.timeout_ms {
        builder.timeout(Some(Duration::from_millis(ms)));
    }
    let config = builder.build()?;

    let sink = VecSink::new();
    let outcome = SearchEngine::solve(&graph, &config, &sink)?;

    match &outcome {
        Outcome::Completed { solutions_found, explored } => {
            println!("completed: {solutions_found} solution(s), {explored} nodes explored");
        }
        Outcome::StoppedByFirst { explored } => {
            println!("stopped after first solution, {explored} nodes explored");
        }
        Outcome::Capped { solutions_found, explored } => {
            println!("solution cap reached: {solutions_found} solution(s), {explored} nodes explored");
        }
        Outcome::Timeout { solutions_found, explored } => {
            println!("timed out: {solutions_found} solution(s) found in {explored} nodes");
        }
    }

    for (i, solution) in sink.into_solutions().into_iter().enumerate() {
        println!("solution {}: {:?}", i + 1, solution.cycle.points());
    }
    Ok(())
}
