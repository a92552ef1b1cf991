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

//! End-to-end scenarios driven through the plain-text format, exactly the
//! way a caller embedding this crate would use it.

use std::time::Duration;

use slitherlink::config::SolverConfigBuilder;
use slitherlink::graph::GraphBuilder;
use slitherlink::search::{Outcome, SearchEngine};
use slitherlink::sink::VecSink;
use slitherlink::text_format;

#[test]
fn two_by_two_trivial_has_one_perimeter_solution() {
    let grid = text_format::parse("2 2\n3 3\n3 3\n").unwrap();
    let graph = GraphBuilder::build(&grid).unwrap();
    let config = SolverConfigBuilder::default().find_all(true).build().unwrap();
    let sink = VecSink::new();

    let outcome = SearchEngine::solve(&graph, &config, &sink).unwrap();
    assert!(matches!(outcome, Outcome::Completed { solutions_found: 1, .. }));

    let solutions = sink.into_solutions();
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].cycle.points().len(), 9);
}

#[test]
fn four_by_four_standard_puzzle_has_at_least_one_solution() {
    let grid = text_format::parse(
        "4 4\n\
         3 . . .\n\
         . . 2 .\n\
         . 2 . .\n\
         . . . 3\n",
    )
    .unwrap();
    let graph = GraphBuilder::build(&grid).unwrap();
    let config = SolverConfigBuilder::default().find_all(false).build().unwrap();
    let sink = VecSink::new();

    let outcome = SearchEngine::solve(&graph, &config, &sink).unwrap();
    assert!(matches!(outcome, Outcome::StoppedByFirst { .. }));
    assert_eq!(sink.len(), 1);
}

#[test]
fn contradictory_clues_yield_no_solution() {
    // a 0-clue cell immediately adjacent (sharing an edge) to a 3-clue cell
    // is infeasible: the shared edge would need to be both off and on.
    let grid = text_format::parse("1 2\n0 3\n").unwrap();
    let graph = GraphBuilder::build(&grid).unwrap();
    let config = SolverConfigBuilder::default().find_all(true).build().unwrap();
    let sink = VecSink::new();

    let outcome = SearchEngine::solve(&graph, &config, &sink).unwrap();
    assert!(matches!(outcome, Outcome::Completed { solutions_found: 0, .. }));
    assert!(sink.is_empty());
}

#[test]
fn timeout_on_a_large_sparse_grid_returns_partial_results() {
    let rows = 15;
    let cols = 15;
    let mut text = format!("{rows} {cols}\n");
    for r in 0..rows {
        let row: Vec<&str> = (0..cols)
            .map(|c| if (r * cols + c) % 5 == 0 { "2" } else { "." })
            .collect();
        text.push_str(&row.join(" "));
        text.push('\n');
    }
    let grid = text_format::parse(&text).unwrap();
    let graph = GraphBuilder::build(&grid).unwrap();
    let config = SolverConfigBuilder::default()
        .find_all(true)
        .timeout(Some(Duration::from_millis(100)))
        .build()
        .unwrap();
    let sink = VecSink::new();

    let outcome = SearchEngine::solve(&graph, &config, &sink).unwrap();
    match outcome {
        Outcome::Timeout { solutions_found, .. } => assert_eq!(solutions_found, sink.len()),
        other => panic!("unexpected outcome: {other:?}"),
    }
}
