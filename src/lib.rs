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

//! # slitherlink
//! `slitherlink` is a parallel constraint-propagation solver for Slitherlink
//! loop puzzles. Its goal is to let you hand it a [`Grid`](grid::Grid) of
//! clues and get back every closed loop satisfying them, using all of your
//! hardware to do so.
//!
//! The engine is built from six small, independently testable pieces:
//! [`graph::GraphBuilder`] derives the planar graph of points and edges a
//! grid implies; [`state::State`] carries the tri-valued edge assignment and
//! the counters derived from it; [`propagate::Propagator`] pushes a state to
//! a fixpoint of forced deductions; [`heuristic::Heuristic`] picks the next
//! edge to branch on; [`validate::Validator`] confirms a fully-decided state
//! is really a single simple loop; and [`search::SearchEngine`] ties all of
//! the above into a depth-gated, work-sharing parallel search.
//!
//! ## Quick example
//! ```
//! use slitherlink::config::SolverConfigBuilder;
//! use slitherlink::graph::GraphBuilder;
//! use slitherlink::grid::Grid;
//! use slitherlink::search::{Outcome, SearchEngine};
//! use slitherlink::sink::VecSink;
//!
//! let grid = Grid::new(2, 2, vec![Some(3), Some(3), Some(3), Some(3)]).unwrap();
//! let graph = GraphBuilder::build(&grid).unwrap();
//! let config = SolverConfigBuilder::default().find_all(true).build().unwrap();
//! let sink = VecSink::new();
//!
//! let outcome = SearchEngine::solve(&graph, &config, &sink).unwrap();
//! match outcome {
//!     Outcome::Completed { solutions_found, .. } => assert_eq!(solutions_found, 1),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

pub mod canonical;
pub mod config;
pub mod cutoff;
pub mod error;
pub mod graph;
pub mod grid;
pub mod heuristic;
pub mod propagate;
pub mod search;
pub mod sink;
pub mod state;
pub mod text_format;
pub mod validate;

pub use config::{SolverConfig, SolverConfigBuilder};
pub use error::SlitherError;
pub use graph::{Graph, GraphBuilder};
pub use grid::Grid;
pub use search::{Outcome, SearchEngine};
pub use sink::{Solution, SolutionSink, VecSink};
