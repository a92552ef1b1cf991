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

//! Picks the next edge to branch on. Two concerns are combined: detect
//! forced or dead moves inline (so the search never branches on something
//! propagation would have settled anyway), and otherwise bias towards edges
//! whose decision is likely to cascade into further propagation.

use crate::graph::Graph;
use crate::state::{EdgeAssignment, State};

/// What the heuristic found.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Selection {
    /// Branch on this edge next.
    Edge(usize),
    /// Every edge is already decided.
    AllDecided,
}

/// Stateless edge-ranking heuristic; a plain function object rather than a
/// trait object, since this crate offers only the one ranking strategy.
pub struct Heuristic;

impl Heuristic {
    /// Scans every unknown edge and returns the one to branch on next.
    ///
    /// Returns immediately on the first edge found with zero or one
    /// surviving branch (a contradiction-on-sight or a forced move); falls
    /// back to additive scoring only when every unknown edge still has both
    /// options open.
    pub fn select(graph: &Graph, state: &State) -> Selection {
        let mut best: Option<(usize, i64)> = None;
        for e in state.unknown_edges() {
            let on_ok = state.would_survive(graph, e, EdgeAssignment::On);
            let off_ok = state.would_survive(graph, e, EdgeAssignment::Off);
            let branches = on_ok as u8 + off_ok as u8;
            if branches <= 1 {
                return Selection::Edge(e);
            }
            let score = Self::score(graph, state, e);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((e, score));
            }
        }
        match best {
            Some((e, _)) => Selection::Edge(e),
            None => Selection::AllDecided,
        }
    }

    fn score(graph: &Graph, state: &State, e: usize) -> i64 {
        let edge = graph.edge(e);
        let mut score: i64 = 0;

        for p in [edge.u, edge.v] {
            if state.point_on_degree(p) == 1 {
                score += 10_000;
            }
        }

        for cell in edge.cells() {
            let unknown = state.cell_unknown_count(cell);
            if unknown == 1 {
                score += 5_000;
            }
            if let Some(clue) = graph.cell_clue(cell) {
                let need = clue as i64 - state.cell_on_count(cell) as i64;
                let u = unknown as i64;
                score += if u == 0 {
                    0
                } else if need == u || need == 0 {
                    2_000
                } else if u == 1 {
                    1_500
                } else if u <= 2 {
                    1_000
                } else {
                    (100 - (2 * need - u).abs()).max(0)
                };
            }
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::grid::Grid;

    #[test]
    fn reports_all_decided_when_no_unknowns_remain() {
        let grid = Grid::new(1, 1, vec![Some(0)]).unwrap();
        let graph = GraphBuilder::build(&grid).unwrap();
        let mut state = State::initial(&graph);
        for &e in graph.cell_edges(0) {
            state.assign(&graph, e, EdgeAssignment::Off).unwrap();
        }
        assert_eq!(Heuristic::select(&graph, &state), Selection::AllDecided);
    }

    #[test]
    fn forced_move_is_returned_immediately() {
        let grid = Grid::new(1, 1, vec![Some(3)]).unwrap();
        let graph = GraphBuilder::build(&grid).unwrap();
        let mut state = State::initial(&graph);
        let edges: Vec<usize> = graph.cell_edges(0).to_vec();
        state.assign(&graph, edges[0], EdgeAssignment::On).unwrap();
        state.assign(&graph, edges[1], EdgeAssignment::On).unwrap();
        match Heuristic::select(&graph, &state) {
            Selection::Edge(e) => assert!(edges[2..].contains(&e)),
            Selection::AllDecided => panic!("expected a forced edge"),
        }
    }

    #[test]
    fn dead_edge_is_returned_immediately() {
        let grid = Grid::new(1, 1, vec![Some(0)]).unwrap();
        let graph = GraphBuilder::build(&grid).unwrap();
        let state = State::initial(&graph);
        // every edge here has branches == 1 (only Off survives), so the very
        // first unknown edge scanned is returned without scoring
        match Heuristic::select(&graph, &state) {
            Selection::Edge(_) => {}
            Selection::AllDecided => panic!("expected an edge"),
        }
    }
}
