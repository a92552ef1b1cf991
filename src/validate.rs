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

//! Confirms a fully-decided [`State`] is a genuine Slitherlink solution and,
//! if so, extracts its loop as an ordered sequence of points.

use crate::error::ValidatorRejection;
use crate::graph::Graph;
use crate::state::{EdgeAssignment, State};

/// A validated solution's loop: the cyclic sequence of dot coordinates,
/// closing back on its own start.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Cycle {
    points: Vec<(usize, usize)>,
}

impl Cycle {
    /// Points visited in walk order, with the start point repeated at the
    /// end to make the closure explicit.
    pub fn points(&self) -> &[(usize, usize)] {
        &self.points
    }

    #[cfg(test)]
    pub(crate) fn test_only_from_points(points: Vec<(usize, usize)>) -> Self {
        Self { points }
    }
}

/// Checks a fully-decided state, in the order a short-circuiting
/// implementation should apply them: clue exactness, then degree closure,
/// then non-emptiness, then single-cycle connectivity.
pub struct Validator;

impl Validator {
    pub fn validate(graph: &Graph, state: &State) -> Result<Cycle, ValidatorRejection> {
        debug_assert!(state.is_fully_decided());

        for &cell in graph.clue_cells() {
            let clue = graph.cell_clue(cell).expect("clue_cells only lists clue-bearing cells");
            if state.cell_on_count(cell) != clue {
                return Err(ValidatorRejection::ClueViolation { cell });
            }
        }

        for p in 0..graph.point_count() {
            let degree = state.point_on_degree(p);
            if degree != 0 && degree != 2 {
                return Err(ValidatorRejection::PointDegreeViolation { point: p });
            }
        }

        let total_on = (0..graph.edge_count())
            .filter(|&e| state.edge(e) == EdgeAssignment::On)
            .count();
        if total_on == 0 {
            return Err(ValidatorRejection::EmptyLoop);
        }

        Self::walk_single_cycle(graph, state, total_on)
    }

    fn walk_single_cycle(graph: &Graph, state: &State, total_on: usize) -> Result<Cycle, ValidatorRejection> {
        let start = (0..graph.point_count())
            .find(|&p| state.point_on_degree(p) == 2)
            .expect("total_on > 0 implies some point has on-degree 2");

        let mut visited_edges = vec![false; graph.edge_count()];
        let mut points = Vec::with_capacity(total_on + 1);
        points.push(graph.point_coords(start));

        let mut current = start;
        loop {
            let next_edge = graph
                .point_edges(current)
                .iter()
                .copied()
                .find(|&e| state.edge(e) == EdgeAssignment::On && !visited_edges[e]);

            let Some(e) = next_edge else {
                return Err(ValidatorRejection::DanglingEndpoint { point: current });
            };
            visited_edges[e] = true;
            current = Self::other_endpoint(graph, e, current);
            if current == start {
                break;
            }
            points.push(graph.point_coords(current));
        }
        points.push(graph.point_coords(start));

        let visited_count = visited_edges.iter().filter(|v| **v).count();
        if visited_count != total_on {
            return Err(ValidatorRejection::MultipleCycles);
        }
        for p in 0..graph.point_count() {
            if state.point_on_degree(p) == 2 {
                let incident_visited = graph
                    .point_edges(p)
                    .iter()
                    .any(|&e| state.edge(e) == EdgeAssignment::On && visited_edges[e]);
                if !incident_visited {
                    return Err(ValidatorRejection::MultipleCycles);
                }
            }
        }

        Ok(Cycle { points })
    }

    fn other_endpoint(graph: &Graph, e: usize, from: usize) -> usize {
        let edge = graph.edge(e);
        if edge.u == from {
            edge.v
        } else {
            edge.u
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::grid::Grid;

    fn perimeter_2x2() -> (Graph, State) {
        let grid = Grid::new(2, 2, vec![Some(3); 4]).unwrap();
        let graph = GraphBuilder::build(&grid).unwrap();
        let mut state = State::initial(&graph);
        for e in 0..graph.edge_count() {
            let edge = graph.edge(e);
            let on_perimeter = edge.cells().count() == 1;
            let value = if on_perimeter { EdgeAssignment::On } else { EdgeAssignment::Off };
            state.assign(&graph, e, value).unwrap();
        }
        (graph, state)
    }

    #[test]
    fn perimeter_loop_validates() {
        let (graph, state) = perimeter_2x2();
        let cycle = Validator::validate(&graph, &state).unwrap();
        assert_eq!(cycle.points().len(), 9); // 8 edges + closing point
    }

    #[test]
    fn all_off_is_rejected_as_empty_loop() {
        let grid = Grid::new(1, 1, vec![Some(0)]).unwrap();
        let graph = GraphBuilder::build(&grid).unwrap();
        let mut state = State::initial(&graph);
        for &e in graph.cell_edges(0) {
            state.assign(&graph, e, EdgeAssignment::Off).unwrap();
        }
        assert_eq!(Validator::validate(&graph, &state), Err(ValidatorRejection::EmptyLoop));
    }

    #[test]
    fn clue_violation_is_detected() {
        let grid = Grid::new(1, 1, vec![Some(2)]).unwrap();
        let graph = GraphBuilder::build(&grid).unwrap();
        let mut state = State::initial(&graph);
        let edges: Vec<usize> = graph.cell_edges(0).to_vec();
        state.assign(&graph, edges[0], EdgeAssignment::On).unwrap();
        state.assign(&graph, edges[1], EdgeAssignment::Off).unwrap();
        state.assign(&graph, edges[2], EdgeAssignment::Off).unwrap();
        state.assign(&graph, edges[3], EdgeAssignment::Off).unwrap();
        assert_eq!(
            Validator::validate(&graph, &state),
            Err(ValidatorRejection::ClueViolation { cell: 0 })
        );
    }
}
