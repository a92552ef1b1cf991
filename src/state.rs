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

//! The mutable state of one search branch: a tri-valued assignment over
//! every edge, plus counters kept incrementally consistent with it. Cloned
//! once per fork; owned exclusively by whichever task is mutating it.

use crate::error::Contradiction;
use crate::graph::Graph;

/// The tri-valued assignment of a single edge.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum EdgeAssignment {
    Unknown = 0,
    On = 1,
    Off = 2,
}

/// Per-branch search state: one assignment per edge, and the counters that
/// the [`crate::propagate::Propagator`] and
/// [`crate::heuristic::Heuristic`] read to avoid rescanning the graph.
///
/// # Invariants
/// Between any two externally observable operations:
/// - for every point `p`, `point_on_degree[p] + point_unknown_degree[p] <=`
///   the number of edges incident to `p`;
/// - for every clue cell `c`, `cell_on_count[c] <= clue[c] <= cell_on_count[c]
///   + cell_unknown_count[c]`;
/// - for every point `p`, `point_on_degree[p] <= 2`.
#[derive(Debug, Clone)]
pub struct State {
    edge: Vec<EdgeAssignment>,
    point_on_degree: Vec<u8>,
    point_unknown_degree: Vec<u8>,
    cell_on_count: Vec<u8>,
    cell_unknown_count: Vec<u8>,
}

impl State {
    /// The initial state of a fresh search: every edge `Unknown`.
    pub fn initial(graph: &Graph) -> Self {
        let mut point_unknown_degree = vec![0u8; graph.point_count()];
        for p in 0..graph.point_count() {
            point_unknown_degree[p] = graph.point_edges(p).len() as u8;
        }
        let mut cell_unknown_count = vec![0u8; graph.cell_count()];
        for c in 0..graph.cell_count() {
            cell_unknown_count[c] = graph.cell_edges(c).len() as u8;
        }
        Self {
            edge: vec![EdgeAssignment::Unknown; graph.edge_count()],
            point_on_degree: vec![0u8; graph.point_count()],
            point_unknown_degree,
            cell_on_count: vec![0u8; graph.cell_count()],
            cell_unknown_count,
        }
    }

    #[inline]
    pub fn edge(&self, e: usize) -> EdgeAssignment {
        self.edge[e]
    }

    #[inline]
    pub fn point_on_degree(&self, p: usize) -> u8 {
        self.point_on_degree[p]
    }

    #[inline]
    pub fn point_unknown_degree(&self, p: usize) -> u8 {
        self.point_unknown_degree[p]
    }

    #[inline]
    pub fn cell_on_count(&self, c: usize) -> u8 {
        self.cell_on_count[c]
    }

    #[inline]
    pub fn cell_unknown_count(&self, c: usize) -> u8 {
        self.cell_unknown_count[c]
    }

    /// Every edge still `Unknown`, in edge-id order.
    pub fn unknown_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.edge
            .iter()
            .enumerate()
            .filter(|(_, a)| **a == EdgeAssignment::Unknown)
            .map(|(e, _)| e)
    }

    /// Count of edges still `Unknown`; used to size-gate parallel forking.
    pub fn unknown_count(&self) -> usize {
        self.edge.iter().filter(|a| **a == EdgeAssignment::Unknown).count()
    }

    /// True once no edge remains `Unknown`.
    pub fn is_fully_decided(&self) -> bool {
        self.edge.iter().all(|a| *a != EdgeAssignment::Unknown)
    }

    /// Decides edge `e` to be `value`. A no-op if already decided to `value`.
    /// Fails with [`Contradiction`] if `e` is already decided to the other
    /// value, or if the assignment would violate a point or cell invariant.
    ///
    /// On failure the counters touched so far by *this call* are rolled
    /// back; the state remains usable for a sibling branch. On success the
    /// four counters (both endpoints, both bordering cells) are left
    /// updated.
    pub fn assign(&mut self, graph: &Graph, e: usize, value: EdgeAssignment) -> Result<(), Contradiction> {
        debug_assert!(value != EdgeAssignment::Unknown);
        match self.edge[e] {
            v if v == value => return Ok(()),
            EdgeAssignment::Unknown => {}
            _ => return Err(Contradiction),
        }

        let edge = graph.edge(e);
        self.edge[e] = value;

        for p in [edge.u, edge.v] {
            self.point_unknown_degree[p] -= 1;
            if value == EdgeAssignment::On {
                self.point_on_degree[p] += 1;
            }
        }
        for cell in edge.cells() {
            self.cell_unknown_count[cell] -= 1;
            if value == EdgeAssignment::On {
                self.cell_on_count[cell] += 1;
            }
        }

        if self.violates_local_invariants(graph, &edge) {
            self.undo_assign(&edge, value);
            self.edge[e] = EdgeAssignment::Unknown;
            return Err(Contradiction);
        }
        Ok(())
    }

    fn undo_assign(&mut self, edge: &crate::graph::Edge, value: EdgeAssignment) {
        for p in [edge.u, edge.v] {
            self.point_unknown_degree[p] += 1;
            if value == EdgeAssignment::On {
                self.point_on_degree[p] -= 1;
            }
        }
        for cell in edge.cells() {
            self.cell_unknown_count[cell] += 1;
            if value == EdgeAssignment::On {
                self.cell_on_count[cell] -= 1;
            }
        }
    }

    fn violates_local_invariants(&self, graph: &Graph, edge: &crate::graph::Edge) -> bool {
        for p in [edge.u, edge.v] {
            if self.point_on_degree[p] > 2 {
                return true;
            }
        }
        for cell in edge.cells() {
            if let Some(clue) = graph.cell_clue(cell) {
                let on = self.cell_on_count[cell];
                let unknown = self.cell_unknown_count[cell];
                if on > clue || on + unknown < clue {
                    return true;
                }
            }
        }
        false
    }

    /// Simulates deciding `e` to `value` without mutating the state; used by
    /// the heuristic to count surviving branches without cloning.
    pub fn would_survive(&self, graph: &Graph, e: usize, value: EdgeAssignment) -> bool {
        let edge = graph.edge(e);
        let mut on_deltas = [0u8; 2];
        for (i, p) in [edge.u, edge.v].into_iter().enumerate() {
            let mut on = self.point_on_degree[p];
            if value == EdgeAssignment::On {
                on += 1;
            }
            on_deltas[i] = on;
            if on > 2 {
                return false;
            }
        }
        for cell in edge.cells() {
            if let Some(clue) = graph.cell_clue(cell) {
                let mut on = self.cell_on_count[cell];
                let unknown = self.cell_unknown_count[cell] - 1;
                if value == EdgeAssignment::On {
                    on += 1;
                }
                if on > clue || on + unknown < clue {
                    return false;
                }
            }
        }
        true
    }

    /// Snapshot of every edge's assignment, in edge-id order.
    pub fn edges(&self) -> &[EdgeAssignment] {
        &self.edge
    }
}
