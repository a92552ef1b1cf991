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

//! Unit propagation: pushes a [`State`] forward to a fixpoint of forced
//! deductions after one branching decision, or reports a contradiction.
//!
//! Five local rules are applied repeatedly over a FIFO queue of "dirty"
//! cells and points, seeded from whatever the triggering decision touched:
//!
//! - R1 *cell-cap*: a cell already at its clue's `On` count forces its
//!   remaining unknown edges `Off`.
//! - R2 *cell-floor*: a cell that needs every remaining unknown edge to
//!   reach its clue forces them all `On`.
//! - R3 *point-cap*: a point already at degree 2 forces its remaining
//!   unknown edges `Off`.
//! - R4 *point-floor*: a point at degree 1 with exactly one unknown edge
//!   left forces it `On`.
//! - R5 *isolated-point*: a point at degree 0 with exactly one unknown edge
//!   left forces that edge `Off` (it alone could never close a loop).

use std::collections::VecDeque;

use crate::error::Contradiction;
use crate::graph::Graph;
use crate::state::{EdgeAssignment, State};

/// Applies R1-R5 to fixpoint, starting from the neighborhoods of `touched`
/// edges (typically just decided by the caller).
pub struct Propagator<'g> {
    graph: &'g Graph,
    dirty_cells: VecDeque<usize>,
    dirty_points: VecDeque<usize>,
    cell_queued: Vec<bool>,
    point_queued: Vec<bool>,
}

impl<'g> Propagator<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            dirty_cells: VecDeque::new(),
            dirty_points: VecDeque::new(),
            cell_queued: vec![false; graph.cell_count()],
            point_queued: vec![false; graph.point_count()],
        }
    }

    fn enqueue_cell(&mut self, c: usize) {
        if !self.cell_queued[c] {
            self.cell_queued[c] = true;
            self.dirty_cells.push_back(c);
        }
    }

    fn enqueue_point(&mut self, p: usize) {
        if !self.point_queued[p] {
            self.point_queued[p] = true;
            self.dirty_points.push_back(p);
        }
    }

    /// Seeds the queue with the sites touched by deciding `e`, then runs to
    /// fixpoint. Call this once right after the decision that triggered it.
    pub fn propagate_from(&mut self, state: &mut State, e: usize) -> Result<(), Contradiction> {
        let edge = *self.graph.edge(e);
        self.enqueue_point(edge.u);
        self.enqueue_point(edge.v);
        for cell in edge.cells() {
            self.enqueue_cell(cell);
        }
        self.drain(state)
    }

    /// Seeds every cell and point as dirty and runs to fixpoint. Call this
    /// once on a fresh [`State`] before any decision has been made, to catch
    /// whatever boundary clues already force edges from the start (e.g. a
    /// corner cell whose clue equals its incident edge count).
    pub fn propagate_all(&mut self, state: &mut State) -> Result<(), Contradiction> {
        for c in 0..self.graph.cell_count() {
            self.enqueue_cell(c);
        }
        for p in 0..self.graph.point_count() {
            self.enqueue_point(p);
        }
        self.drain(state)
    }

    /// One-ply look-ahead: for each edge still `Unknown`, tries each value on
    /// a scratch clone and propagates that clone to fixpoint. An edge for
    /// which only one value survives is forced for real; an edge for which
    /// neither survives is a contradiction. Repeats until a full sweep forces
    /// nothing further. Call after `propagate_from`/`propagate_all` reaches
    /// its own fixpoint; costs one clone-and-propagate per unknown edge per
    /// sweep, so it is only worth enabling when branching alone leaves too
    /// large a residual tree.
    pub fn lookahead(&mut self, state: &mut State) -> Result<(), Contradiction> {
        loop {
            let mut forced_any = false;
            for e in 0..self.graph.edge_count() {
                if state.edge(e) != EdgeAssignment::Unknown {
                    continue;
                }
                let off_survives = Self::probe(self.graph, state, e, EdgeAssignment::Off);
                let on_survives = Self::probe(self.graph, state, e, EdgeAssignment::On);
                match (off_survives, on_survives) {
                    (false, false) => return Err(Contradiction),
                    (false, true) => {
                        self.force(state, e, EdgeAssignment::On)?;
                        forced_any = true;
                    }
                    (true, false) => {
                        self.force(state, e, EdgeAssignment::Off)?;
                        forced_any = true;
                    }
                    (true, true) => {}
                }
            }
            if !forced_any {
                return Ok(());
            }
            self.drain(state)?;
        }
    }

    fn probe(graph: &Graph, state: &State, e: usize, value: EdgeAssignment) -> bool {
        let mut trial = state.clone();
        if trial.assign(graph, e, value).is_err() {
            return false;
        }
        Propagator::new(graph).propagate_from(&mut trial, e).is_ok()
    }

    fn force(&mut self, state: &mut State, e: usize, value: EdgeAssignment) -> Result<(), Contradiction> {
        if state.edge(e) == value {
            return Ok(());
        }
        state.assign(self.graph, e, value)?;
        let edge = *self.graph.edge(e);
        self.enqueue_point(edge.u);
        self.enqueue_point(edge.v);
        for cell in edge.cells() {
            self.enqueue_cell(cell);
        }
        Ok(())
    }

    fn drain(&mut self, state: &mut State) -> Result<(), Contradiction> {
        while !self.dirty_cells.is_empty() || !self.dirty_points.is_empty() {
            if let Some(c) = self.dirty_cells.pop_front() {
                self.cell_queued[c] = false;
                self.apply_cell_rules(state, c)?;
                continue;
            }
            if let Some(p) = self.dirty_points.pop_front() {
                self.point_queued[p] = false;
                self.apply_point_rules(state, p)?;
            }
        }
        Ok(())
    }

    fn apply_cell_rules(&mut self, state: &mut State, c: usize) -> Result<(), Contradiction> {
        let Some(clue) = self.graph.cell_clue(c) else {
            return Ok(());
        };
        let on = state.cell_on_count(c);
        let unknown = state.cell_unknown_count(c);
        if unknown == 0 {
            return Ok(());
        }
        if on == clue {
            // R1: cell-cap
            let edges: Vec<usize> = self.graph.cell_edges(c).to_vec();
            for e in edges {
                if state.edge(e) == EdgeAssignment::Unknown {
                    self.force(state, e, EdgeAssignment::Off)?;
                }
            }
        } else if on + unknown == clue {
            // R2: cell-floor
            let edges: Vec<usize> = self.graph.cell_edges(c).to_vec();
            for e in edges {
                if state.edge(e) == EdgeAssignment::Unknown {
                    self.force(state, e, EdgeAssignment::On)?;
                }
            }
        }
        Ok(())
    }

    fn apply_point_rules(&mut self, state: &mut State, p: usize) -> Result<(), Contradiction> {
        let on = state.point_on_degree(p);
        let unknown = state.point_unknown_degree(p);
        if unknown == 0 {
            return Ok(());
        }
        if on == 2 {
            // R3: point-cap
            let edges: Vec<usize> = self.graph.point_edges(p).to_vec();
            for e in edges {
                if state.edge(e) == EdgeAssignment::Unknown {
                    self.force(state, e, EdgeAssignment::Off)?;
                }
            }
        } else if on == 1 && unknown == 1 {
            // R4: point-floor
            let e = self.single_unknown(state, p);
            self.force(state, e, EdgeAssignment::On)?;
        } else if on == 0 && unknown == 1 {
            // R5: isolated-point
            let e = self.single_unknown(state, p);
            self.force(state, e, EdgeAssignment::Off)?;
        }
        Ok(())
    }

    fn single_unknown(&self, state: &State, p: usize) -> usize {
        self.graph
            .point_edges(p)
            .iter()
            .copied()
            .find(|&e| state.edge(e) == EdgeAssignment::Unknown)
            .expect("point_unknown_degree invariant guarantees an unknown edge exists")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::grid::Grid;

    fn setup(rows: usize, cols: usize, clues: Vec<Option<u8>>) -> (Graph, State) {
        let grid = Grid::new(rows, cols, clues).unwrap();
        let graph = GraphBuilder::build(&grid).unwrap();
        let state = State::initial(&graph);
        (graph, state)
    }

    #[test]
    fn zero_clue_forces_all_bordering_edges_off() {
        let (graph, mut state) = setup(1, 1, vec![Some(0)]);
        let mut prop = Propagator::new(&graph);
        let e0 = graph.cell_edges(0)[0];
        state.assign(&graph, e0, EdgeAssignment::Off).unwrap();
        prop.propagate_from(&mut state, e0).unwrap();
        for &e in graph.cell_edges(0) {
            assert_eq!(state.edge(e), EdgeAssignment::Off);
        }
    }

    #[test]
    fn three_clue_with_one_off_forces_rest_on() {
        let (graph, mut state) = setup(1, 1, vec![Some(3)]);
        let mut prop = Propagator::new(&graph);
        let edges: Vec<usize> = graph.cell_edges(0).to_vec();
        state.assign(&graph, edges[0], EdgeAssignment::Off).unwrap();
        prop.propagate_from(&mut state, edges[0]).unwrap();
        for &e in &edges[1..] {
            assert_eq!(state.edge(e), EdgeAssignment::On);
        }
    }

    #[test]
    fn point_cap_turns_off_remaining_unknown_edges() {
        let (graph, mut state) = setup(2, 2, vec![None; 4]);
        let mut prop = Propagator::new(&graph);
        // center point (1,1) has degree 4; id = 1*3+1 = 4
        let center = 4;
        let incident: Vec<usize> = graph.point_edges(center).to_vec();
        state.assign(&graph, incident[0], EdgeAssignment::On).unwrap();
        prop.propagate_from(&mut state, incident[0]).unwrap();
        state.assign(&graph, incident[1], EdgeAssignment::On).unwrap();
        prop.propagate_from(&mut state, incident[1]).unwrap();
        for &e in &incident[2..] {
            assert_eq!(state.edge(e), EdgeAssignment::Off);
        }
    }

    #[test]
    fn contradiction_propagates_up() {
        let (graph, mut state) = setup(1, 1, vec![Some(0)]);
        let mut prop = Propagator::new(&graph);
        let edges: Vec<usize> = graph.cell_edges(0).to_vec();
        state.assign(&graph, edges[0], EdgeAssignment::On).unwrap();
        let e1 = edges[1];
        state.assign(&graph, e1, EdgeAssignment::Off).unwrap();
        // forcing edges[0] off now would contradict its existing On, but
        // instead check that a direct second On decision on a 0-clue cell fails
        assert!(state.assign(&graph, edges[2], EdgeAssignment::On).is_ok());
        // the cell now has on=2 > clue=0 once rules run
        let res = prop.propagate_from(&mut state, edges[2]);
        assert!(res.is_err());
    }

    #[test]
    fn lookahead_never_rejects_a_state_with_a_true_completion() {
        // the 2x2 all-threes grid has exactly one valid loop (its own
        // perimeter), so a one-ply look-ahead run on the untouched initial
        // state must never report a contradiction: whichever edge value the
        // real solution picks is always a value that survives its own probe.
        let (graph, mut state) = setup(2, 2, vec![Some(3); 4]);
        let mut prop = Propagator::new(&graph);
        prop.propagate_all(&mut state).unwrap();
        assert!(prop.lookahead(&mut state).is_ok());
    }

    #[test]
    fn lookahead_is_a_noop_once_already_at_fixpoint() {
        let (graph, mut state) = setup(1, 1, vec![Some(2)]);
        let mut prop = Propagator::new(&graph);
        let edges: Vec<usize> = graph.cell_edges(0).to_vec();
        state.assign(&graph, edges[0], EdgeAssignment::On).unwrap();
        prop.propagate_from(&mut state, edges[0]).unwrap();
        state.assign(&graph, edges[1], EdgeAssignment::On).unwrap();
        prop.propagate_from(&mut state, edges[1]).unwrap();
        // the cell is now fully decided; look-ahead has nothing left to probe
        let before = state.edges().to_vec();
        prop.lookahead(&mut state).unwrap();
        assert_eq!(state.edges(), before.as_slice());
    }

    #[test]
    fn repeated_propagation_is_idempotent() {
        let (graph, mut state) = setup(1, 1, vec![Some(2)]);
        let mut prop = Propagator::new(&graph);
        let edges: Vec<usize> = graph.cell_edges(0).to_vec();
        state.assign(&graph, edges[0], EdgeAssignment::On).unwrap();
        prop.propagate_from(&mut state, edges[0]).unwrap();
        state.assign(&graph, edges[1], EdgeAssignment::On).unwrap();
        prop.propagate_from(&mut state, edges[1]).unwrap();
        let before = state.edges().to_vec();
        prop.propagate_from(&mut state, edges[1]).unwrap();
        assert_eq!(state.edges(), before.as_slice());
    }
}
