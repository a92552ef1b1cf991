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

//! Drives the depth-first branch-and-propagate search: forks shallow
//! subtrees across a pool of worker threads sharing one pending-work queue,
//! and keeps recursing sequentially once a branch goes deep enough that
//! forking it would cost more than it saves.
//!
//! The shared state a worker touches is the same shape as a classical
//! work-stealing branch-and-bound solver: one mutex-guarded queue of
//! not-yet-started subtrees, a condvar idle workers park on, and an
//! `ongoing` counter that lets every worker agree, without a dedicated
//! coordinator, on when the whole search is actually finished.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use crate::canonical::CanonicalFilter;
use crate::config::SolverConfig;
use crate::cutoff::Cutoff;
use crate::error::SlitherError;
use crate::graph::Graph;
use crate::heuristic::{Heuristic, Selection};
use crate::propagate::Propagator;
use crate::sink::{Solution, SolutionSink};
use crate::state::{EdgeAssignment, State};
use crate::validate::Validator;

/// Why the search stopped, and how much it found before stopping.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Outcome {
    /// The whole tree was explored; `find_all` semantics were honored in
    /// full.
    Completed { solutions_found: usize, explored: u64 },
    /// `find_all` was false and a solution was found.
    StoppedByFirst { explored: u64 },
    /// `max_solutions` was reached before the tree was exhausted.
    Capped { solutions_found: usize, explored: u64 },
    /// The configured timeout elapsed before the tree was exhausted.
    Timeout { solutions_found: usize, explored: u64 },
}

const REASON_NONE: u8 = 0;
const REASON_FIRST: u8 = 1;
const REASON_CAP: u8 = 2;
const REASON_TIMEOUT: u8 = 3;

/// A subtree waiting to be picked up by some idle worker.
struct PendingBranch {
    state: State,
    depth: usize,
}

/// Everything every worker thread needs shared access to. Lives on the
/// stack of [`SearchEngine::solve`] and is borrowed, not `Arc`'d, by the
/// scoped threads spawned there.
struct Shared<'g> {
    graph: &'g Graph,
    config: &'g SolverConfig,
    sink: &'g dyn SolutionSink,
    cutoff: Cutoff,
    reason: AtomicU8,
    canonical: Option<CanonicalFilter>,
    parallel_depth: usize,
    explored: AtomicU64,
    solutions_found: AtomicUsize,
    queue: Mutex<VecDeque<PendingBranch>>,
    monitor: Condvar,
    ongoing: AtomicUsize,
}

impl<'g> Shared<'g> {
    fn push_pending(&self, state: State, depth: usize) {
        self.ongoing.fetch_add(1, Ordering::Relaxed);
        self.queue.lock().push_back(PendingBranch { state, depth });
        self.monitor.notify_one();
    }

    fn finish_one(&self) {
        if self.ongoing.fetch_sub(1, Ordering::Relaxed) == 1 {
            self.monitor.notify_all();
        }
    }

    fn signal(&self, reason: u8) {
        let _ = self
            .reason
            .compare_exchange(REASON_NONE, reason, Ordering::Relaxed, Ordering::Relaxed);
        self.cutoff.signal();
    }

    fn accept(&self, edges: Vec<EdgeAssignment>, cycle: crate::validate::Cycle) {
        if let Some(filter) = &self.canonical {
            if filter.is_duplicate_or_insert(&edges) {
                return;
            }
        }
        let count = self.sink.offer(Solution { cycle, edges });
        self.solutions_found.fetch_max(count, Ordering::Relaxed);

        if !self.config.find_all {
            log::debug!("first solution found after {} nodes explored", self.explored.load(Ordering::Relaxed));
            self.signal(REASON_FIRST);
        } else if let Some(max) = self.config.max_solutions {
            if count >= max {
                log::debug!("solution cap of {max} reached");
                self.signal(REASON_CAP);
            }
        }
    }
}

/// Computes the fork-depth threshold from grid size and clue density, per
/// the base-by-cell-count / density-adjustment / clamp scheme.
fn auto_parallel_depth(graph: &Graph) -> usize {
    let cells = graph.cell_count();
    let base: i64 = if cells <= 25 {
        8
    } else if cells <= 49 {
        12
    } else if cells <= 64 {
        14
    } else if cells <= 100 {
        20
    } else if cells <= 225 {
        30
    } else {
        36
    };
    let density = graph.clue_cells().len() as f64 / cells as f64;
    let adjusted = base + if density < 0.3 { 6 } else if density < 0.6 { 3 } else { 0 };
    adjusted.clamp(10, 45) as usize
}

/// Below this many remaining unknown edges, a subtree is considered too
/// small to be worth the clone-and-enqueue cost of forking.
const FORK_MIN_UNKNOWN_EDGES: usize = 10;

/// Drives one solve from an initial [`Graph`] to a terminal [`Outcome`].
pub struct SearchEngine;

impl SearchEngine {
    pub fn solve(graph: &Graph, config: &SolverConfig, sink: &dyn SolutionSink) -> Result<Outcome, SlitherError> {
        let mut root = State::initial(graph);
        let mut propagator = Propagator::new(graph);
        let parallel_depth = config.parallel_depth.unwrap_or_else(|| auto_parallel_depth(graph));
        log::info!(
            "starting solve: {} edges, {} clue cells, parallel_depth={}",
            graph.edge_count(),
            graph.clue_cells().len(),
            parallel_depth
        );

        let canonical = (config.canonical_only && config.find_all).then(|| CanonicalFilter::new(graph));

        let shared = Shared {
            graph,
            config,
            sink,
            cutoff: Cutoff::manual(),
            reason: AtomicU8::new(REASON_NONE),
            canonical,
            parallel_depth,
            explored: AtomicU64::new(0),
            solutions_found: AtomicUsize::new(0),
            queue: Mutex::new(VecDeque::new()),
            monitor: Condvar::new(),
            ongoing: AtomicUsize::new(0),
        };

        let root_ok = propagator.propagate_all(&mut root).is_ok()
            && (!config.lookahead || propagator.lookahead(&mut root).is_ok());
        if root_ok {
            shared.push_pending(root, 0);
        }

        let worker_count = config.resolved_worker_count().max(1);
        std::thread::scope(|scope| {
            if let Some(budget) = config.timeout {
                scope.spawn(|| {
                    std::thread::sleep(budget);
                    shared.signal(REASON_TIMEOUT);
                });
            }
            for _ in 0..worker_count {
                scope.spawn(|| worker_loop(&shared));
            }
        });

        let solutions_found = shared.solutions_found.load(Ordering::Relaxed);
        let explored = shared.explored.load(Ordering::Relaxed);
        let outcome = match shared.reason.load(Ordering::Relaxed) {
            REASON_FIRST => Outcome::StoppedByFirst { explored },
            REASON_CAP => Outcome::Capped { solutions_found, explored },
            REASON_TIMEOUT => Outcome::Timeout { solutions_found, explored },
            _ => Outcome::Completed { solutions_found, explored },
        };
        log::info!("solve finished: {outcome:?}");
        Ok(outcome)
    }
}

fn worker_loop(shared: &Shared<'_>) {
    loop {
        let branch = {
            let mut guard = shared.queue.lock();
            loop {
                if let Some(b) = guard.pop_front() {
                    break Some(b);
                }
                if shared.ongoing.load(Ordering::Relaxed) == 0 {
                    break None;
                }
                shared.monitor.wait_for(&mut guard, Duration::from_millis(50));
            }
        };
        match branch {
            None => return,
            Some(b) => {
                explore(shared, b.state, b.depth);
                shared.finish_one();
            }
        }
    }
}

fn explore(shared: &Shared<'_>, state: State, depth: usize) {
    if shared.cutoff.is_set() {
        return;
    }
    shared.explored.fetch_add(1, Ordering::Relaxed);

    if is_definitely_unsolvable(shared.graph, &state) {
        return;
    }

    match Heuristic::select(shared.graph, &state) {
        Selection::AllDecided => {
            if let Ok(cycle) = Validator::validate(shared.graph, &state) {
                shared.accept(state.edges().to_vec(), cycle);
            }
        }
        Selection::Edge(e) => {
            let lookahead = shared.config.lookahead;
            let mut off_state = state.clone();
            let off_ok = decide(shared.graph, &mut off_state, e, EdgeAssignment::Off, lookahead);

            let mut on_state = state;
            let on_ok = decide(shared.graph, &mut on_state, e, EdgeAssignment::On, lookahead);

            match (off_ok, on_ok) {
                (true, true) => {
                    if depth < shared.parallel_depth && off_state.unknown_count() > FORK_MIN_UNKNOWN_EDGES {
                        shared.push_pending(off_state, depth + 1);
                    } else {
                        explore(shared, off_state, depth + 1);
                    }
                    explore(shared, on_state, depth + 1);
                }
                (true, false) => explore(shared, off_state, depth + 1),
                (false, true) => explore(shared, on_state, depth + 1),
                (false, false) => {}
            }
        }
    }
}

fn decide(graph: &Graph, state: &mut State, e: usize, value: EdgeAssignment, lookahead: bool) -> bool {
    if state.assign(graph, e, value).is_err() {
        return false;
    }
    let mut propagator = Propagator::new(graph);
    if propagator.propagate_from(state, e).is_err() {
        return false;
    }
    !lookahead || propagator.lookahead(state).is_ok()
}

/// Structural guard applied after propagation reaches fixpoint, catching
/// residual infeasibility that the per-assignment checks in
/// [`State::assign`] do not observe on their own (e.g. a point stuck at
/// on-degree 1 with no unknown edges left to complete it).
fn is_definitely_unsolvable(graph: &Graph, state: &State) -> bool {
    for p in 0..graph.point_count() {
        if state.point_on_degree(p) == 1 && state.point_unknown_degree(p) == 0 {
            return true;
        }
    }
    for &c in graph.clue_cells() {
        let clue = graph.cell_clue(c).expect("clue_cells only lists clue-bearing cells");
        let on = state.cell_on_count(c);
        let unknown = state.cell_unknown_count(c);
        if on > clue || on + unknown < clue {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfigBuilder;
    use crate::graph::GraphBuilder;
    use crate::grid::Grid;
    use crate::sink::VecSink;

    fn solve_grid(rows: usize, cols: usize, clues: Vec<Option<u8>>, config: SolverConfig) -> (Outcome, VecSink) {
        let grid = Grid::new(rows, cols, clues).unwrap();
        let graph = GraphBuilder::build(&grid).unwrap();
        let sink = VecSink::new();
        let outcome = SearchEngine::solve(&graph, &config, &sink).unwrap();
        (outcome, sink)
    }

    #[test]
    fn two_by_two_all_threes_has_one_solution() {
        let (outcome, sink) = solve_grid(
            2,
            2,
            vec![Some(3); 4],
            SolverConfigBuilder::default().find_all(true).build().unwrap(),
        );
        assert!(matches!(outcome, Outcome::Completed { solutions_found: 1, .. }));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn all_zero_grid_has_no_solutions() {
        let (outcome, sink) = solve_grid(
            2,
            2,
            vec![Some(0); 4],
            SolverConfigBuilder::default().find_all(true).build().unwrap(),
        );
        assert!(matches!(outcome, Outcome::Completed { solutions_found: 0, .. }));
        assert!(sink.is_empty());
    }

    #[test]
    fn first_only_mode_stops_after_one_solution() {
        // an unclued 2x2 grid admits several simple cycles (each unit square,
        // each domino of two adjacent squares, and the outer perimeter), so
        // find_all would find more than one.
        let (outcome, sink) = solve_grid(
            2,
            2,
            vec![None; 4],
            SolverConfigBuilder::default().find_all(false).build().unwrap(),
        );
        assert!(matches!(outcome, Outcome::StoppedByFirst { .. }));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn find_all_on_unclued_grid_finds_more_than_one_solution() {
        let (outcome, sink) = solve_grid(
            2,
            2,
            vec![None; 4],
            SolverConfigBuilder::default().find_all(true).build().unwrap(),
        );
        assert!(matches!(outcome, Outcome::Completed { .. }));
        assert!(sink.len() > 1);
    }

    #[test]
    fn unsatisfiable_dense_grid_reports_zero_solutions() {
        // a 3 clue cell sharing all four edges with 0-clue neighbors is infeasible
        let clues = vec![
            Some(0), Some(0), Some(0),
            Some(0), Some(3), Some(0),
            Some(0), Some(0), Some(0),
        ];
        let (outcome, sink) = solve_grid(
            3,
            3,
            clues,
            SolverConfigBuilder::default().find_all(true).build().unwrap(),
        );
        assert!(matches!(outcome, Outcome::Completed { solutions_found: 0, .. }));
        assert!(sink.is_empty());
    }

    #[test]
    fn timeout_returns_promptly_even_if_unsolved() {
        let clues = vec![None; 15 * 15];
        let (outcome, _sink) = solve_grid(
            15,
            15,
            clues,
            SolverConfigBuilder::default()
                .find_all(true)
                .timeout(Some(Duration::from_millis(50)))
                .build()
                .unwrap(),
        );
        assert!(matches!(outcome, Outcome::Timeout { .. }));
    }

    #[test]
    fn lookahead_mode_finds_the_same_unique_solution() {
        let (outcome, sink) = solve_grid(
            2,
            2,
            vec![Some(3); 4],
            SolverConfigBuilder::default().find_all(true).lookahead(true).build().unwrap(),
        );
        assert!(matches!(outcome, Outcome::Completed { solutions_found: 1, .. }));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn auto_parallel_depth_matches_density_formula() {
        let grid = Grid::new(10, 10, {
            let mut cells = vec![None; 100];
            for c in cells.iter_mut().take(16) {
                *c = Some(2);
            }
            cells
        })
        .unwrap();
        let graph = GraphBuilder::build(&grid).unwrap();
        assert_eq!(auto_parallel_depth(&graph), 26);
    }
}
