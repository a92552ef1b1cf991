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

//! Where validated solutions go. The search engine only ever talks to a
//! [`SolutionSink`]; the default in-memory implementation is provided for
//! convenience, but callers are free to substitute their own (bounded
//! queue, file writer, progress bar, ...).

use parking_lot::Mutex;

use crate::state::EdgeAssignment;
use crate::validate::Cycle;

/// One accepted solution: its loop, plus the full edge-assignment snapshot
/// it was extracted from.
#[derive(Debug, Clone)]
pub struct Solution {
    pub cycle: Cycle,
    pub edges: Vec<EdgeAssignment>,
}

/// Narrow write-only interface the search engine uses to deliver solutions.
/// Implementations must be safe to call concurrently from multiple worker
/// threads.
pub trait SolutionSink: Send + Sync {
    /// Accepts a newly validated solution. Returns the number of solutions
    /// accepted so far (including this one), which the caller uses to
    /// enforce `max_solutions`.
    fn offer(&self, solution: Solution) -> usize;
}

/// Default sink: everything accumulates in memory behind a single mutex, so
/// concurrent workers serialize their writes the same way they already
/// serialize access to the shared pending-work queue.
#[derive(Default)]
pub struct VecSink {
    solutions: Mutex<Vec<Solution>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains and returns every solution collected so far.
    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions.into_inner()
    }

    pub fn len(&self) -> usize {
        self.solutions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SolutionSink for VecSink {
    fn offer(&self, solution: Solution) -> usize {
        let mut guard = self.solutions.lock();
        guard.push(solution);
        guard.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_solution() -> Solution {
        Solution {
            cycle: Cycle::test_only_from_points(vec![(0, 0), (0, 1), (0, 0)]),
            edges: vec![EdgeAssignment::On],
        }
    }

    #[test]
    fn vec_sink_reports_running_count() {
        let sink = VecSink::new();
        assert_eq!(sink.offer(dummy_solution()), 1);
        assert_eq!(sink.offer(dummy_solution()), 2);
        assert_eq!(sink.len(), 2);
    }
}
