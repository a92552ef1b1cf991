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

//! Optional deduplication filter for enumerate mode: suppresses a solution
//! that is the horizontal mirror of one already accepted.
//!
//! Only horizontal reflection is considered. A rectangular grid has up to
//! eight symmetries (two reflections and, when square, the dihedral group
//! of the square), but this filter intentionally implements one of them;
//! see the crate-level design notes for why.

use std::hash::Hash;

use dashmap::DashSet;

use crate::graph::Graph;
use crate::state::EdgeAssignment;

/// A canonical key: for each solution, the lexicographically smaller of its
/// own edge-assignment vector and its horizontal-mirror's, so that a
/// solution and its mirror always hash to the same entry.
#[derive(Clone, Eq, PartialEq, Hash)]
struct CanonicalKey(Vec<u8>);

/// Concurrently-shared "seen canonical forms" set, checked and inserted
/// atomically per key the same way the dominance checker this is modeled on
/// avoids a global lock: a lock-free per-key entry in a `DashSet`.
pub struct CanonicalFilter {
    mirror_edge: Vec<usize>,
    seen: DashSet<CanonicalKey, fxhash::FxBuildHasher>,
}

impl CanonicalFilter {
    /// Precomputes, for every edge, the id of its horizontal-mirror edge.
    pub fn new(graph: &Graph) -> Self {
        let cols = graph.cols();
        let mirror_point = |p: usize| -> usize {
            let (r, c) = graph.point_coords(p);
            r * (cols + 1) + (cols - c)
        };
        let mut mirror_edge = vec![usize::MAX; graph.edge_count()];
        let mut lookup = std::collections::HashMap::new();
        for e in 0..graph.edge_count() {
            let edge = graph.edge(e);
            let mut key = [mirror_point(edge.u), mirror_point(edge.v)];
            key.sort_unstable();
            lookup.insert(key, e);
        }
        for e in 0..graph.edge_count() {
            let edge = graph.edge(e);
            let mut key = [mirror_point(edge.u), mirror_point(edge.v)];
            key.sort_unstable();
            mirror_edge[e] = *lookup.get(&key).expect("mirror of every edge exists on a rectangular grid");
        }
        Self {
            mirror_edge,
            seen: DashSet::default(),
        }
    }

    fn encode(edges: &[EdgeAssignment]) -> Vec<u8> {
        edges.iter().map(|a| *a as u8).collect()
    }

    fn mirror(&self, edges: &[EdgeAssignment]) -> Vec<u8> {
        let mut out = vec![0u8; edges.len()];
        for (e, assignment) in edges.iter().enumerate() {
            out[self.mirror_edge[e]] = *assignment as u8;
        }
        out
    }

    /// Returns `true` if this exact solution (or its horizontal mirror) has
    /// already been accepted, inserting it as seen if not.
    pub fn is_duplicate_or_insert(&self, edges: &[EdgeAssignment]) -> bool {
        let own = Self::encode(edges);
        let mirrored = self.mirror(edges);
        let canonical = if own <= mirrored { own } else { mirrored };
        !self.seen.insert(CanonicalKey(canonical))
    }
}
