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

//! Error types surfaced by this crate. Branch-local failures (a decision that
//! contradicts an already-decided edge, a candidate that fails final
//! validation) are never promoted to [`SlitherError`]; they are plain
//! `Result`s consumed inside the search and never escape it.

use std::fmt;

/// Anything that can go wrong while building a graph, configuring a solve, or
/// running one to completion.
#[derive(Debug, thiserror::Error)]
pub enum SlitherError {
    /// The grid handed to [`crate::graph::GraphBuilder`] is not a valid puzzle.
    #[error("invalid grid: {0}")]
    InvalidGrid(#[from] InvalidGrid),

    /// A configuration value is out of its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Allocation or another unrecoverable resource failure occurred while
    /// the search was running.
    #[error("resource exhausted: {0}")]
    ResourceExhaustion(String),
}

/// Why a grid was rejected before any search began.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum InvalidGrid {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyDimensions { rows: usize, cols: usize },
    #[error("clue {clue} at cell ({row}, {col}) is out of range 0..=3")]
    ClueOutOfRange { row: usize, col: usize, clue: u8 },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, found: usize, expected: usize },
}

/// A branch-local failure: some edge assignment is incompatible with an
/// already-decided edge, or with the invariants a clue or a point must
/// satisfy. Recovered by discarding the branch that produced it; never
/// surfaced to a caller of the public API.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Contradiction;

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "contradiction")
    }
}

/// Why a fully-decided state was rejected by the validator. Like
/// [`Contradiction`], this never escapes the search as a public error: it is
/// simply "no solution at this leaf".
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ValidatorRejection {
    /// A clue cell's `On` edge count does not equal its clue.
    ClueViolation { cell: usize },
    /// A point has a degree other than 0 or 2.
    PointDegreeViolation { point: usize },
    /// No edge is `On`: the only candidate is the empty loop, which is never
    /// a valid solution.
    EmptyLoop,
    /// The `On` edges form more than one cycle.
    MultipleCycles,
    /// The walk used to extract the cycle reached a point with no unvisited
    /// `On` edge to continue on, before returning to the start.
    DanglingEndpoint { point: usize },
}

impl fmt::Display for ValidatorRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatorRejection::ClueViolation { cell } => {
                write!(f, "clue violated at cell {cell}")
            }
            ValidatorRejection::PointDegreeViolation { point } => {
                write!(f, "point {point} has degree other than 0 or 2")
            }
            ValidatorRejection::EmptyLoop => write!(f, "empty loop"),
            ValidatorRejection::MultipleCycles => write!(f, "multiple disjoint cycles"),
            ValidatorRejection::DanglingEndpoint { point } => {
                write!(f, "dangling endpoint at point {point}")
            }
        }
    }
}
