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

//! The puzzle input: a rectangular grid of cells, each optionally bearing a
//! clue in `0..=3`. This is the only type a caller needs to construct by
//! hand (or via [`crate::text_format`]) before handing it to
//! [`crate::graph::GraphBuilder`].

use crate::error::InvalidGrid;

/// A cell's clue, or the absence of one.
pub type Clue = Option<u8>;

/// An immutable rectangular grid of clues.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Clue>,
}

impl Grid {
    /// Builds a grid from a row-major flattening of `rows * cols` clues.
    ///
    /// # Errors
    /// Returns [`InvalidGrid::EmptyDimensions`] if `rows == 0 || cols == 0`,
    /// or [`InvalidGrid::ClueOutOfRange`] if any clue exceeds 3.
    pub fn new(rows: usize, cols: usize, cells: Vec<Clue>) -> Result<Self, InvalidGrid> {
        if rows == 0 || cols == 0 {
            return Err(InvalidGrid::EmptyDimensions { rows, cols });
        }
        if cells.len() != rows * cols {
            return Err(InvalidGrid::RaggedRow {
                row: cells.len() / cols.max(1),
                found: cells.len(),
                expected: rows * cols,
            });
        }
        for (idx, clue) in cells.iter().enumerate() {
            if let Some(c) = clue {
                if *c > 3 {
                    return Err(InvalidGrid::ClueOutOfRange {
                        row: idx / cols,
                        col: idx % cols,
                        clue: *c,
                    });
                }
            }
        }
        Ok(Self { rows, cols, cells })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// The clue at `(row, col)`, row-major, zero-indexed.
    #[inline]
    pub fn clue(&self, row: usize, col: usize) -> Clue {
        self.cells[row * self.cols + col]
    }

    /// Number of cells that carry a clue (as opposed to being blank).
    pub fn clue_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Fraction of cells that carry a clue, in `[0, 1]`.
    pub fn clue_density(&self) -> f64 {
        self.clue_count() as f64 / self.cell_count() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            Grid::new(0, 3, vec![]),
            Err(InvalidGrid::EmptyDimensions { rows: 0, cols: 3 })
        );
    }

    #[test]
    fn rejects_out_of_range_clue() {
        let err = Grid::new(1, 1, vec![Some(4)]).unwrap_err();
        assert_eq!(
            err,
            InvalidGrid::ClueOutOfRange { row: 0, col: 0, clue: 4 }
        );
    }

    #[test]
    fn rejects_ragged_row() {
        let err = Grid::new(2, 2, vec![Some(1), None, Some(2)]).unwrap_err();
        assert!(matches!(err, InvalidGrid::RaggedRow { .. }));
    }

    #[test]
    fn accepts_well_formed_grid() {
        let g = Grid::new(2, 2, vec![Some(3), None, None, Some(3)]).unwrap();
        assert_eq!(g.rows(), 2);
        assert_eq!(g.cols(), 2);
        assert_eq!(g.clue(0, 0), Some(3));
        assert_eq!(g.clue(0, 1), None);
        assert_eq!(g.clue_count(), 2);
        assert!((g.clue_density() - 0.5).abs() < 1e-9);
    }
}
