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

//! A minimal parser for the plain-text puzzle format: a `rows cols` header
//! line followed by `rows` lines of whitespace-separated clue tokens (a
//! digit `0`-`3`, or `.`/`-`/`_` for no clue). This is not part of the core
//! engine's contract; it exists so the `demos` binary and the integration
//! tests have a concrete, human-writable input to point at.

use crate::error::InvalidGrid;
use crate::grid::Grid;

/// Parses the plain-text puzzle format described in the crate's external
/// interface notes.
pub fn parse(text: &str) -> Result<Grid, InvalidGrid> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    let header = lines.next().ok_or(InvalidGrid::EmptyDimensions { rows: 0, cols: 0 })?;
    let mut header_tokens = header.split_whitespace();
    let rows: usize = header_tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or(InvalidGrid::EmptyDimensions { rows: 0, cols: 0 })?;
    let cols: usize = header_tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or(InvalidGrid::EmptyDimensions { rows, cols: 0 })?;

    let mut cells = Vec::with_capacity(rows * cols);
    for (row, line) in lines.by_ref().take(rows).enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != cols {
            return Err(InvalidGrid::RaggedRow {
                row,
                found: tokens.len(),
                expected: cols,
            });
        }
        for (col, token) in tokens.into_iter().enumerate() {
            cells.push(parse_clue(token, row, col)?);
        }
    }

    Grid::new(rows, cols, cells)
}

fn parse_clue(token: &str, row: usize, col: usize) -> Result<Option<u8>, InvalidGrid> {
    match token {
        "." | "-" | "_" => Ok(None),
        digit => digit
            .parse::<u8>()
            .ok()
            .filter(|c| *c <= 3)
            .map(Some)
            .ok_or_else(|| InvalidGrid::ClueOutOfRange {
                row,
                col,
                clue: digit.parse().unwrap_or(255),
            }),
    }
}
