/*
connectors.rs

Copyright 2026 The Mathtrail developers

This file is part of Mathtrail.

Mathtrail is free software: you can redistribute it and/or modify it under
the terms of the GNU General Public License as published by the Free
Software Foundation, either version 3 of the License, or (at your option)
any later version.

Mathtrail is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
details.

You should have received a copy of the GNU General Public License along with
Mathtrail. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Connectors between adjacent cells, and the diagonal layout of the grid.
//!
//! Every pair of horizontally or vertically adjacent cells is linked by a
//! connector. Each 2x2 block of cells additionally holds exactly one
//! diagonal connector, in one of two orientations. A block is identified by
//! the coordinate of its top-left cell.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::grid;

/// Orientation of the diagonal connector inside a 2x2 block.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum DiagonalOrientation {
    /// Top-left cell to bottom-right cell.
    Main,

    /// Top-right cell to bottom-left cell.
    Anti,
}

/// Kind of a connector.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConnectorKind {
    Horizontal,
    Vertical,
    Diagonal(DiagonalOrientation),
}

/// Diagonal orientations committed by the path generator.
///
/// When the solution path crosses a 2x2 block diagonally, the block's
/// orientation is fixed. A commitment is never overwritten: committing the
/// opposite orientation of an already-committed block is an error.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DiagonalCommitments {
    commitments: HashMap<grid::Coordinate, DiagonalOrientation>,
}

impl DiagonalCommitments {
    /// Create a [`DiagonalCommitments`] object.
    pub fn new() -> Self {
        Self {
            commitments: HashMap::new(),
        }
    }

    /// Return the committed orientation of the given block, if any.
    pub fn get(&self, block: grid::Coordinate) -> Option<DiagonalOrientation> {
        self.commitments.get(&block).copied()
    }

    /// Commit the orientation of the given block.
    ///
    /// Re-committing the same orientation is a no-op.
    ///
    /// # Errors
    ///
    /// Return an error when the block is already committed to the opposite
    /// orientation.
    pub fn insert(
        &mut self,
        block: grid::Coordinate,
        orientation: DiagonalOrientation,
    ) -> Result<(), String> {
        match self.commitments.get(&block) {
            Some(o) if *o != orientation => Err(format!(
                "block ({}, {}) is already committed to {o:?}",
                block.row, block.col
            )),
            Some(_) => Ok(()),
            None => {
                self.commitments.insert(block, orientation);
                Ok(())
            }
        }
    }

    /// Number of committed blocks.
    pub fn len(&self) -> usize {
        self.commitments.len()
    }

    /// Whether no block is committed.
    pub fn is_empty(&self) -> bool {
        self.commitments.is_empty()
    }
}

/// For two diagonally adjacent coordinates, return the block containing the
/// move and the orientation the move requires.
///
/// Return [`None`] when the coordinates are not diagonally adjacent.
pub fn diagonal_between(
    a: grid::Coordinate,
    b: grid::Coordinate,
) -> Option<(grid::Coordinate, DiagonalOrientation)> {
    if a.row.abs_diff(b.row) != 1 || a.col.abs_diff(b.col) != 1 {
        return None;
    }
    let block: grid::Coordinate = grid::Coordinate::new(a.row.min(b.row), a.col.min(b.col));
    let orientation: DiagonalOrientation = if (a.row < b.row) == (a.col < b.col) {
        DiagonalOrientation::Main
    } else {
        DiagonalOrientation::Anti
    };
    Some((block, orientation))
}

/// Endpoints of the diagonal connector of the given block.
pub fn diagonal_endpoints(
    block: grid::Coordinate,
    orientation: DiagonalOrientation,
) -> (grid::Coordinate, grid::Coordinate) {
    match orientation {
        DiagonalOrientation::Main => (
            grid::Coordinate::new(block.row, block.col),
            grid::Coordinate::new(block.row + 1, block.col + 1),
        ),
        DiagonalOrientation::Anti => (
            grid::Coordinate::new(block.row, block.col + 1),
            grid::Coordinate::new(block.row + 1, block.col),
        ),
    }
}

/// Edge of the puzzle graph between two adjacent cells, carrying one
/// integer value.
///
/// The endpoint pair is unordered; [`Connector::new`] normalizes it so two
/// connectors between the same cells always compare equal.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Connector {
    pub a: grid::Coordinate,
    pub b: grid::Coordinate,
    pub kind: ConnectorKind,

    /// Value of the connector. Zero until the value assignment step runs.
    pub value: u32,
}

impl Connector {
    /// Create a [`Connector`] object with normalized endpoints.
    pub fn new(a: grid::Coordinate, b: grid::Coordinate, kind: ConnectorKind) -> Self {
        if a <= b {
            Self { a, b, kind, value: 0 }
        } else {
            Self {
                a: b,
                b: a,
                kind,
                value: 0,
            }
        }
    }

    /// Whether the given coordinate is one endpoint of the connector.
    pub fn touches(&self, coordinate: grid::Coordinate) -> bool {
        self.a == coordinate || self.b == coordinate
    }

    /// Given one endpoint, return the other endpoint.
    pub fn other(&self, coordinate: grid::Coordinate) -> grid::Coordinate {
        if self.a == coordinate { self.b } else { self.a }
    }
}

/// Full connector set of a puzzle, with a per-cell incidence table.
///
/// The incidence table maps the row-major cell index to the indices of the
/// connectors touching that cell. It is built once while the set is
/// assembled, so the frequent "connectors of this cell" lookups never scan
/// the whole list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConnectorSet {
    rows: usize,
    cols: usize,
    connectors: Vec<Connector>,
    incidence: Vec<Vec<usize>>,
}

impl ConnectorSet {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            connectors: Vec::with_capacity(3 * rows * cols),
            incidence: vec![Vec::with_capacity(8); rows * cols],
        }
    }

    fn push(&mut self, connector: Connector) {
        let index: usize = self.connectors.len();
        self.incidence[connector.a.index(self.cols)].push(index);
        self.incidence[connector.b.index(self.cols)].push(index);
        self.connectors.push(connector);
    }

    /// Number of connectors in the set.
    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    /// All the connectors, in emission order.
    pub fn all(&self) -> &[Connector] {
        &self.connectors
    }

    /// Return the connector at the given index.
    pub fn get(&self, index: usize) -> &Connector {
        &self.connectors[index]
    }

    /// Set the value of the connector at the given index.
    pub(crate) fn set_value(&mut self, index: usize, value: u32) {
        self.connectors[index].value = value;
    }

    /// Indices of the connectors touching the given cell.
    pub fn incident(&self, coordinate: grid::Coordinate) -> &[usize] {
        &self.incidence[coordinate.index(self.cols)]
    }

    /// Index of the connector between the two given cells, if any.
    pub fn between(&self, a: grid::Coordinate, b: grid::Coordinate) -> Option<usize> {
        self.incident(a)
            .iter()
            .copied()
            .find(|&i| self.connectors[i].touches(b))
    }
}

/// Resolve the diagonal orientation of every 2x2 block.
///
/// Blocks committed by the path generator keep their orientation; all the
/// other blocks get a random one. The result is indexed by block row and
/// block column ((rows - 1) x (cols - 1) entries).
pub fn build_diagonal_grid(
    rows: usize,
    cols: usize,
    commitments: &DiagonalCommitments,
    rng: &mut impl Rng,
) -> Vec<Vec<DiagonalOrientation>> {
    let mut diagonal_grid: Vec<Vec<DiagonalOrientation>> = Vec::with_capacity(rows - 1);

    for row in 0..rows - 1 {
        let mut block_row: Vec<DiagonalOrientation> = Vec::with_capacity(cols - 1);
        for col in 0..cols - 1 {
            let orientation: DiagonalOrientation =
                match commitments.get(grid::Coordinate::new(row, col)) {
                    Some(o) => o,
                    None => {
                        if rng.random_bool(0.5) {
                            DiagonalOrientation::Main
                        } else {
                            DiagonalOrientation::Anti
                        }
                    }
                };
            block_row.push(orientation);
        }
        diagonal_grid.push(block_row);
    }
    diagonal_grid
}

/// Emit the full connector set for the grid.
///
/// The enumeration is deterministic: `rows x (cols - 1)` horizontal
/// connectors, `(rows - 1) x cols` vertical connectors, and one diagonal
/// connector per block following the resolved orientation, which guarantees
/// the one-diagonal-per-block invariant by construction.
pub fn build_connector_graph(
    rows: usize,
    cols: usize,
    diagonal_grid: &[Vec<DiagonalOrientation>],
) -> ConnectorSet {
    let mut set: ConnectorSet = ConnectorSet::new(rows, cols);

    for row in 0..rows {
        for col in 0..cols - 1 {
            set.push(Connector::new(
                grid::Coordinate::new(row, col),
                grid::Coordinate::new(row, col + 1),
                ConnectorKind::Horizontal,
            ));
        }
    }

    for row in 0..rows - 1 {
        for col in 0..cols {
            set.push(Connector::new(
                grid::Coordinate::new(row, col),
                grid::Coordinate::new(row + 1, col),
                ConnectorKind::Vertical,
            ));
        }
    }

    for (row, block_row) in diagonal_grid.iter().enumerate() {
        for (col, orientation) in block_row.iter().enumerate() {
            let (a, b) = diagonal_endpoints(grid::Coordinate::new(row, col), *orientation);
            set.push(Connector::new(a, b, ConnectorKind::Diagonal(*orientation)));
        }
    }
    set
}
