/*
grid.rs

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

//! Coordinates and cells of the puzzle grid.

use serde::{Deserialize, Serialize};

/// Position of a cell in the grid, 0-indexed.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    /// Create a [`Coordinate`] object.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to the other coordinate.
    pub fn manhattan_distance(&self, other: &Coordinate) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Whether the other coordinate is one of the up-to-8 grid neighbors
    /// (horizontal, vertical, or diagonal).
    pub fn is_adjacent(&self, other: &Coordinate) -> bool {
        *self != *other && self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }

    /// Row-major index of the coordinate in a grid with `cols` columns.
    pub fn index(&self, cols: usize) -> usize {
        self.row * cols + self.col
    }
}

/// The start cell of every puzzle.
pub fn start_coordinate() -> Coordinate {
    Coordinate::new(0, 0)
}

/// The finish cell of a puzzle with the given dimensions.
pub fn finish_coordinate(rows: usize, cols: usize) -> Coordinate {
    Coordinate::new(rows - 1, cols - 1)
}

/// A cell of the puzzle grid.
///
/// The answer is the value of exactly one connector touching the cell; the
/// finish cell never has one. The expression is empty until the expression
/// synthesis step fills it in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub coordinate: Coordinate,
    pub answer: Option<u32>,
    pub expression: String,
    pub is_start: bool,
    pub is_finish: bool,
}

/// Row-major grid of cells.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Create a grid of answerless cells with the start and finish flags
    /// set.
    pub fn new(rows: usize, cols: usize) -> Self {
        let start: Coordinate = start_coordinate();
        let finish: Coordinate = finish_coordinate(rows, cols);
        let mut cells: Vec<Cell> = Vec::with_capacity(rows * cols);

        for row in 0..rows {
            for col in 0..cols {
                let coordinate: Coordinate = Coordinate::new(row, col);
                cells.push(Cell {
                    coordinate,
                    answer: None,
                    expression: String::new(),
                    is_start: coordinate == start,
                    is_finish: coordinate == finish,
                });
            }
        }
        Self { rows, cols, cells }
    }

    /// Number of cell rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cell columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Return the cell at the given coordinate.
    pub fn get(&self, coordinate: Coordinate) -> &Cell {
        &self.cells[coordinate.index(self.cols)]
    }

    /// Return the cell at the given coordinate for update.
    pub fn get_mut(&mut self, coordinate: Coordinate) -> &mut Cell {
        &mut self.cells[coordinate.index(self.cols)]
    }

    /// Iterate over the cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterate over the cells in row-major order, for update.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }
}
