/*
answers.rs

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

//! Derive the cell answers from the path and the connector values.
//!
//! A path cell's answer is the value of the connector leading to the next
//! path cell, which is what makes the solution followable. Every other cell
//! is a decoy: its answer points at a random incident connector, so
//! following it is possible but leads nowhere in particular. This
//! misdirection is intentional. The finish cell gets no answer.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::connectors;
use super::grid;
use super::path;

/// Build the cell grid and assign every answer.
pub fn assign_cell_answers(
    rows: usize,
    cols: usize,
    path: &path::Path,
    connectors: &connectors::ConnectorSet,
    rng: &mut impl Rng,
) -> grid::CellGrid {
    let mut cells: grid::CellGrid = grid::CellGrid::new(rows, cols);

    // Path cells: point at the connector toward the next path cell
    for pair in path.get().windows(2) {
        if let Some(index) = connectors.between(pair[0], pair[1]) {
            cells.get_mut(pair[0]).answer = Some(connectors.get(index).value);
        }
    }

    // Decoy cells: point at a random incident connector
    let finish: grid::Coordinate = grid::finish_coordinate(rows, cols);
    for row in 0..rows {
        for col in 0..cols {
            let coordinate: grid::Coordinate = grid::Coordinate::new(row, col);
            if coordinate == finish || path.contains(coordinate) {
                continue;
            }
            if let Some(&index) = connectors.incident(coordinate).choose(rng) {
                cells.get_mut(coordinate).answer = Some(connectors.get(index).value);
            }
        }
    }
    cells
}

/// Cell the player reaches by following the given cell's answer.
///
/// The answer matches the value of exactly one incident connector (the
/// local-uniqueness invariant), so the move is unambiguous. Return [`None`]
/// for an answerless cell (the finish).
pub fn exit_cell(
    cell: &grid::Cell,
    connectors: &connectors::ConnectorSet,
) -> Option<grid::Coordinate> {
    let answer: u32 = cell.answer?;
    connectors
        .incident(cell.coordinate)
        .iter()
        .map(|&index| connectors.get(index))
        .find(|c| c.value == answer)
        .map(|c| c.other(cell.coordinate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::random_path;
    use crate::generator::values;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build_attempt(
        rows: usize,
        cols: usize,
        seed: u64,
    ) -> (path::Path, connectors::ConnectorSet, grid::CellGrid) {
        let mut rng: StdRng = StdRng::seed_from_u64(seed);
        let cells_total: usize = rows * cols;
        let mut generator: random_path::RandomPath = random_path::RandomPath::new(
            rows,
            cols,
            (cells_total * 60).div_ceil(100),
            cells_total * 85 / 100,
        );
        let (path, commitments) = generator.generate(&mut rng).expect("path");
        let diagonal_grid = connectors::build_diagonal_grid(rows, cols, &commitments, &mut rng);
        let mut set = connectors::build_connector_graph(rows, cols, &diagonal_grid);
        values::assign_connector_values(&mut set, 1, 16, &mut rng).expect("values");
        let cells = assign_cell_answers(rows, cols, &path, &set, &mut rng);
        (path, set, cells)
    }

    #[test]
    fn path_cells_point_at_the_next_path_cell() {
        let (path, set, cells) = build_attempt(3, 4, 42);
        for pair in path.get().windows(2) {
            let index: usize = set.between(pair[0], pair[1]).expect("connector");
            assert_eq!(cells.get(pair[0]).answer, Some(set.get(index).value));
        }
    }

    #[test]
    fn the_finish_cell_has_no_answer() {
        let (_, _, cells) = build_attempt(3, 4, 7);
        assert_eq!(cells.get(grid::Coordinate::new(2, 3)).answer, None);
        // And it is the only answerless cell
        assert_eq!(cells.iter().filter(|c| c.answer.is_none()).count(), 1);
    }

    #[test]
    fn decoy_answers_match_an_incident_connector() {
        let (path, set, cells) = build_attempt(4, 5, 11);
        for cell in cells.iter() {
            if path.contains(cell.coordinate) || cell.is_finish {
                continue;
            }
            let answer: u32 = cell.answer.expect("decoy answer");
            let matching: usize = set
                .incident(cell.coordinate)
                .iter()
                .filter(|&&i| set.get(i).value == answer)
                .count();
            assert_eq!(matching, 1);
        }
    }

    #[test]
    fn following_the_answers_walks_the_path() {
        let (path, set, cells) = build_attempt(3, 4, 3);
        let mut current: grid::Coordinate = grid::start_coordinate();
        for expected in path.get().iter().skip(1) {
            current = exit_cell(cells.get(current), &set).expect("exit");
            assert_eq!(current, *expected);
        }
        assert_eq!(exit_cell(cells.get(current), &set), None);
    }
}
