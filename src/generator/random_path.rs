/*
random_path.rs

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

//! Generate a random solution path.
//!
//! The path is a self-avoiding walk from the top-left cell to the
//! bottom-right cell over the 8-neighborhood of the grid. Diagonal moves
//! commit the orientation of the 2x2 block they cross; a later move can
//! never claim the opposite orientation of a committed block.

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fmt;

use super::connectors;
use super::grid;
use super::path;

// Default number of internal walk attempts before giving up.
const MAX_ATTEMPTS: usize = 100;

// A path must turn at least this many times to be worth playing.
const MIN_DIRECTION_CHANGES: usize = 3;

// Weight of the pull toward the finish cell as the walk grows long.
const FINISH_BIAS: f64 = 0.7;

// Candidate moves in a fixed enumeration order: up, down, left, right, then
// the four diagonals.
const MOVES: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RandomPathError {
    /// Every internal attempt got stuck, overran the maximum length, or
    /// produced a path failing the length or interestingness requirements.
    AttemptsExhausted {
        attempts: usize,
        min_length: usize,
        max_length: usize,
    },
}

impl fmt::Display for RandomPathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RandomPathError::AttemptsExhausted {
                attempts,
                min_length,
                max_length,
            } => write!(
                f,
                "no path with length in [{min_length}, {max_length}] found after \
                 {attempts} attempts"
            ),
        }
    }
}

/// [`RandomPath`] object.
pub struct RandomPath {
    /// Number of cell rows in the grid.
    pub rows: usize,

    /// Number of cell columns in the grid.
    pub cols: usize,

    /// Smallest acceptable path length, in cells.
    pub min_length: usize,

    /// Largest acceptable path length, in cells.
    pub max_length: usize,

    /// Internal attempt budget.
    pub max_attempts: usize,

    /// Number of attempts it took to generate the last path.
    pub attempts: usize,
}

impl RandomPath {
    /// Create the object.
    pub fn new(rows: usize, cols: usize, min_length: usize, max_length: usize) -> Self {
        Self {
            rows,
            cols,
            min_length,
            max_length,
            max_attempts: MAX_ATTEMPTS,
            attempts: 0,
        }
    }

    /// Generate and return a random path with the diagonal orientations it
    /// committed.
    ///
    /// # Errors
    ///
    /// The method returns an error when no acceptable path is found within
    /// the internal attempt budget. The caller can retry, but a tight
    /// length window on a small grid is usually the cause.
    pub fn generate(
        &mut self,
        rng: &mut impl Rng,
    ) -> Result<(path::Path, connectors::DiagonalCommitments), RandomPathError> {
        self.attempts = 0;
        for attempt in 1..=self.max_attempts {
            self.attempts = attempt;
            if let Some(result) = self.walk(rng) {
                debug!(
                    "path of length {} found on attempt {attempt}",
                    result.0.len()
                );
                return Ok(result);
            }
        }
        Err(RandomPathError::AttemptsExhausted {
            attempts: self.max_attempts,
            min_length: self.min_length,
            max_length: self.max_length,
        })
    }

    /// Run one self-avoiding walk from start to finish.
    ///
    /// Return [`None`] when the walk gets stuck, overruns the maximum
    /// length, or ends with a path that is too short or too straight.
    fn walk(&self, rng: &mut impl Rng) -> Option<(path::Path, connectors::DiagonalCommitments)> {
        let finish: grid::Coordinate = grid::finish_coordinate(self.rows, self.cols);
        let mut path: path::Path = path::Path::new(self.max_length);
        let mut commitments: connectors::DiagonalCommitments =
            connectors::DiagonalCommitments::new();
        let mut current: grid::Coordinate = grid::start_coordinate();

        path.push(current);
        while current != finish {
            if path.len() >= self.max_length {
                debug!("    stuck: maximum length reached at ({}, {})", current.row, current.col);
                return None;
            }

            let candidates: Vec<grid::Coordinate> =
                self.candidate_moves(current, &path, &commitments);
            if candidates.is_empty() {
                debug!("    stuck: no eligible move from ({}, {})", current.row, current.col);
                return None;
            }

            // The pull toward the finish grows with the path, which keeps
            // early moves exploratory and late moves convergent.
            let progress_ratio: f64 = path.len() as f64 / self.max_length as f64;
            let next: grid::Coordinate = if rng.random_bool(progress_ratio * FINISH_BIAS) {
                *candidates
                    .iter()
                    .min_by_key(|c| c.manhattan_distance(&finish))?
            } else {
                *candidates.choose(rng)?
            };

            if let Some((block, orientation)) = connectors::diagonal_between(current, next)
                && commitments.insert(block, orientation).is_err()
            {
                // The candidate filter rules conflicting moves out, so a
                // conflict here is a precondition violation: fail the walk.
                debug!("    conflicting diagonal commitment at ({}, {})", block.row, block.col);
                return None;
            }
            path.push(next);
            current = next;
        }

        if path.len() < self.min_length {
            debug!("    path too short ({} < {})", path.len(), self.min_length);
            return None;
        }
        if path.direction_changes() < MIN_DIRECTION_CHANGES {
            debug!("    path too straight ({} turns)", path.direction_changes());
            return None;
        }
        Some((path, commitments))
    }

    /// Enumerate the legal moves from the given cell, in the fixed
    /// [`MOVES`] order: inside the grid, not visited, and not requiring the
    /// opposite orientation of a committed block.
    fn candidate_moves(
        &self,
        from: grid::Coordinate,
        path: &path::Path,
        commitments: &connectors::DiagonalCommitments,
    ) -> Vec<grid::Coordinate> {
        let mut candidates: Vec<grid::Coordinate> = Vec::with_capacity(MOVES.len());

        for (move_row, move_col) in MOVES {
            let row: isize = from.row as isize + move_row;
            let col: isize = from.col as isize + move_col;
            if row < 0 || row >= self.rows as isize || col < 0 || col >= self.cols as isize {
                continue;
            }

            let to: grid::Coordinate = grid::Coordinate::new(row as usize, col as usize);
            if path.contains(to) {
                continue;
            }
            if let Some((block, orientation)) = connectors::diagonal_between(from, to)
                && commitments.get(block).is_some_and(|o| o != orientation)
            {
                continue;
            }
            candidates.push(to);
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generates_a_valid_path_on_a_3x4_grid() {
        // min/max are 60%/85% of the 12 cells
        let mut rng: StdRng = StdRng::seed_from_u64(42);
        let mut generator: RandomPath = RandomPath::new(3, 4, 7, 10);
        let (path, commitments) = generator.generate(&mut rng).expect("path");

        assert_eq!(path.get_first(), Some(grid::Coordinate::new(0, 0)));
        assert_eq!(path.get_last(), Some(grid::Coordinate::new(2, 3)));
        assert!(path.len() >= 7 && path.len() <= 10, "length {}", path.len());
        assert!(generator.attempts >= 1 && generator.attempts <= 100);

        // No repeated coordinate, every consecutive pair adjacent
        let coordinates: &Vec<grid::Coordinate> = path.get();
        for (i, a) in coordinates.iter().enumerate() {
            for b in coordinates.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        for pair in coordinates.windows(2) {
            assert!(pair[0].is_adjacent(&pair[1]));
        }

        // Every diagonal step is committed
        for pair in coordinates.windows(2) {
            if let Some((block, orientation)) = connectors::diagonal_between(pair[0], pair[1]) {
                assert_eq!(commitments.get(block), Some(orientation));
            }
        }
    }

    #[test]
    fn paths_are_interesting() {
        let mut rng: StdRng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mut generator: RandomPath = RandomPath::new(4, 5, 12, 17);
            let (path, _) = generator.generate(&mut rng).expect("path");
            assert!(path.direction_changes() >= 3);
        }
    }

    #[test]
    fn impossible_bounds_exhaust_the_attempts() {
        // A 2x2 grid has no room for a 4-cell path with 3 turns
        let mut rng: StdRng = StdRng::seed_from_u64(9);
        let mut generator: RandomPath = RandomPath::new(2, 2, 4, 4);
        let result = generator.generate(&mut rng);
        assert_eq!(
            result,
            Err(RandomPathError::AttemptsExhausted {
                attempts: 100,
                min_length: 4,
                max_length: 4,
            })
        );
    }

    #[test]
    fn generation_is_deterministic_under_a_fixed_seed() {
        let mut generator: RandomPath = RandomPath::new(3, 4, 7, 10);
        let mut rng1: StdRng = StdRng::seed_from_u64(1234);
        let mut rng2: StdRng = StdRng::seed_from_u64(1234);
        let (path1, _) = generator.generate(&mut rng1).expect("path");
        let (path2, _) = generator.generate(&mut rng2).expect("path");
        assert_eq!(path1, path2);
    }
}
