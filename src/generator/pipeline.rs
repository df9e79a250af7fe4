/*
pipeline.rs

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

//! Run the generation pipeline and assemble the puzzle.
//!
//! Each attempt runs the steps in sequence: path, diagonal layout,
//! connector graph, values, answers, expressions, validation. Every step
//! failure is local to the attempt; the orchestrator restarts the whole
//! pipeline with fresh randomness up to the configured attempt budget, and
//! only exhausting that budget is reported to the caller.

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::answers;
use super::connectors;
use super::expression;
use super::grid;
use super::path;
use super::random_path;
use super::values;
use crate::difficulty;
use crate::validator;

/// Options for [`generate_puzzle`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Number of full pipeline attempts before giving up.
    pub max_attempts: usize,

    /// Whether to run the validator as an acceptance gate on each
    /// generated puzzle.
    pub validate_result: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            validate_result: true,
        }
    }
}

/// Solution record of a puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// The hidden path from the start cell to the finish cell.
    pub path: path::Path,

    /// Number of moves along the path (path length minus one).
    pub num_steps: usize,
}

/// A fully generated, consistent puzzle.
///
/// Handed to the caller as an immutable snapshot; the generator keeps no
/// reference to it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Puzzle {
    pub id: u64,

    /// The configuration the puzzle was generated from.
    pub config: difficulty::DifficultyConfig,

    pub cells: grid::CellGrid,
    pub connectors: connectors::ConnectorSet,
    pub solution: Solution,
}

/// Failure of a single pipeline attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// The path generator exhausted its internal attempts.
    Path(String),

    /// A connector ran out of legal values.
    Values(String),

    /// The completed puzzle violated an invariant despite passing every
    /// generation step.
    Validation(Vec<String>),

    /// Any other fault, such as a malformed difficulty configuration.
    Unexpected(String),
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AttemptFailure::Path(message) => write!(f, "path generation failed: {message}"),
            AttemptFailure::Values(message) => write!(f, "value assignment failed: {message}"),
            AttemptFailure::Validation(errors) => {
                write!(f, "validation failed: {}", errors.join("; "))
            }
            AttemptFailure::Unexpected(message) => write!(f, "unexpected error: {message}"),
        }
    }
}

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Every attempt failed. The difficulty configuration may be too
    /// constrained.
    AttemptsExhausted {
        attempts: usize,
        last_failure: AttemptFailure,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerationError::AttemptsExhausted {
                attempts,
                last_failure,
            } => write!(
                f,
                "no puzzle generated after {attempts} attempts (last failure: {last_failure}); \
                 the difficulty configuration may be too constrained"
            ),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Generate a puzzle with the thread-local random source.
///
/// # Errors
///
/// Return [`GenerationError::AttemptsExhausted`] when no attempt produced
/// a valid puzzle.
pub fn generate_puzzle(
    config: &difficulty::DifficultyConfig,
    options: &GenerateOptions,
) -> Result<Puzzle, GenerationError> {
    generate_puzzle_with_rng(config, options, &mut rand::rng())
}

/// Generate a puzzle with the given random source.
///
/// With a seeded source, generation is fully deterministic.
///
/// # Errors
///
/// Return [`GenerationError::AttemptsExhausted`] when no attempt produced
/// a valid puzzle.
pub fn generate_puzzle_with_rng(
    config: &difficulty::DifficultyConfig,
    options: &GenerateOptions,
    rng: &mut impl Rng,
) -> Result<Puzzle, GenerationError> {
    let mut last_failure: AttemptFailure =
        AttemptFailure::Unexpected("no attempt was made".to_string());

    for attempt_number in 1..=options.max_attempts {
        match attempt(config, options, rng) {
            Ok(puzzle) => {
                debug!("puzzle {} generated on attempt {attempt_number}", puzzle.id);
                return Ok(puzzle);
            }
            Err(failure) => {
                if let AttemptFailure::Validation(errors) = &failure {
                    // A generated puzzle should never fail its own
                    // validation; log loudly and discard it.
                    warn!(
                        "attempt {attempt_number} produced an invalid puzzle: {}",
                        errors.join("; ")
                    );
                } else {
                    debug!("attempt {attempt_number} failed: {failure}");
                }
                last_failure = failure;
            }
        }
    }
    Err(GenerationError::AttemptsExhausted {
        attempts: options.max_attempts,
        last_failure,
    })
}

/// Run one full pipeline attempt.
fn attempt(
    config: &difficulty::DifficultyConfig,
    options: &GenerateOptions,
    rng: &mut impl Rng,
) -> Result<Puzzle, AttemptFailure> {
    config.check().map_err(AttemptFailure::Unexpected)?;

    let (min_length, max_length) = path_length_bounds(config);
    let mut path_generator: random_path::RandomPath =
        random_path::RandomPath::new(config.rows, config.cols, min_length, max_length);
    let (path, commitments) = path_generator
        .generate(rng)
        .map_err(|e| AttemptFailure::Path(e.to_string()))?;

    let diagonal_grid: Vec<Vec<connectors::DiagonalOrientation>> =
        connectors::build_diagonal_grid(config.rows, config.cols, &commitments, rng);
    let mut connector_set: connectors::ConnectorSet =
        connectors::build_connector_graph(config.rows, config.cols, &diagonal_grid);

    values::assign_connector_values(&mut connector_set, config.min_value, config.max_value, rng)
        .map_err(|e| AttemptFailure::Values(e.to_string()))?;

    let answer_grid: grid::CellGrid =
        answers::assign_cell_answers(config.rows, config.cols, &path, &connector_set, rng);
    let cells: grid::CellGrid = expression::apply_expressions(&answer_grid, config, rng);

    let num_steps: usize = path.len() - 1;
    let puzzle: Puzzle = Puzzle {
        id: rng.random(),
        config: config.clone(),
        cells,
        connectors: connector_set,
        solution: Solution { path, num_steps },
    };

    if options.validate_result {
        let report: validator::ValidationReport = validator::validate_puzzle(&puzzle);
        if !report.is_valid() {
            return Err(AttemptFailure::Validation(report.errors));
        }
    }
    Ok(puzzle)
}

/// Solution path length bounds, from the configured fractions of the cell
/// count. The lower bound never drops below 2 cells.
fn path_length_bounds(config: &difficulty::DifficultyConfig) -> (usize, usize) {
    let cell_count: f64 = (config.rows * config.cols) as f64;
    let min_length: usize = ((cell_count * config.min_path_fraction).round() as usize).max(2);
    let max_length: usize = ((cell_count * config.max_path_fraction).round() as usize)
        .max(min_length);
    (min_length, max_length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::{Difficulty, DifficultyConfig, OperationWeights};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn addition_only() -> OperationWeights {
        OperationWeights {
            addition: 1,
            subtraction: 0,
            multiplication: 0,
            division: 0,
        }
    }

    #[test]
    fn path_length_bounds_follow_the_fractions() {
        // 3x4 grid: 60%/85% of 12 cells is [7, 10]
        let config: DifficultyConfig = DifficultyConfig::custom(3, 4, 1, 16, addition_only());
        assert_eq!(path_length_bounds(&config), (7, 10));
    }

    #[test]
    fn generates_a_puzzle_on_the_smallest_grid() {
        let mut rng: StdRng = StdRng::seed_from_u64(42);
        let config: DifficultyConfig = DifficultyConfig::custom(3, 4, 1, 16, addition_only());
        let puzzle: Puzzle =
            generate_puzzle_with_rng(&config, &GenerateOptions::default(), &mut rng)
                .expect("puzzle");

        assert_eq!(puzzle.cells.rows(), 3);
        assert_eq!(puzzle.cells.cols(), 4);
        assert_eq!(puzzle.solution.num_steps, puzzle.solution.path.len() - 1);
        assert!(validator::validate_puzzle(&puzzle).is_valid());
    }

    #[test]
    fn generation_is_deterministic_under_a_fixed_seed() {
        let config: DifficultyConfig = Difficulty::Easy.config();
        let options: GenerateOptions = GenerateOptions::default();
        let mut rng1: StdRng = StdRng::seed_from_u64(2026);
        let mut rng2: StdRng = StdRng::seed_from_u64(2026);

        let puzzle1: Puzzle = generate_puzzle_with_rng(&config, &options, &mut rng1).expect("p1");
        let puzzle2: Puzzle = generate_puzzle_with_rng(&config, &options, &mut rng2).expect("p2");
        assert_eq!(puzzle1, puzzle2);
    }

    #[test]
    fn a_malformed_configuration_is_a_terminal_failure() {
        let mut rng: StdRng = StdRng::seed_from_u64(1);
        let mut config: DifficultyConfig = DifficultyConfig::custom(3, 4, 1, 16, addition_only());
        config.rows = 1;

        let result = generate_puzzle_with_rng(&config, &GenerateOptions::default(), &mut rng);
        match result {
            Err(GenerationError::AttemptsExhausted { last_failure, .. }) => {
                assert!(matches!(last_failure, AttemptFailure::Unexpected(_)));
            }
            Ok(_) => panic!("a 1-row grid must not generate"),
        }
    }

    #[test]
    fn an_impossible_value_range_exhausts_the_attempts() {
        let mut rng: StdRng = StdRng::seed_from_u64(5);
        let config: DifficultyConfig = DifficultyConfig::custom(3, 4, 1, 1, addition_only());

        let result = generate_puzzle_with_rng(&config, &GenerateOptions::default(), &mut rng);
        match result {
            Err(GenerationError::AttemptsExhausted {
                attempts,
                last_failure,
            }) => {
                assert_eq!(attempts, 20);
                assert!(matches!(last_failure, AttemptFailure::Values(_)));
            }
            Ok(_) => panic!("a single-value range must not generate"),
        }
    }

    #[test]
    fn a_zero_attempt_budget_fails_immediately() {
        let mut rng: StdRng = StdRng::seed_from_u64(6);
        let config: DifficultyConfig = Difficulty::Beginner.config();
        let options: GenerateOptions = GenerateOptions {
            max_attempts: 0,
            validate_result: true,
        };
        assert!(generate_puzzle_with_rng(&config, &options, &mut rng).is_err());
    }
}
