/*
generation.rs

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

//! End-to-end properties of the generation pipeline.

use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use mathtrail::generator::answers;
use mathtrail::generator::connectors::ConnectorKind;
use mathtrail::generator::grid::{Coordinate, finish_coordinate, start_coordinate};
use mathtrail::validator;
use mathtrail::{
    Difficulty, DifficultyConfig, GenerateOptions, OperationWeights, Puzzle,
    generate_puzzle_with_rng,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn generate(config: &DifficultyConfig, seed: u64) -> Puzzle {
    let mut rng: StdRng = StdRng::seed_from_u64(seed);
    generate_puzzle_with_rng(config, &GenerateOptions::default(), &mut rng).expect("puzzle")
}

#[test]
fn the_smallest_grid_generates_with_addition_only() {
    init_logger();
    let weights: OperationWeights = OperationWeights {
        addition: 1,
        subtraction: 0,
        multiplication: 0,
        division: 0,
    };
    let config: DifficultyConfig = DifficultyConfig::custom(3, 4, 1, 16, weights);
    let puzzle: Puzzle = generate(&config, 42);

    assert!(validator::validate_puzzle(&puzzle).is_valid());
    // Every expression is an addition (or the target-1 fallback)
    for cell in puzzle.cells.iter() {
        if cell.answer.is_some() {
            assert!(
                cell.expression.contains('+') || cell.expression == "2 − 1",
                "unexpected expression {:?}",
                cell.expression
            );
        }
    }
}

#[test]
fn every_preset_generates_a_valid_puzzle() {
    init_logger();
    for (index, difficulty) in Difficulty::ALL.iter().enumerate() {
        let config: DifficultyConfig = difficulty.config();
        let puzzle: Puzzle = generate(&config, 1000 + index as u64);
        let report = validator::validate_puzzle(&puzzle);
        assert!(report.is_valid(), "{difficulty}: {:?}", report.errors);
    }
}

#[test]
fn connector_counts_follow_the_grid_dimensions() {
    init_logger();
    for difficulty in [Difficulty::Beginner, Difficulty::Medium, Difficulty::Master] {
        let config: DifficultyConfig = difficulty.config();
        let puzzle: Puzzle = generate(&config, 7);
        let (rows, cols) = (config.rows, config.cols);

        let horizontal: usize = puzzle
            .connectors
            .all()
            .iter()
            .filter(|c| c.kind == ConnectorKind::Horizontal)
            .count();
        let vertical: usize = puzzle
            .connectors
            .all()
            .iter()
            .filter(|c| c.kind == ConnectorKind::Vertical)
            .count();
        let diagonal: usize = puzzle
            .connectors
            .all()
            .iter()
            .filter(|c| matches!(c.kind, ConnectorKind::Diagonal(_)))
            .count();

        assert_eq!(horizontal, rows * (cols - 1));
        assert_eq!(vertical, (rows - 1) * cols);
        assert_eq!(diagonal, (rows - 1) * (cols - 1));
    }
}

#[test]
fn path_endpoints_and_bounds_hold() {
    init_logger();
    let config: DifficultyConfig = Difficulty::Casual.config();
    let cell_count: f64 = (config.rows * config.cols) as f64;
    let min_length: usize = (cell_count * config.min_path_fraction).round() as usize;
    let max_length: usize = (cell_count * config.max_path_fraction).round() as usize;

    for seed in 0..10 {
        let puzzle: Puzzle = generate(&config, seed);
        let path: &Vec<Coordinate> = puzzle.solution.path.get();

        assert_eq!(path[0], start_coordinate());
        assert_eq!(
            path[path.len() - 1],
            finish_coordinate(config.rows, config.cols)
        );
        assert!(path.len() >= min_length && path.len() <= max_length);

        let distinct: HashSet<Coordinate> = path.iter().copied().collect();
        assert_eq!(distinct.len(), path.len());
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent(&pair[1]));
        }
    }
}

#[test]
fn following_the_answers_reaches_the_finish() {
    init_logger();
    let config: DifficultyConfig = Difficulty::Challenging.config();
    let puzzle: Puzzle = generate(&config, 99);
    let finish: Coordinate = finish_coordinate(config.rows, config.cols);

    let mut current: Coordinate = start_coordinate();
    let mut hops: usize = 0;
    while current != finish {
        current = answers::exit_cell(puzzle.cells.get(current), &puzzle.connectors)
            .expect("a non-finish cell always has an exit");
        hops += 1;
        assert!(hops <= puzzle.solution.num_steps, "walk overran the path");
    }
    assert_eq!(hops, puzzle.solution.num_steps);
}

#[test]
fn incident_connector_values_are_pairwise_distinct() {
    init_logger();
    let config: DifficultyConfig = Difficulty::Hard.config();
    let puzzle: Puzzle = generate(&config, 12);

    for cell in puzzle.cells.iter() {
        let values: Vec<u32> = puzzle
            .connectors
            .incident(cell.coordinate)
            .iter()
            .map(|&i| puzzle.connectors.get(i).value)
            .collect();
        let distinct: HashSet<u32> = values.iter().copied().collect();
        assert_eq!(values.len(), distinct.len());
    }
}

#[test]
fn every_expression_evaluates_to_its_answer() {
    init_logger();
    let config: DifficultyConfig = Difficulty::Master.config();
    let puzzle: Puzzle = generate(&config, 5);

    for cell in puzzle.cells.iter() {
        match cell.answer {
            Some(answer) => {
                let value: u32 =
                    validator::parse_expression(&cell.expression).expect("expression parses");
                assert_eq!(value, answer);
            }
            None => {
                assert!(cell.is_finish);
                assert!(cell.expression.is_empty());
            }
        }
    }
}

#[test]
fn a_puzzle_serializes_as_a_snapshot() {
    init_logger();
    let config: DifficultyConfig = Difficulty::Beginner.config();
    let puzzle: Puzzle = generate(&config, 21);

    let json: String = serde_json::to_string(&puzzle).expect("serialize");
    let restored: Puzzle = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, puzzle);
    assert!(validator::validate_puzzle(&restored).is_valid());
}
