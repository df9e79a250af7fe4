/*
validator.rs

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

//! Independent validation of generated puzzles.
//!
//! The five checks re-derive every invariant the pipeline is supposed to
//! uphold, without trusting any of its intermediate state. The pipeline
//! runs [`validate_puzzle`] as an acceptance gate on every generated
//! puzzle; a failing puzzle is discarded, never repaired.

use std::collections::HashSet;

use crate::generator::connectors;
use crate::generator::expression;
use crate::generator::grid;
use crate::generator::pipeline;

/// Outcome of the validation checks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Invariant violations. A puzzle with any error is unusable.
    pub errors: Vec<String>,

    /// Oddities that do not make the puzzle unusable.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Whether the puzzle passed every check.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Check the solution path: at least two cells, fixed endpoints, adjacent
/// consecutive pairs, no repeated coordinate.
pub fn check_path(puzzle: &pipeline::Puzzle) -> ValidationReport {
    let mut report: ValidationReport = ValidationReport::default();
    let path: &Vec<grid::Coordinate> = puzzle.solution.path.get();

    if path.len() < 2 {
        report
            .errors
            .push(format!("the path has only {} cells", path.len()));
        return report;
    }

    let start: grid::Coordinate = grid::start_coordinate();
    let finish: grid::Coordinate = grid::finish_coordinate(puzzle.config.rows, puzzle.config.cols);
    if path[0] != start {
        report.errors.push(format!(
            "the path starts at ({}, {}) instead of (0, 0)",
            path[0].row, path[0].col
        ));
    }
    if path[path.len() - 1] != finish {
        report.errors.push(format!(
            "the path ends at ({}, {}) instead of ({}, {})",
            path[path.len() - 1].row,
            path[path.len() - 1].col,
            finish.row,
            finish.col
        ));
    }

    for pair in path.windows(2) {
        if !pair[0].is_adjacent(&pair[1]) {
            report.errors.push(format!(
                "the path cells ({}, {}) and ({}, {}) are not adjacent",
                pair[0].row, pair[0].col, pair[1].row, pair[1].col
            ));
        }
    }

    let mut seen: HashSet<grid::Coordinate> = HashSet::with_capacity(path.len());
    for coordinate in path {
        if !seen.insert(*coordinate) {
            report.errors.push(format!(
                "the path visits ({}, {}) twice",
                coordinate.row, coordinate.col
            ));
        }
    }
    report
}

/// Check the local-uniqueness invariant: for every cell, no two incident
/// connectors carry the same value.
pub fn check_connector_uniqueness(puzzle: &pipeline::Puzzle) -> ValidationReport {
    let mut report: ValidationReport = ValidationReport::default();

    for cell in puzzle.cells.iter() {
        let mut seen: HashSet<u32> = HashSet::new();
        for &index in puzzle.connectors.incident(cell.coordinate) {
            let value: u32 = puzzle.connectors.get(index).value;
            if !seen.insert(value) {
                report.errors.push(format!(
                    "cell ({}, {}) touches two connectors with value {value}",
                    cell.coordinate.row, cell.coordinate.col
                ));
            }
        }
    }
    report
}

/// Check the cell answers: every non-finish cell's answer matches the value
/// of exactly one incident connector; the finish cell has none.
pub fn check_cell_answers(puzzle: &pipeline::Puzzle) -> ValidationReport {
    let mut report: ValidationReport = ValidationReport::default();

    for cell in puzzle.cells.iter() {
        if cell.is_finish {
            if cell.answer.is_some() {
                report.errors.push(format!(
                    "the finish cell ({}, {}) has an answer",
                    cell.coordinate.row, cell.coordinate.col
                ));
            }
            continue;
        }

        let Some(answer) = cell.answer else {
            report.errors.push(format!(
                "cell ({}, {}) has no answer",
                cell.coordinate.row, cell.coordinate.col
            ));
            continue;
        };
        let matching: usize = puzzle
            .connectors
            .incident(cell.coordinate)
            .iter()
            .filter(|&&index| puzzle.connectors.get(index).value == answer)
            .count();
        if matching != 1 {
            report.errors.push(format!(
                "the answer {answer} of cell ({}, {}) matches {matching} incident connectors",
                cell.coordinate.row, cell.coordinate.col
            ));
        }
    }
    report
}

/// Check that each path cell's answer is the value of the connector
/// actually leading to the next path cell.
pub fn check_solution_consistency(puzzle: &pipeline::Puzzle) -> ValidationReport {
    let mut report: ValidationReport = ValidationReport::default();

    for pair in puzzle.solution.path.get().windows(2) {
        let Some(index) = puzzle.connectors.between(pair[0], pair[1]) else {
            report.errors.push(format!(
                "no connector between the path cells ({}, {}) and ({}, {})",
                pair[0].row, pair[0].col, pair[1].row, pair[1].col
            ));
            continue;
        };
        let value: u32 = puzzle.connectors.get(index).value;
        if puzzle.cells.get(pair[0]).answer != Some(value) {
            report.errors.push(format!(
                "the answer of the path cell ({}, {}) does not lead to ({}, {})",
                pair[0].row, pair[0].col, pair[1].row, pair[1].col
            ));
        }
    }
    report
}

/// Parse an expression text and evaluate it.
///
/// The text must hold exactly two natural operands around one of the four
/// operator glyphs (`+`, `−`, `×`, `÷`).
///
/// # Errors
///
/// Return a descriptive message when the text does not parse or does not
/// evaluate to a natural number.
pub fn parse_expression(text: &str) -> Result<u32, String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(format!(
            "expected two operands around an operator: {text:?}"
        ));
    }

    let operand_a: u32 = tokens[0]
        .parse()
        .map_err(|_| format!("bad operand {:?} in {text:?}", tokens[0]))?;
    let operand_b: u32 = tokens[2]
        .parse()
        .map_err(|_| format!("bad operand {:?} in {text:?}", tokens[2]))?;
    let operation: expression::Operation = match tokens[1] {
        "+" => expression::Operation::Addition,
        "−" => expression::Operation::Subtraction,
        "×" => expression::Operation::Multiplication,
        "÷" => expression::Operation::Division,
        other => return Err(format!("unknown operator {other:?} in {text:?}")),
    };

    operation
        .apply(operand_a, operand_b)
        .ok_or_else(|| format!("the expression does not evaluate: {text:?}"))
}

/// Check the expressions: every cell with an answer has a non-empty
/// expression evaluating to exactly that answer.
pub fn check_expressions(puzzle: &pipeline::Puzzle) -> ValidationReport {
    let mut report: ValidationReport = ValidationReport::default();

    for cell in puzzle.cells.iter() {
        let Some(answer) = cell.answer else {
            if !cell.expression.is_empty() {
                report.warnings.push(format!(
                    "the answerless cell ({}, {}) has an expression",
                    cell.coordinate.row, cell.coordinate.col
                ));
            }
            continue;
        };

        if cell.expression.is_empty() {
            report.errors.push(format!(
                "cell ({}, {}) has no expression",
                cell.coordinate.row, cell.coordinate.col
            ));
            continue;
        }
        match parse_expression(&cell.expression) {
            Ok(value) if value == answer => (),
            Ok(value) => report.errors.push(format!(
                "the expression {:?} of cell ({}, {}) evaluates to {value}, not {answer}",
                cell.expression, cell.coordinate.row, cell.coordinate.col
            )),
            Err(message) => report.errors.push(message),
        }
    }
    report
}

/// Run the five checks and merge their outputs.
pub fn validate_puzzle(puzzle: &pipeline::Puzzle) -> ValidationReport {
    let mut report: ValidationReport = ValidationReport::default();
    report.merge(check_path(puzzle));
    report.merge(check_connector_uniqueness(puzzle));
    report.merge(check_cell_answers(puzzle));
    report.merge(check_solution_consistency(puzzle));
    report.merge(check_expressions(puzzle));
    report
}
