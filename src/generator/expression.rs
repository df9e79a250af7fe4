/*
expression.rs

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

//! Synthesize the arithmetic expressions displayed on the cells.
//!
//! Synthesis is reverse arithmetic: starting from the target answer, two
//! operands are derived so that the expression evaluates back to the
//! target. The operation is drawn from the difficulty's weighted mix; when
//! the drawn operation cannot represent the target (a prime target for
//! multiplication, for example), another draw is made, and after a bounded
//! number of tries a guaranteed fallback applies. Expression synthesis
//! therefore never fails.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::grid;
use crate::difficulty;

// Operation draws per target before falling back.
const MAX_SYNTHESIS_ATTEMPTS: usize = 10;

/// Arithmetic operation of an expression.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    /// Operator glyph used in the expression text.
    pub fn glyph(&self) -> char {
        match self {
            Operation::Addition => '+',
            Operation::Subtraction => '−',
            Operation::Multiplication => '×',
            Operation::Division => '÷',
        }
    }

    /// Apply the operation to the operands.
    ///
    /// Return [`None`] when the result is not a natural number (a negative
    /// difference or a non-exact division).
    pub fn apply(&self, operand_a: u32, operand_b: u32) -> Option<u32> {
        match self {
            Operation::Addition => operand_a.checked_add(operand_b),
            Operation::Subtraction => operand_a.checked_sub(operand_b),
            Operation::Multiplication => operand_a.checked_mul(operand_b),
            Operation::Division => {
                if operand_b != 0 && operand_a % operand_b == 0 {
                    Some(operand_a / operand_b)
                } else {
                    None
                }
            }
        }
    }
}

/// Expression displayed on a cell.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    /// Display text, such as `"3 + 7"`.
    pub text: String,

    pub operation: Operation,
    pub operand_a: u32,
    pub operand_b: u32,

    /// Value the expression evaluates to.
    pub result: u32,
}

impl Expression {
    fn new(operation: Operation, operand_a: u32, operand_b: u32, result: u32) -> Self {
        Self {
            text: format!("{operand_a} {} {operand_b}", operation.glyph()),
            operation,
            operand_a,
            operand_b,
            result,
        }
    }
}

/// Draw an operation from the weighted mix. Only operations with a positive
/// weight are candidates.
fn pick_operation(
    weights: &difficulty::OperationWeights,
    rng: &mut impl Rng,
) -> Option<Operation> {
    let total: u32 = weights.total();
    if total == 0 {
        return None;
    }

    let mut draw: u32 = rng.random_range(0..total);
    for (operation, weight) in [
        (Operation::Addition, weights.addition),
        (Operation::Subtraction, weights.subtraction),
        (Operation::Multiplication, weights.multiplication),
        (Operation::Division, weights.division),
    ] {
        if draw < weight {
            return Some(operation);
        }
        draw -= weight;
    }
    None
}

/// Synthesize an addition evaluating to `target`, with both operands in
/// `[1, max_operand]`.
pub fn generate_addition(
    target: u32,
    max_operand: u32,
    rng: &mut impl Rng,
) -> Option<Expression> {
    if target < 2 {
        return None;
    }
    let operand_a: u32 = rng.random_range(1..=(target - 1).min(max_operand));
    let operand_b: u32 = target - operand_a;
    if operand_b > max_operand {
        return None;
    }
    Some(Expression::new(
        Operation::Addition,
        operand_a,
        operand_b,
        target,
    ))
}

/// Synthesize a subtraction evaluating to `target`, with the minuend capped
/// at `max_operand`.
pub fn generate_subtraction(
    target: u32,
    max_operand: u32,
    rng: &mut impl Rng,
) -> Option<Expression> {
    if max_operand <= target {
        return None;
    }
    let operand_b: u32 = rng.random_range(1..=max_operand - target);
    let operand_a: u32 = target + operand_b;
    Some(Expression::new(
        Operation::Subtraction,
        operand_a,
        operand_b,
        target,
    ))
}

/// Synthesize a multiplication evaluating to `target`, with both factors in
/// `[2, max_factor]`.
pub fn generate_multiplication(
    target: u32,
    max_factor: u32,
    rng: &mut impl Rng,
) -> Option<Expression> {
    let mut pairs: Vec<(u32, u32)> = Vec::new();
    for factor in 2..=max_factor {
        if factor * factor > target {
            break;
        }
        if target % factor == 0 {
            let other: u32 = target / factor;
            if other >= 2 && other <= max_factor {
                pairs.push((factor, other));
            }
        }
    }

    let &(factor_a, factor_b) = pairs.choose(rng)?;
    // Swap the operand order at random for display variety
    let (operand_a, operand_b) = if rng.random_bool(0.5) {
        (factor_a, factor_b)
    } else {
        (factor_b, factor_a)
    };
    Some(Expression::new(
        Operation::Multiplication,
        operand_a,
        operand_b,
        target,
    ))
}

/// Synthesize a division evaluating to `target`, with the divisor in
/// `[2, min(max_divisor, 12)]` and the dividend capped at `max_dividend`.
pub fn generate_division(
    target: u32,
    max_divisor: u32,
    max_dividend: u32,
    rng: &mut impl Rng,
) -> Option<Expression> {
    let divisors: Vec<u32> = (2..=max_divisor.min(12))
        .filter(|divisor| {
            target
                .checked_mul(*divisor)
                .is_some_and(|dividend| dividend <= max_dividend)
        })
        .collect();

    let operand_b: u32 = *divisors.choose(rng)?;
    Some(Expression::new(
        Operation::Division,
        target * operand_b,
        operand_b,
        target,
    ))
}

/// Guaranteed fallback when every weighted draw failed.
///
/// A target of 1 renders as the fixed subtraction `2 − 1`; any larger
/// target splits as a relaxed addition, ignoring the operand cap.
fn fallback(target: u32, rng: &mut impl Rng) -> Expression {
    if target < 2 {
        return Expression::new(Operation::Subtraction, 2, 1, 1);
    }
    let operand_a: u32 = rng.random_range(1..=target - 1);
    Expression::new(Operation::Addition, operand_a, target - operand_a, target)
}

/// Synthesize an expression evaluating to `target` under the difficulty's
/// operation mix and operand caps.
///
/// Never fails: after [`MAX_SYNTHESIS_ATTEMPTS`] unproductive draws, the
/// fallback applies.
pub fn generate_expression(
    target: u32,
    config: &difficulty::DifficultyConfig,
    rng: &mut impl Rng,
) -> Expression {
    for _ in 0..MAX_SYNTHESIS_ATTEMPTS {
        let Some(operation) = pick_operation(&config.weights, rng) else {
            break;
        };
        let expression: Option<Expression> = match operation {
            Operation::Addition => generate_addition(target, config.max_operand, rng),
            Operation::Subtraction => generate_subtraction(target, config.max_operand, rng),
            Operation::Multiplication => generate_multiplication(target, config.max_factor, rng),
            Operation::Division => {
                generate_division(target, config.max_divisor, config.max_dividend, rng)
            }
        };
        if let Some(expression) = expression {
            return expression;
        }
    }
    fallback(target, rng)
}

/// Fill in the expression text of every answer-bearing cell.
///
/// Pure per-cell transform: the input grid is left untouched and a new grid
/// is returned. Answerless cells (the finish) keep an empty expression.
pub fn apply_expressions(
    cells: &grid::CellGrid,
    config: &difficulty::DifficultyConfig,
    rng: &mut impl Rng,
) -> grid::CellGrid {
    let mut result: grid::CellGrid = cells.clone();
    for cell in result.iter_mut() {
        if let Some(answer) = cell.answer {
            cell.expression = generate_expression(answer, config, rng).text;
        }
    }
    result
}
