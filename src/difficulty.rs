/*
difficulty.rs

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

//! Difficulty presets and generation parameters.
//!
//! The generator treats a [`DifficultyConfig`] as an opaque, read-only
//! record. Ten fixed presets are provided through the [`Difficulty`] enum;
//! [`DifficultyConfig::custom`] builds a configuration with caller-chosen
//! grid and value parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

/// Selection weights for the four arithmetic operations.
///
/// An operation with a zero weight is never used. At least one weight must
/// be positive for a configuration to be usable.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct OperationWeights {
    pub addition: u32,
    pub subtraction: u32,
    pub multiplication: u32,
    pub division: u32,
}

impl OperationWeights {
    /// Sum of the four weights.
    pub fn total(&self) -> u32 {
        self.addition + self.subtraction + self.multiplication + self.division
    }
}

/// Parameters that drive puzzle generation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DifficultyConfig {
    /// Number of cell rows in the grid.
    pub rows: usize,

    /// Number of cell columns in the grid.
    pub cols: usize,

    /// Smallest value a connector can carry.
    pub min_value: u32,

    /// Largest value a connector can carry.
    pub max_value: u32,

    /// Selection weights for the expression operations.
    pub weights: OperationWeights,

    /// Largest operand allowed in addition and subtraction expressions.
    pub max_operand: u32,

    /// Largest factor allowed in multiplication expressions.
    pub max_factor: u32,

    /// Largest divisor allowed in division expressions.
    pub max_divisor: u32,

    /// Largest dividend allowed in division expressions.
    pub max_dividend: u32,

    /// Lower bound of the solution path length, as a fraction of the cell
    /// count.
    pub min_path_fraction: f64,

    /// Upper bound of the solution path length, as a fraction of the cell
    /// count.
    pub max_path_fraction: f64,
}

impl DifficultyConfig {
    /// Build a custom configuration.
    ///
    /// The expression caps and the path-length fractions get the default
    /// values used by the presets; override the fields for finer control.
    pub fn custom(
        rows: usize,
        cols: usize,
        min_value: u32,
        max_value: u32,
        weights: OperationWeights,
    ) -> Self {
        Self {
            rows,
            cols,
            min_value,
            max_value,
            weights,
            max_operand: max_value + 10,
            max_factor: 12,
            max_divisor: 12,
            max_dividend: 144,
            min_path_fraction: 0.60,
            max_path_fraction: 0.85,
        }
    }

    /// Verify that the configuration is well formed.
    ///
    /// # Errors
    ///
    /// Return a descriptive message when a field is out of range. The
    /// generation pipeline reports such a configuration as an attempt
    /// failure instead of panicking.
    pub fn check(&self) -> Result<(), String> {
        if self.rows < 2 || self.cols < 2 {
            return Err(format!(
                "the grid must have at least 2 rows and 2 columns (got {}x{})",
                self.rows, self.cols
            ));
        }
        if self.min_value == 0 {
            return Err("the minimum connector value must be at least 1".to_string());
        }
        if self.min_value > self.max_value {
            return Err(format!(
                "the connector value range [{}, {}] is empty",
                self.min_value, self.max_value
            ));
        }
        if self.weights.total() == 0 {
            return Err("at least one operation weight must be positive".to_string());
        }
        if self.max_operand == 0 {
            return Err("the operand cap must be at least 1".to_string());
        }
        if !(self.min_path_fraction > 0.0
            && self.min_path_fraction <= self.max_path_fraction
            && self.max_path_fraction <= 1.0)
        {
            return Err(format!(
                "the path-length fractions [{}, {}] must satisfy 0 < min <= max <= 1",
                self.min_path_fraction, self.max_path_fraction
            ));
        }
        Ok(())
    }
}

/// Puzzle difficulty level.
///
/// Each level maps to a fixed [`DifficultyConfig`] preset. The grid grows
/// and the operation mix hardens from [`Difficulty::Beginner`] to
/// [`Difficulty::Master`].
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    Ord,
    PartialEq,
    Eq,
    Hash,
    FromRepr,
    Default,
)]
#[repr(i32)]
pub enum Difficulty {
    #[default]
    Beginner,
    Easy,
    Casual,
    Medium,
    Steady,
    Challenging,
    Hard,
    Tricky,
    Expert,
    Master,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "Beginner"),
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Casual => write!(f, "Casual"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Steady => write!(f, "Steady"),
            Difficulty::Challenging => write!(f, "Challenging"),
            Difficulty::Hard => write!(f, "Hard"),
            Difficulty::Tricky => write!(f, "Tricky"),
            Difficulty::Expert => write!(f, "Expert"),
            Difficulty::Master => write!(f, "Master"),
        }
    }
}

impl Difficulty {
    /// All the difficulty levels, in increasing order.
    pub const ALL: [Difficulty; 10] = [
        Difficulty::Beginner,
        Difficulty::Easy,
        Difficulty::Casual,
        Difficulty::Medium,
        Difficulty::Steady,
        Difficulty::Challenging,
        Difficulty::Hard,
        Difficulty::Tricky,
        Difficulty::Expert,
        Difficulty::Master,
    ];

    /// Return the preset configuration for the level.
    // The connector value ranges stay at least 16 wide: a connector shares a
    // cell with at most 14 neighbors, so the greedy value assignment always
    // has a legal value left.
    pub fn config(&self) -> DifficultyConfig {
        let (rows, cols, max_value, weights, max_operand, max_factor, max_divisor) = match self {
            Difficulty::Beginner => (3, 4, 16, (1, 0, 0, 0), 20, 9, 6),
            Difficulty::Easy => (3, 4, 16, (3, 1, 0, 0), 26, 9, 6),
            Difficulty::Casual => (4, 4, 18, (2, 1, 0, 0), 28, 9, 6),
            Difficulty::Medium => (4, 5, 20, (2, 2, 1, 0), 30, 9, 6),
            Difficulty::Steady => (5, 5, 20, (2, 2, 1, 0), 30, 10, 8),
            Difficulty::Challenging => (5, 6, 22, (2, 2, 2, 1), 32, 10, 8),
            Difficulty::Hard => (6, 6, 24, (1, 2, 2, 1), 36, 12, 10),
            Difficulty::Tricky => (6, 8, 26, (1, 2, 2, 2), 40, 12, 10),
            Difficulty::Expert => (7, 9, 28, (1, 1, 2, 2), 42, 12, 12),
            Difficulty::Master => (8, 10, 30, (1, 1, 3, 3), 45, 12, 12),
        };
        DifficultyConfig {
            rows,
            cols,
            min_value: 1,
            max_value,
            weights: OperationWeights {
                addition: weights.0,
                subtraction: weights.1,
                multiplication: weights.2,
                division: weights.3,
            },
            max_operand,
            max_factor,
            max_divisor,
            max_dividend: 144,
            min_path_fraction: 0.60,
            max_path_fraction: 0.85,
        }
    }
}
