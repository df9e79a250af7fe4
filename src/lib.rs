/*
lib.rs

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

//! Generate solvable "follow the number" grid puzzles.
//!
//! A puzzle is a rectangular grid of cells linked by horizontal, vertical,
//! and diagonal connectors. Every connector carries an integer value, and no
//! two connectors touching the same cell share a value. Each cell displays
//! an arithmetic expression that evaluates to the value of exactly one of
//! its connectors. Starting from the top-left cell, the player solves the
//! expression and follows the connector with the matching value; the hidden
//! solution path leads to the bottom-right cell.
//!
//! To create a puzzle:
//!
//! * Pick one of the [`difficulty::Difficulty`] presets, or build a custom
//!   [`difficulty::DifficultyConfig`].
//! * Call [`generator::pipeline::generate_puzzle`] with the configuration,
//!   or [`generator::pipeline::generate_puzzle_with_rng`] with a seeded
//!   random source when reproducible output is needed.
//! * The returned [`generator::pipeline::Puzzle`] is a consistent snapshot:
//!   before it is handed back, it has already passed the [`validator`]
//!   acceptance checks.
//!
//! Generation is randomized and retried: each attempt builds a solution
//! path, resolves the diagonal layout, assigns connector values, derives
//! cell answers, and synthesizes the expressions. An attempt that runs into
//! a dead end is discarded and the pipeline restarts with fresh randomness,
//! up to a bounded attempt count.

pub mod difficulty;
pub mod generator;
pub mod validator;

pub use difficulty::{Difficulty, DifficultyConfig, OperationWeights};
pub use generator::pipeline::{
    GenerateOptions, GenerationError, Puzzle, Solution, generate_puzzle, generate_puzzle_with_rng,
};
