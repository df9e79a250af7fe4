/*
generator.rs

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

//! Generate random Mathtrail puzzles.
//!
//! A puzzle is built in sequential steps, each owning its intermediate
//! state for the current attempt:
//!
//! * A random solution path from the top-left to the bottom-right cell is
//!   produced by a [`random_path::RandomPath`] object. While the path is
//!   walked, the diagonal moves it takes are recorded as
//!   [`connectors::DiagonalCommitments`].
//!
//! * The diagonal orientation of every 2x2 block is resolved by
//!   [`connectors::build_diagonal_grid`] (honoring the path commitments,
//!   random elsewhere), and [`connectors::build_connector_graph`] emits the
//!   full connector set. Each block holds exactly one diagonal connector by
//!   construction.
//!
//! * [`values::assign_connector_values`] gives every connector a value such
//!   that no two connectors touching the same cell share one. The procedure
//!   is greedy and can fail; the pipeline then restarts the whole attempt.
//!
//! * [`answers::assign_cell_answers`] writes the answer of every cell: path
//!   cells point at the connector leading to the next path cell, decoy
//!   cells at a random incident connector, and the finish cell gets none.
//!
//! * [`expression::apply_expressions`] turns each answer into an arithmetic
//!   expression the player must solve.
//!
//! [`pipeline::generate_puzzle`] runs these steps, validates the result,
//! and retries with fresh randomness up to a bounded attempt count.

pub mod answers;
pub mod connectors;
pub mod expression;
pub mod grid;
pub mod path;
pub mod pipeline;
pub mod random_path;
pub mod values;
