/*
values.rs

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

//! Assign values to the connectors.
//!
//! The local-uniqueness invariant requires that no two connectors touching
//! the same cell carry the same value, so "follow the number" is never
//! ambiguous. The assignment is a randomized greedy pass with no
//! backtracking: when a connector runs out of legal values, the whole
//! attempt fails and the pipeline restarts with a fresh topology and order.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::fmt;

use super::connectors;
use super::grid;

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A connector had no legal value left given its already-assigned
    /// neighbors.
    NoAvailableValue {
        a: grid::Coordinate,
        b: grid::Coordinate,
    },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValueError::NoAvailableValue { a, b } => write!(
                f,
                "no value left for the connector ({}, {})-({}, {})",
                a.row, a.col, b.row, b.col
            ),
        }
    }
}

/// Assign a value to every connector so that all the connectors touching
/// any one cell carry pairwise-distinct values.
///
/// Connectors are processed in a random order; each one gets a uniformly
/// random value among those not already used at either of its endpoints.
/// Assignments are irrevocable.
///
/// # Errors
///
/// The function fails as soon as a connector has no legal value left. A
/// narrow value range or a high-degree cell makes this more likely; the
/// caller retries the whole pipeline.
pub fn assign_connector_values(
    set: &mut connectors::ConnectorSet,
    min_value: u32,
    max_value: u32,
    rng: &mut impl Rng,
) -> Result<(), ValueError> {
    let mut order: Vec<usize> = (0..set.len()).collect();
    order.shuffle(rng);

    let mut assigned: Vec<bool> = vec![false; set.len()];
    for index in order {
        let connector: connectors::Connector = *set.get(index);

        // Values already claimed by the connectors sharing an endpoint
        let mut used: HashSet<u32> = HashSet::new();
        for endpoint in [connector.a, connector.b] {
            for &neighbor in set.incident(endpoint) {
                if neighbor != index && assigned[neighbor] {
                    used.insert(set.get(neighbor).value);
                }
            }
        }

        let available: Vec<u32> = (min_value..=max_value)
            .filter(|v| !used.contains(v))
            .collect();
        if available.is_empty() {
            debug!(
                "no value left for connector ({}, {})-({}, {}) in [{min_value}, {max_value}]",
                connector.a.row, connector.a.col, connector.b.row, connector.b.col
            );
            return Err(ValueError::NoAvailableValue {
                a: connector.a,
                b: connector.b,
            });
        }

        let value: u32 = available[rng.random_range(0..available.len())];
        set.set_value(index, value);
        assigned[index] = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::grid::Coordinate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build_set(rows: usize, cols: usize, seed: u64) -> connectors::ConnectorSet {
        let mut rng: StdRng = StdRng::seed_from_u64(seed);
        let commitments = connectors::DiagonalCommitments::new();
        let diagonal_grid = connectors::build_diagonal_grid(rows, cols, &commitments, &mut rng);
        connectors::build_connector_graph(rows, cols, &diagonal_grid)
    }

    #[test]
    fn assignment_upholds_local_uniqueness() {
        let mut rng: StdRng = StdRng::seed_from_u64(42);
        let mut set = build_set(3, 4, 42);
        assign_connector_values(&mut set, 1, 16, &mut rng).expect("assignment");

        for row in 0..3 {
            for col in 0..4 {
                let coordinate: Coordinate = Coordinate::new(row, col);
                let values: Vec<u32> = set
                    .incident(coordinate)
                    .iter()
                    .map(|&i| set.get(i).value)
                    .collect();
                let distinct: HashSet<u32> = values.iter().copied().collect();
                assert_eq!(values.len(), distinct.len(), "cell ({row}, {col})");
            }
        }
    }

    #[test]
    fn values_stay_in_range() {
        let mut rng: StdRng = StdRng::seed_from_u64(3);
        let mut set = build_set(4, 4, 3);
        assign_connector_values(&mut set, 5, 25, &mut rng).expect("assignment");
        assert!(set.all().iter().all(|c| c.value >= 5 && c.value <= 25));
    }

    #[test]
    fn a_too_narrow_range_fails() {
        // A 2x2 grid corner on the diagonal touches 3 connectors; a single
        // value cannot satisfy them
        let mut rng: StdRng = StdRng::seed_from_u64(8);
        let mut set = build_set(2, 2, 8);
        let result = assign_connector_values(&mut set, 1, 1, &mut rng);
        assert!(matches!(result, Err(ValueError::NoAvailableValue { .. })));
    }

    #[test]
    fn a_wide_range_always_succeeds() {
        // A connector shares cells with at most 14 others, so 15 available
        // values can never run out, regardless of order
        for seed in 0..10 {
            let mut rng: StdRng = StdRng::seed_from_u64(seed);
            let mut set = build_set(5, 6, seed);
            assert!(assign_connector_values(&mut set, 1, 16, &mut rng).is_ok());
        }
    }
}
