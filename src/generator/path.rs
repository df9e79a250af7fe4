/*
path.rs

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

//! Solution path through the puzzle grid.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::grid;

/// Path object.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Path {
    /// Path as an ordered list of coordinates.
    path: Vec<grid::Coordinate>,

    /// Stores the visited status of the coordinates.
    /// Instead of looking for the coordinate in the [`Path::path`] vector,
    /// this [`std::collections::HashSet`] speeds up the lookup.
    visited: HashSet<grid::Coordinate>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Path {}

impl Path {
    /// Create a [`Path`] object.
    pub fn new(capacity: usize) -> Self {
        Self {
            path: Vec::with_capacity(capacity),
            visited: HashSet::with_capacity(capacity),
        }
    }

    /// Remove all the coordinates from the path.
    pub fn clear(&mut self) {
        self.path.clear();
        self.visited.clear();
    }

    /// Add a coordinate to the path.
    pub fn push(&mut self, coordinate: grid::Coordinate) {
        self.path.push(coordinate);
        self.visited.insert(coordinate);
    }

    /// Remove the last coordinate from the path.
    pub fn pop(&mut self) {
        if let Some(c) = self.path.pop() {
            self.visited.remove(&c);
        }
    }

    /// Get the number of coordinates in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the path is empty.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the coordinate is in the path or not.
    pub fn contains(&self, coordinate: grid::Coordinate) -> bool {
        self.visited.contains(&coordinate)
    }

    /// Return a reference to the path vector.
    pub fn get(&self) -> &Vec<grid::Coordinate> {
        &self.path
    }

    /// Return the first coordinate in the path.
    pub fn get_first(&self) -> Option<grid::Coordinate> {
        self.path.first().copied()
    }

    /// Return the last coordinate in the path.
    pub fn get_last(&self) -> Option<grid::Coordinate> {
        self.path.last().copied()
    }

    /// Number of direction changes along the path.
    ///
    /// A direction change is a step whose move vector differs from the
    /// previous step's. Straight runs count for nothing; a path with fewer
    /// than three coordinates cannot change direction.
    pub fn direction_changes(&self) -> usize {
        let vectors: Vec<(isize, isize)> = self
            .path
            .windows(2)
            .map(|pair| {
                (
                    pair[1].row as isize - pair[0].row as isize,
                    pair[1].col as isize - pair[0].col as isize,
                )
            })
            .collect();
        vectors.windows(2).filter(|v| v[0] != v[1]).count()
    }
}
