/*
path.rs

Copyright 2025 Hervé Quatremain

This file is part of Arithmaze.

Arithmaze is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Arithmaze is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Arithmaze. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Solution path through the puzzle grid.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::coordinate::Coordinate;

/// Path object.
///
/// Serialized as the plain list of coordinates, from START to FINISH.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(from = "Vec<Coordinate>", into = "Vec<Coordinate>")]
pub struct SolutionPath {
    /// Path as an ordered list of cells.
    path: Vec<Coordinate>,

    /// Stores the visited status of the cells.
    /// Instead of looking for the cell in the [`SolutionPath::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    visited: HashSet<Coordinate>,
}

impl PartialEq for SolutionPath {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl From<Vec<Coordinate>> for SolutionPath {
    fn from(path: Vec<Coordinate>) -> Self {
        Self::from_vec(&path)
    }
}

impl From<SolutionPath> for Vec<Coordinate> {
    fn from(path: SolutionPath) -> Self {
        path.path
    }
}

impl SolutionPath {
    /// Create a [`SolutionPath`] object.
    pub fn new(capacity: usize) -> Self {
        Self {
            path: Vec::with_capacity(capacity),
            visited: HashSet::with_capacity(capacity),
        }
    }

    /// Create a [`SolutionPath`] object from a list of cells.
    ///
    /// Duplicated cells are kept in the list so that a validator can report them.
    pub fn from_vec(path: &[Coordinate]) -> Self {
        Self {
            path: path.to_vec(),
            visited: path.iter().copied().collect(),
        }
    }

    /// Add a cell to the path.
    pub fn push(&mut self, cell: Coordinate) {
        self.path.push(cell);
        self.visited.insert(cell);
    }

    /// Get the number of cells in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the path has no cells.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the cell is in the path or not.
    pub fn contains(&self, cell: Coordinate) -> bool {
        self.visited.contains(&cell)
    }

    /// Return the path as a slice.
    pub fn cells(&self) -> &[Coordinate] {
        &self.path
    }

    /// Return the position of the given cell in the path.
    pub fn position(&self, cell: Coordinate) -> Option<usize> {
        self.path.iter().position(|c| *c == cell)
    }

    /// Return the first cell in the path.
    pub fn first(&self) -> Option<Coordinate> {
        self.path.first().copied()
    }

    /// Return the last cell in the path.
    pub fn last(&self) -> Option<Coordinate> {
        self.path.last().copied()
    }

    /// Iterate over the consecutive cell pairs (the moves) of the path.
    pub fn moves(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.path.windows(2).map(|w| (w[0], w[1]))
    }

    /// Number of direction changes along the path.
    pub fn turns(&self) -> usize {
        let steps: Vec<(isize, isize)> = self.moves().map(|(a, b)| a.step_to(b)).collect();
        steps.windows(2).filter(|w| w[0] != w[1]).count()
    }

    /// Minimum number of direction changes for a path of the given length.
    pub fn required_turns(len: usize) -> usize {
        if len < 6 {
            1
        } else if len < 8 {
            2
        } else {
            3
        }
    }

    /// Whether the path changes direction often enough for its length.
    pub fn is_interesting(&self) -> bool {
        self.turns() >= Self::required_turns(self.len())
    }
}
