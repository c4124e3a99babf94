/*
coordinate.rs

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

//! Cell coordinates in the puzzle grid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Row and column offsets of the eight neighbors of a cell.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Position of a cell in the grid.
///
/// The START cell is always `(0, 0)` and the FINISH cell `(rows - 1, cols - 1)`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    /// Create a [`Coordinate`] object.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether the coordinate lies inside a `rows` x `cols` grid.
    pub fn in_bounds(&self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }

    /// Position of the cell in a flattened, row-major `rows * cols` array.
    pub fn index(&self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    /// Whether the two cells touch horizontally, vertically, or diagonally.
    pub fn is_adjacent(&self, other: Coordinate) -> bool {
        let dr: usize = self.row.abs_diff(other.row);
        let dc: usize = self.col.abs_diff(other.col);
        dr.max(dc) == 1
    }

    /// Whether the move from this cell to `other` is a diagonal step.
    pub fn is_diagonal_to(&self, other: Coordinate) -> bool {
        self.row.abs_diff(other.row) == 1 && self.col.abs_diff(other.col) == 1
    }

    /// Manhattan distance between the two cells.
    pub fn manhattan(&self, other: Coordinate) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Step direction from this cell to `other`, as a row and column offset.
    pub fn step_to(&self, other: Coordinate) -> (isize, isize) {
        (
            other.row as isize - self.row as isize,
            other.col as isize - self.col as isize,
        )
    }

    /// Return the cells around this one (at most eight) that are inside the grid.
    pub fn neighbors(&self, rows: usize, cols: usize) -> Vec<Coordinate> {
        DIRECTIONS
            .iter()
            .filter_map(|(dr, dc)| {
                let row: usize = self.row.checked_add_signed(*dr)?;
                let col: usize = self.col.checked_add_signed(*dc)?;
                let c = Coordinate::new(row, col);
                if c.in_bounds(rows, cols) {
                    Some(c)
                } else {
                    None
                }
            })
            .collect()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::Coordinate;

    #[test]
    fn corner_has_three_neighbors() {
        let mut n: Vec<Coordinate> = Coordinate::new(0, 0).neighbors(3, 4);
        n.sort();
        assert_eq!(
            n,
            vec![
                Coordinate::new(0, 1),
                Coordinate::new(1, 0),
                Coordinate::new(1, 1)
            ]
        );
    }

    #[test]
    fn interior_has_eight_neighbors() {
        assert_eq!(Coordinate::new(1, 1).neighbors(3, 4).len(), 8);
        assert_eq!(Coordinate::new(2, 3).neighbors(3, 4).len(), 3);
    }

    #[test]
    fn adjacency() {
        let c = Coordinate::new(1, 1);
        assert!(c.is_adjacent(Coordinate::new(2, 2)));
        assert!(c.is_adjacent(Coordinate::new(0, 1)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Coordinate::new(3, 1)));
        assert!(c.is_diagonal_to(Coordinate::new(0, 2)));
        assert!(!c.is_diagonal_to(Coordinate::new(1, 2)));
    }
}
