/*
diagonals.rs

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

//! Diagonal orientation of the 2x2 blocks of the grid.
//!
//! A block is identified by its top-left cell.
//! At most one diagonal connector exists per block, going either from the top-left cell to the
//! bottom-right cell ([`DiagonalDirection::DownRight`]) or from the top-right cell to the
//! bottom-left cell ([`DiagonalDirection::DownLeft`]).
//! Two diagonals can therefore never cross.

use log::{Level, debug, log_enabled};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;

/// Orientation of the diagonal connector of a block.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DiagonalDirection {
    /// Connects `(r, c)` and `(r + 1, c + 1)`.
    DownRight,

    /// Connects `(r, c + 1)` and `(r + 1, c)`.
    DownLeft,
}

impl DiagonalDirection {
    /// Return the block and the orientation used by a diagonal move between two cells, or
    /// [`None`] if the move is not diagonal.
    pub fn of_move(from: Coordinate, to: Coordinate) -> Option<(Coordinate, DiagonalDirection)> {
        if !from.is_diagonal_to(to) {
            return None;
        }
        let block = Coordinate::new(from.row.min(to.row), from.col.min(to.col));
        let (dr, dc) = from.step_to(to);
        let direction = if dr == dc {
            DiagonalDirection::DownRight
        } else {
            DiagonalDirection::DownLeft
        };
        Some((block, direction))
    }

    /// Return the two cells connected by this diagonal in the given block.
    pub fn endpoints(&self, block: Coordinate) -> (Coordinate, Coordinate) {
        match self {
            DiagonalDirection::DownRight => (
                block,
                Coordinate::new(block.row + 1, block.col + 1),
            ),
            DiagonalDirection::DownLeft => (
                Coordinate::new(block.row, block.col + 1),
                Coordinate::new(block.row + 1, block.col),
            ),
        }
    }

    /// Pick an orientation at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            DiagonalDirection::DownRight
        } else {
            DiagonalDirection::DownLeft
        }
    }
}

/// Table of the `(rows - 1) x (cols - 1)` blocks of the grid, each with an optional
/// orientation.
///
/// The path generator fills it with the orientations its diagonal moves commit to.
/// [`build_diagonal_grid`] completes it so that every block has an orientation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DiagonalCommitments {
    /// Number of block rows.
    block_rows: usize,

    /// Number of block columns.
    block_cols: usize,

    /// Orientation of the blocks, in row-major order.
    blocks: Vec<Option<DiagonalDirection>>,
}

impl DiagonalCommitments {
    /// Create a table with no commitment for a `rows` x `cols` grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        let block_rows: usize = rows.saturating_sub(1);
        let block_cols: usize = cols.saturating_sub(1);
        Self {
            block_rows,
            block_cols,
            blocks: vec![None; block_rows * block_cols],
        }
    }

    /// Number of block rows.
    pub fn block_rows(&self) -> usize {
        self.block_rows
    }

    /// Number of block columns.
    pub fn block_cols(&self) -> usize {
        self.block_cols
    }

    /// Orientation committed for the block, if any.
    pub fn get(&self, block: Coordinate) -> Option<DiagonalDirection> {
        if block.in_bounds(self.block_rows, self.block_cols) {
            self.blocks[block.index(self.block_cols)]
        } else {
            None
        }
    }

    /// Commit the orientation of the block.
    pub fn commit(&mut self, block: Coordinate, direction: DiagonalDirection) {
        if block.in_bounds(self.block_rows, self.block_cols) {
            self.blocks[block.index(self.block_cols)] = Some(direction);
        }
    }

    /// Whether a move between the two cells is compatible with the committed orientations.
    ///
    /// Horizontal and vertical moves are always allowed. A diagonal move is allowed if its
    /// block is uncommitted or committed to the same orientation.
    pub fn allows(&self, from: Coordinate, to: Coordinate) -> bool {
        match DiagonalDirection::of_move(from, to) {
            None => true,
            Some((block, direction)) => match self.get(block) {
                None => true,
                Some(d) => d == direction,
            },
        }
    }

    /// Commit the block used by the move if the move is diagonal.
    pub fn commit_move(&mut self, from: Coordinate, to: Coordinate) {
        if let Some((block, direction)) = DiagonalDirection::of_move(from, to) {
            self.commit(block, direction);
        }
    }

    /// Number of committed blocks.
    pub fn num_committed(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_some()).count()
    }
}

/// Orientation of every block of the grid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DiagonalGrid {
    /// Orientation of the blocks, indexed by block row and then by block column.
    directions: Vec<Vec<DiagonalDirection>>,
}

impl DiagonalGrid {
    /// Number of block rows (`rows - 1`).
    pub fn block_rows(&self) -> usize {
        self.directions.len()
    }

    /// Number of block columns (`cols - 1`).
    pub fn block_cols(&self) -> usize {
        self.directions.first().map_or(0, |r| r.len())
    }

    /// Orientation of the given block.
    pub fn get(&self, block: Coordinate) -> Option<DiagonalDirection> {
        self.directions
            .get(block.row)
            .and_then(|r| r.get(block.col))
            .copied()
    }

    /// Iterate over the blocks and their orientation, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, DiagonalDirection)> + '_ {
        self.directions.iter().enumerate().flat_map(|(row, r)| {
            r.iter()
                .enumerate()
                .map(move |(col, d)| (Coordinate::new(row, col), *d))
        })
    }
}

/// Resolve the orientation of every block.
///
/// Committed blocks keep their orientation. The other blocks get a random one.
pub fn build_diagonal_grid<R: Rng + ?Sized>(
    commitments: &DiagonalCommitments,
    rng: &mut R,
) -> DiagonalGrid {
    let directions: Vec<Vec<DiagonalDirection>> = (0..commitments.block_rows())
        .map(|row| {
            (0..commitments.block_cols())
                .map(|col| {
                    commitments
                        .get(Coordinate::new(row, col))
                        .unwrap_or_else(|| DiagonalDirection::random(rng))
                })
                .collect()
        })
        .collect();

    if log_enabled!(Level::Debug) {
        debug!(
            "Diagonals ({} committed by the path):",
            commitments.num_committed()
        );
        for r in &directions {
            let s: String = r
                .iter()
                .map(|d| match d {
                    DiagonalDirection::DownRight => " \\",
                    DiagonalDirection::DownLeft => " /",
                })
                .collect();
            debug!("{s}");
        }
    }
    DiagonalGrid { directions }
}
