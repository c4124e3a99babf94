/*
answers.rs

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

//! Assign the answer of every cell.
//!
//! The answer of a path cell is the value of the connector to the next cell of the path.
//! The answer of a cell outside the path is a decoy: the value of one of its connectors, picked
//! at random. Because connector values are unique around each cell, every answer designates
//! exactly one connector.

use log::error;
use rand::Rng;

use super::connectors::{Connector, Incidence};
use super::coordinate::Coordinate;
use super::error::StageError;
use super::path::SolutionPath;
use super::puzzle::Cell;

/// Build the grid of cells with their answers. Expressions are left empty.
///
/// # Errors
///
/// The function returns [`StageError::CellAnswerInvariantViolated`] when a path move has no
/// connector or when a cell has no connector at all. Both cases denote a bug in the previous
/// stages.
pub fn assign_answers<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    path: &SolutionPath,
    connectors: &[Connector],
    rng: &mut R,
) -> Result<Vec<Vec<Cell>>, StageError> {
    let incidence = Incidence::new(rows, cols, connectors.iter().map(|c| (c.a, c.b)));
    let mut grid: Vec<Vec<Cell>> = (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| Cell::new(Coordinate::new(row, col), rows, cols))
                .collect()
        })
        .collect();

    // Path cells, in path order. The move out of a cell gives its answer.
    for (from, to) in path.moves() {
        let connector: &Connector = incidence
            .of(from)
            .iter()
            .map(|i| &connectors[*i])
            .find(|c| c.joins(from, to))
            .ok_or_else(|| {
                error!("No connector between the path cells {from} and {to}");
                StageError::CellAnswerInvariantViolated {
                    cell: from,
                    detail: "no connector to the next path cell",
                }
            })?;
        grid[from.row][from.col].answer = Some(connector.value);
    }

    // Decoys for the other cells
    for row in grid.iter_mut() {
        for cell in row.iter_mut() {
            let coordinate: Coordinate = cell.coordinate();
            if cell.is_finish || path.contains(coordinate) {
                continue;
            }
            let incident: &[usize] = incidence.of(coordinate);
            if incident.is_empty() {
                error!("Cell {coordinate} has no connector");
                return Err(StageError::CellAnswerInvariantViolated {
                    cell: coordinate,
                    detail: "no incident connector",
                });
            }
            let i: usize = incident[rng.random_range(0..incident.len())];
            cell.answer = Some(connectors[i].value);
        }
    }
    Ok(grid)
}
