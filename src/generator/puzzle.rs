/*
puzzle.rs

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

//! Generated puzzle.
//!
//! A [`Puzzle`] is an immutable value: the grid of cells with their answers and expressions,
//! the valued connectors, and the solution path.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Value;
use super::connectors::Connector;
use super::coordinate::Coordinate;
use super::path::SolutionPath;

/// Cell of the puzzle grid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub is_start: bool,
    pub is_finish: bool,

    /// Value of the connector the player must follow from this cell.
    /// Absent only for the FINISH cell.
    pub answer: Option<Value>,

    /// Arithmetic expression displayed in the cell, which evaluates to [`Cell::answer`].
    pub expression: Option<String>,
}

impl Cell {
    /// Create a cell with no answer and no expression.
    pub fn new(coordinate: Coordinate, rows: usize, cols: usize) -> Self {
        Self {
            row: coordinate.row,
            col: coordinate.col,
            is_start: coordinate.row == 0 && coordinate.col == 0,
            is_finish: coordinate.row + 1 == rows && coordinate.col + 1 == cols,
            answer: None,
            expression: None,
        }
    }

    /// Position of the cell.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.row, self.col)
    }
}

/// Puzzle object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Puzzle {
    /// Puzzle identifier.
    id: String,

    /// Name of the difficulty profile used to generate the puzzle.
    difficulty_label: String,

    /// Cells, indexed by row and then by column.
    grid: Vec<Vec<Cell>>,

    /// All the connectors between the cells.
    connectors: Vec<Connector>,

    /// Solution, from START to FINISH.
    solution: SolutionPath,
}

impl Puzzle {
    /// Create a [`Puzzle`] object.
    ///
    /// No verification is done. Use [`super::validator::validate`] to check the puzzle.
    pub fn new(
        id: String,
        difficulty_label: String,
        grid: Vec<Vec<Cell>>,
        connectors: Vec<Connector>,
        solution: SolutionPath,
    ) -> Self {
        Self {
            id,
            difficulty_label,
            grid,
            connectors,
            solution,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn difficulty_label(&self) -> &str {
        &self.difficulty_label
    }

    /// Number of rows in the grid.
    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    /// Number of columns in the grid.
    pub fn cols(&self) -> usize {
        self.grid.first().map_or(0, |r| r.len())
    }

    pub fn grid(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn solution(&self) -> &SolutionPath {
        &self.solution
    }

    /// Iterate over all the cells, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter().flatten()
    }

    /// Return the cell at the given position.
    pub fn cell(&self, coordinate: Coordinate) -> Option<&Cell> {
        self.grid
            .get(coordinate.row)
            .and_then(|r| r.get(coordinate.col))
    }

    /// Return the connector between the two cells, if any.
    pub fn connector_between(&self, a: Coordinate, b: Coordinate) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.joins(a, b))
    }

    /// Return the connectors that touch the cell.
    pub fn incident_connectors(&self, coordinate: Coordinate) -> Vec<&Connector> {
        self.connectors
            .iter()
            .filter(|c| c.touches(coordinate))
            .collect()
    }

    /// Return the neighbor reached by following the connector whose value is the cell's
    /// answer.
    ///
    /// Return [`None`] for the FINISH cell, or if zero or several connectors match.
    pub fn correct_move(&self, coordinate: Coordinate) -> Option<Coordinate> {
        let answer: Value = self.cell(coordinate)?.answer?;
        let mut matching = self
            .incident_connectors(coordinate)
            .into_iter()
            .filter(|c| c.value == answer);
        let connector: &Connector = matching.next()?;
        if matching.next().is_some() {
            return None;
        }
        Some(connector.other(coordinate))
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Puzzle {} ({}, {}x{})",
            self.id,
            self.difficulty_label,
            self.rows(),
            self.cols()
        )?;

        let label = |cell: &Cell| -> String {
            match (&cell.expression, cell.is_start, cell.is_finish) {
                (_, _, true) => String::from("FINISH"),
                (Some(e), true, _) => format!(">{e}"),
                (Some(e), false, _) => e.clone(),
                (None, _, _) => String::from("?"),
            }
        };
        let width: usize = self
            .cells()
            .map(|c| label(c).chars().count())
            .max()
            .unwrap_or(0)
            + 2;

        for row in &self.grid {
            let line: Vec<String> = row.iter().map(|c| format!("{:^width$}", label(c))).collect();
            writeln!(f, "|{}|", line.join("|"))?;
        }

        writeln!(f, "Connectors:")?;
        for c in &self.connectors {
            writeln!(f, "  {}-{} = {}", c.a, c.b, c.value)?;
        }

        let steps: Vec<String> = self.solution.cells().iter().map(|c| c.to_string()).collect();
        write!(f, "Solution: {}", steps.join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::connectors::ConnectorKind;

    /// 1x3 strip: START -> middle -> FINISH.
    fn strip() -> Puzzle {
        let c = |col: usize| Coordinate::new(0, col);
        let mut grid: Vec<Vec<Cell>> = vec![(0..3).map(|col| Cell::new(c(col), 1, 3)).collect()];
        grid[0][0].answer = Some(5);
        grid[0][0].expression = Some(String::from("2 + 3"));
        grid[0][1].answer = Some(9);
        grid[0][1].expression = Some(String::from("3 × 3"));
        let connectors = vec![
            Connector {
                a: c(0),
                b: c(1),
                kind: ConnectorKind::Horizontal,
                value: 5,
            },
            Connector {
                a: c(1),
                b: c(2),
                kind: ConnectorKind::Horizontal,
                value: 9,
            },
        ];
        Puzzle::new(
            String::from("strip"),
            String::from("Test"),
            grid,
            connectors,
            SolutionPath::from_vec(&[c(0), c(1), c(2)]),
        )
    }

    #[test]
    fn start_and_finish_flags() {
        let p = strip();
        assert!(p.grid()[0][0].is_start);
        assert!(p.grid()[0][2].is_finish);
        assert!(!p.grid()[0][1].is_start && !p.grid()[0][1].is_finish);
        assert_eq!((p.rows(), p.cols()), (1, 3));
    }

    #[test]
    fn queries() {
        let p = strip();
        let c = |col: usize| Coordinate::new(0, col);
        assert_eq!(p.connector_between(c(2), c(1)).map(|x| x.value), Some(9));
        assert!(p.connector_between(c(0), c(2)).is_none());
        assert_eq!(p.incident_connectors(c(1)).len(), 2);
        assert_eq!(p.correct_move(c(0)), Some(c(1)));
        assert_eq!(p.correct_move(c(1)), Some(c(2)));
        assert_eq!(p.correct_move(c(2)), None);
    }

    #[test]
    fn display() {
        let text: String = strip().to_string();
        assert!(text.starts_with("Puzzle strip (Test, 1x3)"));
        assert!(text.contains(">2 + 3"));
        assert!(text.contains("FINISH"));
        assert!(text.ends_with("Solution: (0,0) -> (0,1) -> (0,2)"));
    }
}
