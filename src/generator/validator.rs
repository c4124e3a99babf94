/*
validator.rs

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

//! Verify a complete puzzle.
//!
//! The validator does not depend on how the puzzle was generated: it only reads the grid, the
//! connectors, and the solution path of a [`Puzzle`].
//! Every broken rule is reported, one error message per faulty cell, connector, or move.

use log::{Level, debug, log_enabled};
use std::collections::HashSet;

use super::Value;
use super::connectors::{Connector, Incidence};
use super::coordinate::Coordinate;
use super::error::StageError;
use super::expression;
use super::puzzle::Puzzle;

/// Result of the puzzle verification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub valid: bool,

    /// Error messages, in the order of the checks.
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn push(&mut self, message: String) {
        self.errors.push(message);
    }

    /// Convert the report into a [`Result`].
    ///
    /// # Errors
    ///
    /// The method returns [`StageError::ValidationFailed`] with the error messages when the
    /// puzzle is not valid.
    pub fn into_result(self) -> Result<(), StageError> {
        if self.valid {
            Ok(())
        } else {
            Err(StageError::ValidationFailed {
                errors: self.errors,
            })
        }
    }
}

/// Run all the checks on the puzzle.
pub fn validate(puzzle: &Puzzle) -> ValidationReport {
    let rows: usize = puzzle.rows();
    let cols: usize = puzzle.cols();
    let connectors: &[Connector] = puzzle.connectors();
    let incidence = Incidence::new(rows, cols, connectors.iter().map(|c| (c.a, c.b)));
    let mut report = ValidationReport::default();

    check_path(puzzle, &mut report);
    check_connectors(puzzle, &incidence, &mut report);
    check_answers(puzzle, &incidence, &mut report);
    check_solution(puzzle, &mut report);
    check_expressions(puzzle, &mut report);

    report.valid = report.errors.is_empty();
    if !report.valid && log_enabled!(Level::Debug) {
        for e in &report.errors {
            debug!("Validation: {e}");
        }
    }
    report
}

/// The path goes from START to FINISH through adjacent cells, without visiting a cell twice.
fn check_path(puzzle: &Puzzle, report: &mut ValidationReport) {
    let rows: usize = puzzle.rows();
    let cols: usize = puzzle.cols();
    let cells: &[Coordinate] = puzzle.solution().cells();

    if cells.len() < 2 {
        report.push(format!("path: {} cell(s), at least 2 expected", cells.len()));
    }
    if rows == 0 || cols == 0 {
        report.push(String::from("grid: no cell"));
        return;
    }
    let start = Coordinate::new(0, 0);
    let finish = Coordinate::new(rows - 1, cols - 1);
    match cells.first() {
        Some(c) if *c != start => report.push(format!("path: starts at {c} instead of {start}")),
        _ => (),
    }
    match cells.last() {
        Some(c) if *c != finish => report.push(format!("path: ends at {c} instead of {finish}")),
        _ => (),
    }

    let mut seen: HashSet<Coordinate> = HashSet::with_capacity(cells.len());
    for c in cells {
        if !c.in_bounds(rows, cols) {
            report.push(format!("path: {c} is outside the {rows}x{cols} grid"));
        }
        if !seen.insert(*c) {
            report.push(format!("path: {c} is visited more than once"));
        }
    }
    for pair in cells.windows(2) {
        if !pair[0].is_adjacent(pair[1]) {
            report.push(format!("path: {} and {} are not adjacent", pair[0], pair[1]));
        }
    }
}

/// Connectors join adjacent cells of the grid, and the values around every cell are distinct.
fn check_connectors(puzzle: &Puzzle, incidence: &Incidence, report: &mut ValidationReport) {
    let rows: usize = puzzle.rows();
    let cols: usize = puzzle.cols();
    let connectors: &[Connector] = puzzle.connectors();

    for c in connectors {
        if !c.a.in_bounds(rows, cols) || !c.b.in_bounds(rows, cols) {
            report.push(format!("connector {}-{}: outside the grid", c.a, c.b));
        } else if c.a == c.b {
            report.push(format!("connector {}-{}: loops on the same cell", c.a, c.b));
        } else if !c.a.is_adjacent(c.b) {
            report.push(format!("connector {}-{}: cells are not adjacent", c.a, c.b));
        }
    }

    for cell in puzzle.cells() {
        let coordinate: Coordinate = cell.coordinate();
        let mut seen: HashSet<Value> = HashSet::new();
        let mut reported: HashSet<Value> = HashSet::new();
        for i in incidence.of(coordinate) {
            let value: Value = connectors[*i].value;
            if !seen.insert(value) && reported.insert(value) {
                report.push(format!(
                    "cell {coordinate}: several connectors have the value {value}"
                ));
            }
        }
    }
}

/// Every cell but FINISH designates exactly one of its connectors.
fn check_answers(puzzle: &Puzzle, incidence: &Incidence, report: &mut ValidationReport) {
    let connectors: &[Connector] = puzzle.connectors();

    for cell in puzzle.cells() {
        let coordinate: Coordinate = cell.coordinate();
        match (cell.is_finish, cell.answer) {
            (true, Some(a)) => {
                report.push(format!("cell {coordinate}: FINISH has the answer {a}"));
            }
            (true, None) => (),
            (false, None) => report.push(format!("cell {coordinate}: no answer")),
            (false, Some(a)) => {
                let matches: usize = incidence
                    .of(coordinate)
                    .iter()
                    .filter(|i| connectors[**i].value == a)
                    .count();
                if matches != 1 {
                    report.push(format!(
                        "cell {coordinate}: the answer {a} matches {matches} connectors instead of 1"
                    ));
                }
            }
        }
    }
}

/// Following the solution, every move uses the connector that carries the cell's answer.
fn check_solution(puzzle: &Puzzle, report: &mut ValidationReport) {
    for (from, to) in puzzle.solution().moves() {
        let answer: Option<Value> = puzzle.cell(from).and_then(|c| c.answer);
        match (puzzle.connector_between(from, to), answer) {
            (None, _) => report.push(format!("move {from} -> {to}: no connector")),
            (Some(c), Some(a)) if c.value == a => (),
            (Some(c), a) => report.push(format!(
                "move {from} -> {to}: the connector value {} differs from the answer {}",
                c.value,
                a.map_or_else(|| String::from("(none)"), |v| v.to_string())
            )),
        }
    }
}

/// Expressions evaluate to the cell answers. START and FINISH are not checked.
fn check_expressions(puzzle: &Puzzle, report: &mut ValidationReport) {
    for cell in puzzle.cells().filter(|c| !c.is_start && !c.is_finish) {
        let coordinate: Coordinate = cell.coordinate();
        let Some(text) = cell.expression.as_deref() else {
            report.push(format!("cell {coordinate}: no expression"));
            continue;
        };
        let result: Option<Value> = expression::evaluate(text);
        if result.is_none() || result != cell.answer {
            report.push(format!(
                "cell {coordinate}: the expression \"{text}\" does not evaluate to the answer"
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::connectors::ConnectorKind;
    use crate::generator::path::SolutionPath;
    use crate::generator::puzzle::Cell;

    fn connector(a: (usize, usize), b: (usize, usize), value: Value) -> Connector {
        let (a, b) = (Coordinate::new(a.0, a.1), Coordinate::new(b.0, b.1));
        let kind = match (a.row == b.row, a.col == b.col) {
            (true, _) => ConnectorKind::Horizontal,
            (_, true) => ConnectorKind::Vertical,
            _ => ConnectorKind::Diagonal,
        };
        Connector { a, b, kind, value }
    }

    /// 2x2 grid solved by (0,0) -> (0,1) -> (1,1).
    ///
    /// ```text
    /// (0,0) -3- (0,1)
    ///   |         |
    ///   5         7
    ///   |         |
    /// (1,0) -8- (1,1)
    /// ```
    fn square() -> Puzzle {
        let c = Coordinate::new;
        let mut grid: Vec<Vec<Cell>> = (0..2)
            .map(|r| (0..2).map(|col| Cell::new(c(r, col), 2, 2)).collect())
            .collect();
        let mut set = |r: usize, col: usize, answer: Value, text: &str| {
            grid[r][col].answer = Some(answer);
            grid[r][col].expression = Some(String::from(text));
        };
        set(0, 0, 3, "1 + 2");
        set(0, 1, 7, "10 − 3");
        set(1, 0, 8, "2 × 4");
        let connectors = vec![
            connector((0, 0), (0, 1), 3),
            connector((0, 0), (1, 0), 5),
            connector((0, 1), (1, 1), 7),
            connector((1, 0), (1, 1), 8),
        ];
        Puzzle::new(
            String::from("square"),
            String::from("Test"),
            grid,
            connectors,
            SolutionPath::from_vec(&[c(0, 0), c(0, 1), c(1, 1)]),
        )
    }

    fn rebuild(
        puzzle: &Puzzle,
        grid: Option<Vec<Vec<Cell>>>,
        connectors: Option<Vec<Connector>>,
        solution: Option<&[Coordinate]>,
    ) -> Puzzle {
        Puzzle::new(
            puzzle.id().to_string(),
            puzzle.difficulty_label().to_string(),
            grid.unwrap_or_else(|| puzzle.grid().to_vec()),
            connectors.unwrap_or_else(|| puzzle.connectors().to_vec()),
            solution.map_or_else(|| puzzle.solution().clone(), SolutionPath::from_vec),
        )
    }

    #[test]
    fn valid_puzzle() {
        let report = validate(&square());
        assert_eq!(report.errors, Vec::<String>::new());
        assert!(report.valid);
        assert_eq!(report.into_result(), Ok(()));
    }

    #[test]
    fn answer_matching_two_connectors() {
        // (1,0) has two connectors with the value 8
        let p = square();
        let mut connectors = p.connectors().to_vec();
        connectors[1].value = 8;
        let report = validate(&rebuild(&p, None, Some(connectors), None));
        assert!(!report.valid);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.starts_with("cell (1,0)") && e.contains("matches 2 connectors"))
        );
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.starts_with("cell (1,0)") && e.contains("several connectors"))
        );
        assert!(matches!(
            report.into_result(),
            Err(StageError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn one_error_per_faulty_cell() {
        let p = square();
        let mut grid = p.grid().to_vec();
        grid[0][1].expression = Some(String::from("10 − 4"));
        grid[1][0].expression = Some(String::from("garbage"));
        let report = validate(&rebuild(&p, Some(grid), None, None));
        assert_eq!(report.errors.len(), 2, "{:?}", report.errors);
        assert!(report.errors[0].starts_with("cell (0,1)"));
        assert!(report.errors[1].starts_with("cell (1,0)"));
    }

    #[test]
    fn start_expression_is_not_checked() {
        let p = square();
        let mut grid = p.grid().to_vec();
        grid[0][0].expression = None;
        assert!(validate(&rebuild(&p, Some(grid), None, None)).valid);
    }

    #[test]
    fn finish_with_answer() {
        let p = square();
        let mut grid = p.grid().to_vec();
        grid[1][1].answer = Some(7);
        let report = validate(&rebuild(&p, Some(grid), None, None));
        assert_eq!(
            report.errors,
            vec![String::from("cell (1,1): FINISH has the answer 7")]
        );
    }

    #[test]
    fn broken_paths() {
        let p = square();
        let c = Coordinate::new;

        let report = validate(&rebuild(&p, None, None, Some(&[c(0, 0)])));
        assert!(report.errors.iter().any(|e| e.contains("at least 2")));
        assert!(report.errors.iter().any(|e| e.contains("ends at (0,0)")));

        let report = validate(&rebuild(&p, None, None, Some(&[c(0, 1), c(1, 1)])));
        assert!(report.errors.iter().any(|e| e.contains("starts at (0,1)")));

        // Jump from (0,0) to (1,1) through the missing diagonal, then back and forth
        let report = validate(&rebuild(
            &p,
            None,
            None,
            Some(&[c(0, 0), c(1, 1), c(0, 1), c(1, 1)]),
        ));
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.contains("visited more than once")));
        assert!(
            report
                .errors
                .iter()
                .any(|e| e == "move (0,0) -> (1,1): no connector")
        );

        let report = validate(&rebuild(&p, None, None, Some(&[c(0, 0), c(2, 2)])));
        assert!(report.errors.iter().any(|e| e.contains("outside the 2x2 grid")));
        assert!(report.errors.iter().any(|e| e.contains("not adjacent")));
    }

    #[test]
    fn looping_connector() {
        let p = square();
        let mut connectors = p.connectors().to_vec();
        connectors.push(connector((1, 0), (1, 0), 9));
        let report = validate(&rebuild(&p, None, Some(connectors), None));
        assert!(!report.valid);
        assert!(
            report
                .errors
                .contains(&String::from("connector (1,0)-(1,0): loops on the same cell"))
        );
        // Both ends count, so the cell sees the value 9 twice
        assert!(
            report
                .errors
                .contains(&String::from("cell (1,0): several connectors have the value 9"))
        );
    }

    #[test]
    fn wrong_move_value() {
        // The path goes down first but the START answer points to the right
        let p = square();
        let c = Coordinate::new;
        let report = validate(&rebuild(&p, None, None, Some(&[c(0, 0), c(1, 0), c(1, 1)])));
        assert_eq!(
            report.errors,
            vec![String::from(
                "move (0,0) -> (1,0): the connector value 5 differs from the answer 3"
            )]
        );
    }
}
