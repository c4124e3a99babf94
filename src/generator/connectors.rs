/*
connectors.rs

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

//! Connectors between the cells of the puzzle grid.
//!
//! A connector is an undirected edge between two adjacent cells. The player moves from a cell
//! to a neighbor through the connector that carries the value of the cell's expression.

use log::{Level, debug, log_enabled};
use serde::{Deserialize, Serialize};

use super::Value;
use super::coordinate::Coordinate;
use super::diagonals::DiagonalGrid;

/// Orientation of a connector.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    Horizontal,
    Vertical,
    Diagonal,
}

/// A connector that does not have a value yet.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Link {
    pub a: Coordinate,
    pub b: Coordinate,
    pub kind: ConnectorKind,
}

/// A valued connector.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Connector {
    pub a: Coordinate,
    pub b: Coordinate,
    pub kind: ConnectorKind,
    pub value: Value,
}

impl Connector {
    /// Create a [`Connector`] object from a link and its value.
    pub fn from_link(link: &Link, value: Value) -> Self {
        Self {
            a: link.a,
            b: link.b,
            kind: link.kind,
            value,
        }
    }

    /// Whether the given cell is one end of the connector.
    pub fn touches(&self, cell: Coordinate) -> bool {
        self.a == cell || self.b == cell
    }

    /// Whether the connector joins the two given cells, in any order.
    pub fn joins(&self, c1: Coordinate, c2: Coordinate) -> bool {
        (self.a == c1 && self.b == c2) || (self.a == c2 && self.b == c1)
    }

    /// Given one end of the connector, return the other end.
    pub fn other(&self, cell: Coordinate) -> Coordinate {
        if self.a == cell { self.b } else { self.a }
    }
}

/// For each cell, the indexes of the connectors that touch it.
///
/// Indexed by the position of the cell in a flattened, row-major `rows * cols` array.
/// Ends that lie outside the grid are ignored. A connector from a cell to itself is listed
/// twice for that cell.
#[derive(Debug, Clone, Default)]
pub struct Incidence {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<usize>>,
}

impl Incidence {
    /// Build the incidence lists from the ends of the connectors, in connector order.
    pub fn new<I>(rows: usize, cols: usize, ends: I) -> Self
    where
        I: IntoIterator<Item = (Coordinate, Coordinate)>,
    {
        let mut cells: Vec<Vec<usize>> = vec![Vec::new(); rows * cols];
        for (i, (a, b)) in ends.into_iter().enumerate() {
            for c in [a, b] {
                if c.in_bounds(rows, cols) {
                    cells[c.index(cols)].push(i);
                }
            }
        }
        Self { rows, cols, cells }
    }

    /// Indexes of the connectors touching the cell.
    pub fn of(&self, cell: Coordinate) -> &[usize] {
        if cell.in_bounds(self.rows, self.cols) {
            &self.cells[cell.index(self.cols)]
        } else {
            &[]
        }
    }
}

/// All the connectors of a grid, before they get a value.
#[derive(Debug, Clone)]
pub struct ConnectorGraph {
    rows: usize,
    cols: usize,
    links: Vec<Link>,
    incidence: Incidence,
}

impl ConnectorGraph {
    /// Build a graph from an arbitrary list of links.
    pub fn from_links(rows: usize, cols: usize, links: Vec<Link>) -> Self {
        let incidence = Incidence::new(rows, cols, links.iter().map(|l| (l.a, l.b)));
        Self {
            rows,
            cols,
            links,
            incidence,
        }
    }

    /// Number of rows in the grid.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in the grid.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// All the links.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Indexes (in [`ConnectorGraph::links`]) of the links touching the cell.
    pub fn incident(&self, cell: Coordinate) -> &[usize] {
        self.incidence.of(cell)
    }

    /// Print the links of every cell.
    pub fn debug(&self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = Coordinate::new(row, col);
                let s: String = self
                    .incident(cell)
                    .iter()
                    .map(|i| {
                        let l: &Link = &self.links[*i];
                        let other: Coordinate = if l.a == cell { l.b } else { l.a };
                        format!(" {other}")
                    })
                    .collect();
                debug!("{cell} -->{s}");
            }
        }
    }
}

/// Expand the grid and the block orientations into the full list of connectors.
///
/// One horizontal connector per pair of adjacent cells in a row, one vertical connector per
/// pair of adjacent cells in a column, and one diagonal connector per block.
pub fn build_connector_graph(rows: usize, cols: usize, diagonals: &DiagonalGrid) -> ConnectorGraph {
    let mut links: Vec<Link> = Vec::with_capacity(3 * rows * cols);

    for row in 0..rows {
        for col in 0..cols.saturating_sub(1) {
            links.push(Link {
                a: Coordinate::new(row, col),
                b: Coordinate::new(row, col + 1),
                kind: ConnectorKind::Horizontal,
            });
        }
    }
    for col in 0..cols {
        for row in 0..rows.saturating_sub(1) {
            links.push(Link {
                a: Coordinate::new(row, col),
                b: Coordinate::new(row + 1, col),
                kind: ConnectorKind::Vertical,
            });
        }
    }
    for (block, direction) in diagonals.iter() {
        let (a, b) = direction.endpoints(block);
        links.push(Link {
            a,
            b,
            kind: ConnectorKind::Diagonal,
        });
    }

    debug!("Connector graph: {} connectors", links.len());
    let graph = ConnectorGraph::from_links(rows, cols, links);
    if log_enabled!(Level::Debug) {
        graph.debug();
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::diagonals::{DiagonalCommitments, DiagonalDirection, build_diagonal_grid};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn graph(rows: usize, cols: usize, seed: u64) -> ConnectorGraph {
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = build_diagonal_grid(&DiagonalCommitments::new(rows, cols), &mut rng);
        build_connector_graph(rows, cols, &grid)
    }

    #[test]
    fn connector_count() {
        // 3 rows x 3 horizontal + 4 cols x 2 vertical + 2 x 3 diagonals
        let g = graph(3, 4, 1);
        assert_eq!(g.links().len(), 9 + 8 + 6);
        let count = |k: ConnectorKind| g.links().iter().filter(|l| l.kind == k).count();
        assert_eq!(count(ConnectorKind::Horizontal), 9);
        assert_eq!(count(ConnectorKind::Vertical), 8);
        assert_eq!(count(ConnectorKind::Diagonal), 6);
    }

    #[test]
    fn every_link_joins_adjacent_cells() {
        let g = graph(5, 6, 3);
        for l in g.links() {
            assert!(l.a.is_adjacent(l.b), "{:?}", l);
            assert!(l.a.in_bounds(5, 6) && l.b.in_bounds(5, 6));
        }
    }

    #[test]
    fn incidence_lists() {
        let g = graph(4, 5, 11);
        let total: usize = (0..4)
            .flat_map(|r| (0..5).map(move |c| Coordinate::new(r, c)))
            .map(|c| g.incident(c).len())
            .sum();
        assert_eq!(total, 2 * g.links().len());
        for r in 0..4 {
            for c in 0..5 {
                let cell = Coordinate::new(r, c);
                assert!(!g.incident(cell).is_empty());
                assert!(g.incident(cell).len() <= 8);
                for i in g.incident(cell) {
                    let link: &Link = &g.links()[*i];
                    assert!(link.a == cell || link.b == cell);
                }
            }
        }
    }

    #[test]
    fn incidence_keeps_every_end() {
        let ends = [
            (Coordinate::new(0, 0), Coordinate::new(0, 1)),
            (Coordinate::new(1, 1), Coordinate::new(1, 1)),
            (Coordinate::new(1, 0), Coordinate::new(5, 5)),
        ];
        let incidence = Incidence::new(2, 2, ends);
        assert_eq!(incidence.of(Coordinate::new(0, 0)), &[0]);
        assert_eq!(incidence.of(Coordinate::new(0, 1)), &[0]);
        assert_eq!(incidence.of(Coordinate::new(1, 1)), &[1, 1]);
        assert_eq!(incidence.of(Coordinate::new(1, 0)), &[2]);
        assert!(incidence.of(Coordinate::new(5, 5)).is_empty());
    }

    #[test]
    fn diagonals_follow_grid() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut c = DiagonalCommitments::new(3, 4);
        c.commit(Coordinate::new(1, 2), DiagonalDirection::DownLeft);
        let grid = build_diagonal_grid(&c, &mut rng);
        let g = build_connector_graph(3, 4, &grid);
        assert!(g.links().iter().any(|l| l.kind == ConnectorKind::Diagonal
            && l.a == Coordinate::new(1, 3)
            && l.b == Coordinate::new(2, 2)));
        assert!(!g.links().iter().any(|l| l.a == Coordinate::new(1, 2)
            && l.b == Coordinate::new(2, 3)));
    }
}
