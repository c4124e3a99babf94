/*
random_path.rs

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

//! Generate a random solution path.
//!
//! The path is a random walk from START to FINISH through 8-adjacent cells.
//! A diagonal move commits the orientation of the 2x2 block it crosses (see
//! [`super::diagonals`]), so that a later diagonal move cannot cross it.

use log::{Level, debug, log_enabled};
use rand::Rng;
use std::time::Instant;

use super::coordinate::Coordinate;
use super::diagonals::DiagonalCommitments;
use super::error::StageError;
use super::path::SolutionPath;

/// Number of random walks to try before giving up.
pub const MAX_WALKS: usize = 200;

/// Grids with this number of cells or less use the uniform move selection.
const SMALL_GRID_CELLS: usize = 20;

/// Reason why a walk was dropped.
#[derive(Debug, PartialEq)]
enum WalkError {
    /// No unvisited neighbor can be reached.
    DeadEnd,

    /// The walk reached the maximum length before FINISH.
    TooLong,

    /// FINISH was reached before the minimum length.
    TooShort,

    /// The path does not change direction often enough.
    Boring,
}

/// [`RandomPath`] object.
pub struct RandomPath {
    /// Number of rows in the grid.
    pub rows: usize,

    /// Number of columns in the grid.
    pub cols: usize,

    /// Minimum number of cells in the path.
    pub min_length: usize,

    /// Maximum number of cells in the path.
    pub max_length: usize,

    /// Number of random walks it took to generate the last path.
    pub walks: usize,

    /// Duration in seconds it took to generate the last path.
    pub duration: f32,

    /// Time when the path generation started. Used to compute the [`RandomPath::duration`].
    start: Instant,
}

impl RandomPath {
    /// Create the object.
    pub fn new(rows: usize, cols: usize, min_length: usize, max_length: usize) -> Self {
        Self {
            rows,
            cols,
            min_length,
            max_length,
            walks: 0,
            duration: 0.0,
            start: Instant::now(),
        }
    }

    /// First cell of every path.
    pub fn start_cell(&self) -> Coordinate {
        Coordinate::new(0, 0)
    }

    /// Last cell of every path.
    pub fn finish_cell(&self) -> Coordinate {
        Coordinate::new(self.rows - 1, self.cols - 1)
    }

    /// Generate and return a random path with the diagonal orientations it committed to.
    ///
    /// # Errors
    ///
    /// The method returns [`StageError::PathGenerationFailed`] if none of the [`MAX_WALKS`]
    /// random walks produced a valid path.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(SolutionPath, DiagonalCommitments), StageError> {
        self.walks = 0;
        self.duration = 0.0;
        self.start = Instant::now();

        debug!(
            "Generating a path for a {}x{} grid, length {}..={}",
            self.rows, self.cols, self.min_length, self.max_length
        );

        while self.walks < MAX_WALKS {
            self.walks += 1;
            match self.walk(rng) {
                Ok((path, commitments)) => {
                    self.duration = self.start.elapsed().as_secs_f32();
                    debug!(
                        "Walks = {}  Duration = {}  Length = {}  Turns = {}",
                        self.walks,
                        self.duration,
                        path.len(),
                        path.turns()
                    );
                    if log_enabled!(Level::Debug) {
                        self.debug(&path);
                    }
                    return Ok((path, commitments));
                }
                Err(e) => debug!("    Walk {} dropped: {e:?}", self.walks),
            }
        }
        self.duration = self.start.elapsed().as_secs_f32();
        debug!("No path after {} walks ({}s)", self.walks, self.duration);
        Err(StageError::PathGenerationFailed { walks: self.walks })
    }

    /// Run one random walk from START.
    fn walk<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(SolutionPath, DiagonalCommitments), WalkError> {
        let finish: Coordinate = self.finish_cell();
        let mut path = SolutionPath::new(self.max_length);
        let mut commitments = DiagonalCommitments::new(self.rows, self.cols);
        let mut current: Coordinate = self.start_cell();
        path.push(current);

        while current != finish {
            if path.len() >= self.max_length {
                return Err(WalkError::TooLong);
            }

            let moves: Vec<Coordinate> = current
                .neighbors(self.rows, self.cols)
                .into_iter()
                .filter(|c| !path.contains(*c) && commitments.allows(current, *c))
                .collect();
            if moves.is_empty() {
                return Err(WalkError::DeadEnd);
            }

            let next: Coordinate = if self.rows * self.cols <= SMALL_GRID_CELLS {
                self.pick_uniform(&moves, &path, rng)
            } else {
                self.pick_scored(current, &moves, &path, rng)
            };
            commitments.commit_move(current, next);
            path.push(next);
            current = next;
        }

        if path.len() < self.min_length {
            return Err(WalkError::TooShort);
        }
        if !path.is_interesting() {
            return Err(WalkError::Boring);
        }
        Ok((path, commitments))
    }

    /// Ratio between the current length of the walk and the maximum length.
    fn progress(&self, path: &SolutionPath) -> f64 {
        path.len() as f64 / self.max_length as f64
    }

    /// Move selection for small grids.
    ///
    /// Pick a random move. Past 60% of the length budget, 40% of the moves go to the cell
    /// closest to FINISH instead.
    fn pick_uniform<R: Rng + ?Sized>(
        &self,
        moves: &[Coordinate],
        path: &SolutionPath,
        rng: &mut R,
    ) -> Coordinate {
        let finish: Coordinate = self.finish_cell();
        if self.progress(path) > 0.6
            && rng.random_bool(0.4)
            && let Some(c) = moves.iter().min_by_key(|c| c.manhattan(finish))
        {
            return *c;
        }
        moves[rng.random_range(0..moves.len())]
    }

    /// Move selection for larger grids.
    ///
    /// Each move is scored by its distance to FINISH (weighted more as the walk uses its
    /// length budget), by the number of free cells around it (to avoid dead ends), and by a
    /// small random jitter. The best score wins.
    fn pick_scored<R: Rng + ?Sized>(
        &self,
        current: Coordinate,
        moves: &[Coordinate],
        path: &SolutionPath,
        rng: &mut R,
    ) -> Coordinate {
        let finish: Coordinate = self.finish_cell();
        let pull: f64 = (self.progress(path) - 0.5).max(0.0) * 2.0;
        let mut best: Coordinate = moves[0];
        let mut best_score: f64 = f64::NEG_INFINITY;

        for c in moves {
            let free: usize = c
                .neighbors(self.rows, self.cols)
                .into_iter()
                .filter(|n| *n != current && !path.contains(*n))
                .count();
            let score: f64 = -(c.manhattan(finish) as f64) * pull
                + 0.5 * free as f64
                + rng.random_range(0.0..0.5);
            if score > best_score {
                best_score = score;
                best = *c;
            }
        }
        best
    }

    /// Print the path as a grid of step numbers.
    fn debug(&self, path: &SolutionPath) {
        let mut s: String = String::new();
        for row in 0..self.rows {
            s.clear();
            for col in 0..self.cols {
                match path.position(Coordinate::new(row, col)) {
                    Some(i) => s.push_str(&format!("{:^4}", i + 1)),
                    None => s.push_str(" .  "),
                }
            }
            debug!("{s}");
        }
    }
}
