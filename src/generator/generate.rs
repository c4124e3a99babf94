/*
generate.rs

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

//! Generate complete puzzles.
//!
//! One attempt runs every stage of the pipeline in order, from the random path to the
//! expressions, and then verifies the assembled puzzle.
//! Any stage failure drops the attempt. Nothing is kept from one attempt to the next.
//!
//! [`generate_puzzle`] retries the attempts up to a limit. [`PuzzleGenerator`] wraps it with
//! its own seeded random generator and records statistics about the last generation.

use log::{Level, debug, error, info, log_enabled};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

use super::answers::assign_answers;
use super::connectors::build_connector_graph;
use super::diagonals::build_diagonal_grid;
use super::error::{GenerationExhausted, StageError};
use super::expression::assign_expressions;
use super::profile::DifficultyProfile;
use super::puzzle::Puzzle;
use super::random_path::RandomPath;
use super::validator::validate;
use super::values::assign_values;

/// Default number of attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 20;

/// Run the whole pipeline once.
///
/// # Errors
///
/// The function returns the [`StageError`] of the first stage that fails, or
/// [`StageError::ValidationFailed`] if the assembled puzzle is not valid.
pub fn attempt_once<R: Rng + ?Sized>(
    profile: &DifficultyProfile,
    rng: &mut R,
) -> Result<Puzzle, StageError> {
    let rows: usize = profile.rows();
    let cols: usize = profile.cols();

    let (path, commitments) = RandomPath::new(
        rows,
        cols,
        profile.min_path_length(),
        profile.max_path_length(),
    )
    .generate(rng)?;
    let diagonals = build_diagonal_grid(&commitments, rng);
    let graph = build_connector_graph(rows, cols, &diagonals);
    let connectors = assign_values(&graph, profile.connector_min(), profile.connector_max(), rng)?;
    let grid = assign_answers(rows, cols, &path, &connectors, rng)?;
    let grid = assign_expressions(grid, profile, rng);

    let id: String = format!("{:016x}", rng.random::<u64>());
    let puzzle = Puzzle::new(id, profile.label().to_string(), grid, connectors, path);
    validate(&puzzle).into_result()?;
    Ok(puzzle)
}

/// Run the attempts and return the puzzle with the number of attempts it took.
fn run_attempts<R: Rng + ?Sized>(
    profile: &DifficultyProfile,
    max_attempts: usize,
    rng: &mut R,
) -> Result<(Puzzle, usize), GenerationExhausted> {
    let mut last_stage_error: Option<StageError> = None;

    for attempt in 1..=max_attempts {
        match attempt_once(profile, rng) {
            Ok(puzzle) => {
                debug!("Puzzle {} generated at attempt {attempt}", puzzle.id());
                if log_enabled!(Level::Debug) {
                    debug!("\n{puzzle}");
                }
                return Ok((puzzle, attempt));
            }
            Err(e) => {
                if matches!(e, StageError::CellAnswerInvariantViolated { .. }) {
                    error!("Attempt {attempt}/{max_attempts}: {e}");
                } else {
                    debug!("Attempt {attempt}/{max_attempts}: {e}");
                }
                last_stage_error = Some(e);
            }
        }
    }

    info!(
        "No puzzle for the {} profile after {max_attempts} attempts",
        profile.label()
    );
    Err(GenerationExhausted {
        attempts: max_attempts,
        last_stage_error,
    })
}

/// Generate a puzzle for the profile.
///
/// # Errors
///
/// The function returns [`GenerationExhausted`] when none of the `max_attempts` attempts
/// produced a valid puzzle.
pub fn generate_puzzle<R: Rng + ?Sized>(
    profile: &DifficultyProfile,
    max_attempts: usize,
    rng: &mut R,
) -> Result<Puzzle, GenerationExhausted> {
    run_attempts(profile, max_attempts, rng).map(|(puzzle, _)| puzzle)
}

/// Options for the [`PuzzleGenerator`] object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Number of attempts for every puzzle.
    pub max_attempts: usize,

    /// Seed of the random generator. A random seed is used when not set.
    pub seed: Option<u64>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

/// [`PuzzleGenerator`] object.
///
/// The object owns its random generator. Two generators created with the same profile and the
/// same seed produce the same puzzles.
pub struct PuzzleGenerator {
    profile: DifficultyProfile,
    max_attempts: usize,
    seed: u64,
    rng: StdRng,

    /// Number of attempts it took to generate the last puzzle.
    pub attempts: usize,

    /// Duration in seconds it took to generate the last puzzle.
    pub duration: f32,

    /// Time when the generation started. Used to compute the [`PuzzleGenerator::duration`].
    start: Instant,
}

impl PuzzleGenerator {
    /// Create the object.
    pub fn new(profile: DifficultyProfile, options: GeneratorOptions) -> Self {
        let seed: u64 = options.seed.unwrap_or_else(rand::random);
        Self {
            profile,
            max_attempts: options.max_attempts,
            seed,
            rng: StdRng::seed_from_u64(seed),
            attempts: 0,
            duration: 0.0,
            start: Instant::now(),
        }
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    /// Seed of the random generator, to reproduce the puzzles.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate the next puzzle.
    ///
    /// # Errors
    ///
    /// The method returns [`GenerationExhausted`] when all the attempts failed.
    pub fn generate(&mut self) -> Result<Puzzle, GenerationExhausted> {
        self.start = Instant::now();
        let result = run_attempts(&self.profile, self.max_attempts, &mut self.rng);
        self.duration = self.start.elapsed().as_secs_f32();

        match result {
            Ok((puzzle, attempts)) => {
                self.attempts = attempts;
                debug!(
                    "Attempts = {}  Duration = {}  Path length = {}",
                    self.attempts,
                    self.duration,
                    puzzle.solution().len()
                );
                Ok(puzzle)
            }
            Err(e) => {
                self.attempts = e.attempts;
                Err(e)
            }
        }
    }
}
