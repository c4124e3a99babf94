/*
error.rs

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

//! Errors raised while generating a puzzle.
//!
//! Every [`StageError`] is local to one generation attempt: the orchestrator (see
//! [`super::generate`]) drops the attempt and starts a new one from scratch.
//! Only [`GenerationExhausted`] leaves the engine.

use thiserror::Error;

use super::Value;
use super::coordinate::Coordinate;

/// Failure of one pipeline stage during a generation attempt.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StageError {
    /// No valid random walk found within the path generator attempt cap.
    #[error("no valid path found after {walks} random walks")]
    PathGenerationFailed { walks: usize },

    /// A connector had no legal value left (range too tight for the grid density).
    #[error("no legal value left for the connector between {a} and {b}")]
    ValueAssignmentFailed { a: Coordinate, b: Coordinate },

    /// Internal invariant broken while assigning cell answers.
    #[error("cell {cell}: {detail}")]
    CellAnswerInvariantViolated {
        cell: Coordinate,
        detail: &'static str,
    },

    /// No expression found for the target. The expression generator falls back to a plain
    /// addition instead of surfacing this error.
    #[error("cannot build an expression for {target}")]
    ExpressionSynthesisExhausted { target: Value },

    /// The assembled puzzle failed the validator.
    #[error("puzzle failed validation: {}", errors.join("; "))]
    ValidationFailed { errors: Vec<String> },
}

/// All the generation attempts failed.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("no puzzle generated after {attempts} attempts, try different settings")]
pub struct GenerationExhausted {
    /// Number of attempts made.
    pub attempts: usize,

    /// Failure of the last attempt, if any attempt ran.
    #[source]
    pub last_stage_error: Option<StageError>,
}
