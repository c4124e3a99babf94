/*
generator.rs

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

//! Generate arithmetic path puzzles.
//!
//! A puzzle is a grid of cells. Each cell displays an arithmetic expression, and connectors
//! carrying integer values join the neighboring cells, horizontally, vertically, and along one
//! of the two diagonals of every 2x2 block.
//! Starting from the top-left cell (START), the player computes the expression of the current
//! cell and follows the connector that carries the result, until the bottom-right cell
//! (FINISH).
//!
//! A puzzle is generated in several stages. Each stage consumes the output of the previous one:
//!
//! * [`random_path::RandomPath`] draws the solution path, a random walk from START to FINISH.
//!   Diagonal moves commit the orientation of the 2x2 block they cross, in a
//!   [`diagonals::DiagonalCommitments`] object.
//! * [`diagonals::build_diagonal_grid`] completes the orientation of the remaining blocks.
//! * [`connectors::build_connector_graph`] lists all the connectors of the grid.
//! * [`values::assign_values`] gives every connector a value, distinct from the values of the
//!   other connectors that touch the same cells.
//! * [`answers::assign_answers`] gives every cell its answer: the value of the connector to the
//!   next path cell, or the value of a random connector for the cells outside the path.
//! * [`expression::assign_expressions`] writes an expression for every answer.
//! * [`validator::validate`] verifies the assembled [`puzzle::Puzzle`].
//!
//! Stages fail with a [`error::StageError`]. In that case [`generate::generate_puzzle`] drops
//! the attempt and starts over, up to a maximum number of attempts.
//!
//! The [`profile::DifficultyProfile`] object gives the grid size, the operations, and the
//! value ranges to use.

pub mod answers;
pub mod connectors;
pub mod coordinate;
pub mod diagonals;
pub mod error;
pub mod expression;
pub mod generate;
pub mod path;
pub mod profile;
pub mod puzzle;
pub mod random_path;
pub mod validator;
pub mod values;

/// Connector values, cell answers, and expression operands.
pub type Value = i32;

pub use coordinate::Coordinate;
pub use error::{GenerationExhausted, StageError};
pub use generate::{GeneratorOptions, PuzzleGenerator, attempt_once, generate_puzzle};
pub use profile::{CustomProfile, DifficultyProfile, Preset, ProfileError};
pub use puzzle::{Cell, Puzzle};
pub use validator::{ValidationReport, validate};
