/*
lib.rs

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

//! Arithmaze puzzle engine.
//!
//! The [`generator`] module builds grid puzzles where the player walks from the top-left cell
//! to the bottom-right cell by solving the arithmetic expression displayed in each cell.
//!
//! ```
//! use arithmaze::generator::{GeneratorOptions, Preset, PuzzleGenerator, validate};
//!
//! let options = GeneratorOptions {
//!     seed: Some(42),
//!     ..GeneratorOptions::default()
//! };
//! let mut generator = PuzzleGenerator::new(Preset::Easy.profile(), options);
//! let puzzle = generator.generate().unwrap();
//! assert!(validate(&puzzle).valid);
//! ```

pub mod generator;
