/*
profile.rs

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

//! Difficulty profiles.
//!
//! A [`DifficultyProfile`] holds everything the generator needs to know about a puzzle: the
//! grid size, the arithmetic operations allowed in the expressions with their operand ranges,
//! the range of the connector values, and the length of the solution path.
//!
//! Profiles come from one of the built-in [`Preset`] objects, or from a [`CustomProfile`]
//! that [`DifficultyProfile::custom`] validates.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;
use thiserror::Error;

use super::Value;
use super::expression::Operation;

/// Smallest grid accepted for custom profiles.
pub const MIN_ROWS: usize = 3;
pub const MIN_COLS: usize = 4;

/// Shortest solution path accepted.
pub const MIN_PATH_LENGTH: usize = 4;

/// Set of the operations allowed in the expressions.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Operations {
    pub addition: bool,
    pub subtraction: bool,
    pub multiplication: bool,
    pub division: bool,
}

impl Operations {
    pub const ADDITION_ONLY: Operations = Operations {
        addition: true,
        subtraction: false,
        multiplication: false,
        division: false,
    };

    pub const ADD_SUB: Operations = Operations {
        addition: true,
        subtraction: true,
        multiplication: false,
        division: false,
    };

    pub const NO_DIVISION: Operations = Operations {
        addition: true,
        subtraction: true,
        multiplication: true,
        division: false,
    };

    pub const ALL: Operations = Operations {
        addition: true,
        subtraction: true,
        multiplication: true,
        division: true,
    };

    /// Build the set from a list of operations.
    pub fn from_list(operations: &[Operation]) -> Self {
        Self {
            addition: operations.contains(&Operation::Addition),
            subtraction: operations.contains(&Operation::Subtraction),
            multiplication: operations.contains(&Operation::Multiplication),
            division: operations.contains(&Operation::Division),
        }
    }

    /// Whether the operation is allowed.
    pub fn contains(&self, operation: Operation) -> bool {
        match operation {
            Operation::Addition => self.addition,
            Operation::Subtraction => self.subtraction,
            Operation::Multiplication => self.multiplication,
            Operation::Division => self.division,
        }
    }

    /// Return the allowed operations.
    pub fn enabled(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|o| self.contains(*o))
            .collect()
    }
}

impl fmt::Display for Operations {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let glyphs: Vec<String> = self
            .enabled()
            .iter()
            .map(|o| o.glyph().to_string())
            .collect();
        write!(f, "{}", glyphs.join(" "))
    }
}

/// Relative probability of drawing each operation.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct OperationWeights {
    pub addition: u32,
    pub subtraction: u32,
    pub multiplication: u32,
    pub division: u32,
}

impl Default for OperationWeights {
    fn default() -> Self {
        Self {
            addition: 1,
            subtraction: 1,
            multiplication: 1,
            division: 1,
        }
    }
}

impl OperationWeights {
    /// Weight of the operation.
    pub fn get(&self, operation: Operation) -> u32 {
        match operation {
            Operation::Addition => self.addition,
            Operation::Subtraction => self.subtraction,
            Operation::Multiplication => self.multiplication,
            Operation::Division => self.division,
        }
    }
}

/// Error raised when a profile is not usable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("at least one operation must be enabled")]
    NoOperation,

    #[error("the addition and subtraction range must be at least 1 (got {0})")]
    AddSubRange(Value),

    #[error("the multiplication and division range must be at least 2 (got {0})")]
    MultDivRange(Value),

    #[error("invalid connector range {min}..={max}: need 1 <= min < max")]
    ConnectorRange { min: Value, max: Value },

    #[error("the grid must be at least {MIN_ROWS}x{MIN_COLS} (got {rows}x{cols})")]
    GridTooSmall { rows: usize, cols: usize },

    #[error("the minimum path length must be at least {MIN_PATH_LENGTH} (got {0})")]
    PathTooShort(usize),

    #[error("invalid path length range {min}..={max} for a grid of {cells} cells")]
    PathLengths { min: usize, max: usize, cells: usize },

    #[error("the {0} weight must be positive")]
    Weight(Operation),
}

/// Difficulty profile object.
///
/// The object cannot be modified once created.
/// Deserialized profiles go through [`DifficultyProfile::custom`] and are therefore validated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "CustomProfile")]
pub struct DifficultyProfile {
    /// Name of the profile, copied into the generated puzzles.
    label: String,

    rows: usize,
    cols: usize,

    /// Operations allowed in the expressions.
    operations: Operations,

    /// Largest operand for additions and subtractions.
    add_sub_range: Value,

    /// Largest operand for multiplications, and largest divisor for divisions.
    mult_div_range: Value,

    /// Smallest connector value.
    connector_min: Value,

    /// Largest connector value.
    connector_max: Value,

    /// Probability of drawing each operation.
    weights: OperationWeights,

    /// Minimum number of cells in the solution path.
    min_path_length: usize,

    /// Maximum number of cells in the solution path.
    max_path_length: usize,
}

impl DifficultyProfile {
    /// Minimum path length for a grid: 60% of the cells, and at least [`MIN_PATH_LENGTH`].
    pub fn derived_min_path_length(rows: usize, cols: usize) -> usize {
        MIN_PATH_LENGTH.max(rows * cols * 60 / 100)
    }

    /// Maximum path length for a grid: 85% of the cells.
    pub fn derived_max_path_length(rows: usize, cols: usize) -> usize {
        rows * cols * 85 / 100
    }

    /// Create a profile from user-provided settings.
    ///
    /// # Errors
    ///
    /// The function returns a [`ProfileError`] for the first rule the settings break.
    pub fn custom(settings: CustomProfile) -> Result<Self, ProfileError> {
        let profile = Self {
            min_path_length: settings
                .min_path_length
                .unwrap_or_else(|| Self::derived_min_path_length(settings.rows, settings.cols)),
            max_path_length: settings
                .max_path_length
                .unwrap_or_else(|| Self::derived_max_path_length(settings.rows, settings.cols)),
            label: settings.label,
            rows: settings.rows,
            cols: settings.cols,
            operations: settings.operations,
            add_sub_range: settings.add_sub_range,
            mult_div_range: settings.mult_div_range,
            connector_min: settings.connector_min,
            connector_max: settings.connector_max,
            weights: settings.weights,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Verify that the profile can be used to generate puzzles.
    ///
    /// # Errors
    ///
    /// The method returns a [`ProfileError`] for the first rule the profile breaks.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let enabled: Vec<Operation> = self.operations.enabled();
        if enabled.is_empty() {
            return Err(ProfileError::NoOperation);
        }
        if self.add_sub_range < 1 {
            return Err(ProfileError::AddSubRange(self.add_sub_range));
        }
        if (self.operations.multiplication || self.operations.division) && self.mult_div_range < 2
        {
            return Err(ProfileError::MultDivRange(self.mult_div_range));
        }
        if self.connector_min < 1 || self.connector_max <= self.connector_min {
            return Err(ProfileError::ConnectorRange {
                min: self.connector_min,
                max: self.connector_max,
            });
        }
        if self.rows < MIN_ROWS || self.cols < MIN_COLS {
            return Err(ProfileError::GridTooSmall {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.min_path_length < MIN_PATH_LENGTH {
            return Err(ProfileError::PathTooShort(self.min_path_length));
        }
        let cells: usize = self.rows * self.cols;
        if self.max_path_length < self.min_path_length || self.max_path_length > cells {
            return Err(ProfileError::PathLengths {
                min: self.min_path_length,
                max: self.max_path_length,
                cells,
            });
        }
        if let Some(o) = enabled.into_iter().find(|o| self.weights.get(*o) == 0) {
            return Err(ProfileError::Weight(o));
        }
        Ok(())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn operations(&self) -> Operations {
        self.operations
    }

    pub fn add_sub_range(&self) -> Value {
        self.add_sub_range
    }

    pub fn mult_div_range(&self) -> Value {
        self.mult_div_range
    }

    pub fn connector_min(&self) -> Value {
        self.connector_min
    }

    pub fn connector_max(&self) -> Value {
        self.connector_max
    }

    pub fn weights(&self) -> OperationWeights {
        self.weights
    }

    pub fn min_path_length(&self) -> usize {
        self.min_path_length
    }

    pub fn max_path_length(&self) -> usize {
        self.max_path_length
    }
}

impl TryFrom<CustomProfile> for DifficultyProfile {
    type Error = ProfileError;

    fn try_from(settings: CustomProfile) -> Result<Self, Self::Error> {
        DifficultyProfile::custom(settings)
    }
}

impl fmt::Display for DifficultyProfile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {}x{}, operations [{}], +/− up to {}, ×/÷ up to {}, connectors {}..={}, path {}..={}",
            self.label,
            self.rows,
            self.cols,
            self.operations,
            self.add_sub_range,
            self.mult_div_range,
            self.connector_min,
            self.connector_max,
            self.min_path_length,
            self.max_path_length
        )
    }
}

/// Settings for a custom profile.
///
/// Missing fields in a JSON profile file take the default values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CustomProfile {
    pub label: String,
    pub rows: usize,
    pub cols: usize,
    pub operations: Operations,
    pub add_sub_range: Value,
    pub mult_div_range: Value,
    pub connector_min: Value,
    pub connector_max: Value,
    pub weights: OperationWeights,

    /// Override of the derived minimum path length.
    pub min_path_length: Option<usize>,

    /// Override of the derived maximum path length.
    pub max_path_length: Option<usize>,
}

impl Default for CustomProfile {
    fn default() -> Self {
        Self {
            label: String::from("Custom"),
            rows: 4,
            cols: 5,
            operations: Operations::ADD_SUB,
            add_sub_range: 20,
            mult_div_range: 10,
            connector_min: 1,
            connector_max: 20,
            weights: OperationWeights::default(),
            min_path_length: None,
            max_path_length: None,
        }
    }
}

/// Built-in difficulty levels, from the smallest grid with additions only to the largest grid
/// with all four operations.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    FromRepr,
    Default,
)]
#[repr(u8)]
pub enum Preset {
    #[default]
    Starter,
    Beginner,
    Easy,
    Casual,
    Medium,
    Tricky,
    Hard,
    Expert,
    Master,
    Grandmaster,
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Preset::Starter => "Starter",
            Preset::Beginner => "Beginner",
            Preset::Easy => "Easy",
            Preset::Casual => "Casual",
            Preset::Medium => "Medium",
            Preset::Tricky => "Tricky",
            Preset::Hard => "Hard",
            Preset::Expert => "Expert",
            Preset::Master => "Master",
            Preset::Grandmaster => "Grandmaster",
        };
        write!(f, "{s}")
    }
}

impl Preset {
    /// Return all the presets, from the easiest to the hardest.
    pub fn all() -> Vec<Preset> {
        (0..).map_while(Preset::from_repr).collect()
    }

    /// Return the difficulty profile of the preset.
    pub fn profile(&self) -> DifficultyProfile {
        // (rows, cols, operations, add_sub_range, mult_div_range, connector range, weights)
        let (rows, cols, operations, add_sub_range, mult_div_range, (connector_min, connector_max), w) =
            match self {
                Preset::Starter => (3, 4, Operations::ADDITION_ONLY, 10, 2, (2, 16), [1, 0, 0, 0]),
                Preset::Beginner => (3, 5, Operations::ADD_SUB, 15, 2, (1, 18), [3, 1, 0, 0]),
                Preset::Easy => (4, 4, Operations::ADD_SUB, 20, 2, (1, 20), [1, 1, 0, 0]),
                Preset::Casual => (4, 5, Operations::NO_DIVISION, 20, 6, (1, 20), [3, 2, 1, 0]),
                Preset::Medium => (5, 5, Operations::NO_DIVISION, 25, 9, (1, 25), [2, 2, 1, 0]),
                Preset::Tricky => (5, 6, Operations::ALL, 25, 9, (1, 25), [2, 2, 1, 1]),
                Preset::Hard => (6, 6, Operations::ALL, 30, 10, (1, 30), [1, 1, 1, 1]),
                Preset::Expert => (6, 7, Operations::ALL, 40, 12, (1, 36), [1, 1, 2, 2]),
                Preset::Master => (7, 7, Operations::ALL, 50, 12, (1, 40), [1, 1, 2, 2]),
                Preset::Grandmaster => (7, 8, Operations::ALL, 60, 12, (1, 48), [1, 1, 2, 2]),
            };
        DifficultyProfile {
            label: self.to_string(),
            rows,
            cols,
            operations,
            add_sub_range,
            mult_div_range,
            connector_min,
            connector_max,
            weights: OperationWeights {
                addition: w[0],
                subtraction: w[1],
                multiplication: w[2],
                division: w[3],
            },
            min_path_length: DifficultyProfile::derived_min_path_length(rows, cols),
            max_path_length: DifficultyProfile::derived_max_path_length(rows, cols),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_valid_presets() {
        let presets = Preset::all();
        assert_eq!(presets.len(), 10);
        assert_eq!(presets[0], Preset::Starter);
        assert_eq!(presets[9], Preset::Grandmaster);
        for p in presets {
            let profile = p.profile();
            assert_eq!(profile.validate(), Ok(()), "{p}");
            assert_eq!(profile.label(), p.to_string());
        }
    }

    #[test]
    fn derived_path_lengths() {
        assert_eq!(DifficultyProfile::derived_min_path_length(4, 5), 12);
        assert_eq!(DifficultyProfile::derived_max_path_length(4, 5), 17);
        assert_eq!(DifficultyProfile::derived_min_path_length(3, 4), 7);
        assert_eq!(DifficultyProfile::derived_max_path_length(3, 4), 10);
        assert_eq!(DifficultyProfile::derived_min_path_length(8, 8), 38);
        assert_eq!(DifficultyProfile::derived_max_path_length(8, 8), 54);
    }

    #[test]
    fn path_length_overrides() {
        let p = DifficultyProfile::custom(CustomProfile {
            min_path_length: Some(8),
            max_path_length: Some(9),
            ..CustomProfile::default()
        })
        .unwrap();
        assert_eq!((p.min_path_length(), p.max_path_length()), (8, 9));
    }

    #[test]
    fn custom_profile_rules() {
        let check = |settings: CustomProfile, expected: ProfileError| {
            assert_eq!(DifficultyProfile::custom(settings), Err(expected));
        };
        let base = CustomProfile::default();

        check(
            CustomProfile {
                operations: Operations::from_list(&[]),
                ..base.clone()
            },
            ProfileError::NoOperation,
        );
        check(
            CustomProfile {
                add_sub_range: 0,
                ..base.clone()
            },
            ProfileError::AddSubRange(0),
        );
        check(
            CustomProfile {
                operations: Operations::from_list(&[Operation::Division]),
                mult_div_range: 1,
                ..base.clone()
            },
            ProfileError::MultDivRange(1),
        );
        check(
            CustomProfile {
                connector_min: 5,
                connector_max: 5,
                ..base.clone()
            },
            ProfileError::ConnectorRange { min: 5, max: 5 },
        );
        check(
            CustomProfile {
                connector_min: 0,
                ..base.clone()
            },
            ProfileError::ConnectorRange { min: 0, max: 20 },
        );
        check(
            CustomProfile {
                rows: 2,
                ..base.clone()
            },
            ProfileError::GridTooSmall { rows: 2, cols: 5 },
        );
        check(
            CustomProfile {
                cols: 3,
                ..base.clone()
            },
            ProfileError::GridTooSmall { rows: 4, cols: 3 },
        );
        check(
            CustomProfile {
                min_path_length: Some(3),
                ..base.clone()
            },
            ProfileError::PathTooShort(3),
        );
        check(
            CustomProfile {
                min_path_length: Some(10),
                max_path_length: Some(9),
                ..base.clone()
            },
            ProfileError::PathLengths {
                min: 10,
                max: 9,
                cells: 20,
            },
        );
        check(
            CustomProfile {
                weights: OperationWeights {
                    subtraction: 0,
                    ..OperationWeights::default()
                },
                ..base.clone()
            },
            ProfileError::Weight(Operation::Subtraction),
        );
    }

    #[test]
    fn mult_div_range_ignored_without_mult_div() {
        let p = DifficultyProfile::custom(CustomProfile {
            operations: Operations::ADD_SUB,
            mult_div_range: 0,
            ..CustomProfile::default()
        });
        assert!(p.is_ok());
    }

    #[test]
    fn profile_from_json() {
        let settings: CustomProfile =
            serde_json::from_str(r#"{"rows": 5, "cols": 6, "connector_max": 30}"#).unwrap();
        assert_eq!(settings.rows, 5);
        assert_eq!(settings.connector_min, 1);
        let p = DifficultyProfile::custom(settings).unwrap();
        assert_eq!(p.max_path_length(), 25);
    }

    #[test]
    fn deserialized_profile_is_validated() {
        let text: String = serde_json::to_string(&Preset::Expert.profile()).unwrap();
        let p: DifficultyProfile = serde_json::from_str(&text).unwrap();
        assert_eq!(p, Preset::Expert.profile());

        let bad = r#"{
            "rows": 0,
            "cols": 0,
            "operations": {"addition": false, "subtraction": false, "multiplication": false, "division": false},
            "connector_min": 9,
            "connector_max": 3
        }"#;
        let e = serde_json::from_str::<DifficultyProfile>(bad).unwrap_err();
        assert!(e.to_string().contains("at least one operation"), "{e}");

        let small = r#"{"rows": 2, "cols": 5}"#;
        assert!(serde_json::from_str::<DifficultyProfile>(small).is_err());
    }
}
