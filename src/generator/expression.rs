/*
expression.rs

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

//! Arithmetic expressions displayed in the cells.
//!
//! An expression is made of two integers and an operator, such as `12 ÷ 4`.
//! The expression of a cell evaluates to the cell's answer.

use clap::ValueEnum;
use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::Value;
use super::error::StageError;
use super::profile::DifficultyProfile;
use super::puzzle::Cell;

/// Number of operation draws before falling back to a plain addition.
const MAX_TRIES: usize = 10;

/// Largest divisor used in divisions.
const MAX_DIVISOR: Value = 12;

/// Largest dividend used in divisions.
const MAX_DIVIDEND: Value = 1000;

/// Arithmetic operation.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum)]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    /// All the operations.
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    /// Retrieve the character displayed for the operation.
    pub fn glyph(&self) -> char {
        match self {
            Operation::Addition => '+',
            Operation::Subtraction => '−',
            Operation::Multiplication => '×',
            Operation::Division => '÷',
        }
    }

    /// Retrieve an [`Operation`] from its displayed character.
    pub fn from_glyph(c: char) -> Option<Operation> {
        let o = match c {
            '+' => Operation::Addition,
            '−' => Operation::Subtraction,
            '×' => Operation::Multiplication,
            '÷' => Operation::Division,
            _ => return None,
        };
        Some(o)
    }

    /// Compute the result of the operation.
    ///
    /// Return [`None`] on overflow, on division by zero, and on inexact division (answers are
    /// integers).
    pub fn apply(&self, left: Value, right: Value) -> Option<Value> {
        match self {
            Operation::Addition => left.checked_add(right),
            Operation::Subtraction => left.checked_sub(right),
            Operation::Multiplication => left.checked_mul(right),
            Operation::Division => {
                if right == 0 || left.checked_rem(right)? != 0 {
                    None
                } else {
                    left.checked_div(right)
                }
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
            Operation::Multiplication => "multiplication",
            Operation::Division => "division",
        };
        write!(f, "{s}")
    }
}

/// Error raised when parsing expression text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseExpressionError {
    #[error("expected \"<int> <op> <int>\", found {0} tokens")]
    TokenCount(usize),

    #[error("invalid operand \"{0}\"")]
    InvalidOperand(String),

    #[error("unknown operator \"{0}\"")]
    UnknownOperator(String),
}

/// Expression object.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Expression {
    pub left: Value,
    pub operation: Operation,
    pub right: Value,
}

impl Expression {
    /// Create an [`Expression`] object.
    pub fn new(left: Value, operation: Operation, right: Value) -> Self {
        Self {
            left,
            operation,
            right,
        }
    }

    /// Compute the value of the expression.
    pub fn evaluate(&self) -> Option<Value> {
        self.operation.apply(self.left, self.right)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operation.glyph(), self.right)
    }
}

impl FromStr for Expression {
    type Err = ParseExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.len() != 3 {
            return Err(ParseExpressionError::TokenCount(tokens.len()));
        }
        let operand = |t: &str| -> Result<Value, ParseExpressionError> {
            t.parse::<Value>()
                .map_err(|_| ParseExpressionError::InvalidOperand(t.to_string()))
        };
        let mut glyph = tokens[1].chars();
        let operation: Operation = match (glyph.next(), glyph.next()) {
            (Some(c), None) => Operation::from_glyph(c),
            _ => None,
        }
        .ok_or_else(|| ParseExpressionError::UnknownOperator(tokens[1].to_string()))?;

        Ok(Expression::new(operand(tokens[0])?, operation, operand(tokens[2])?))
    }
}

/// Evaluate expression text.
///
/// Return [`None`] if the text is malformed or if the result is not an integer.
pub fn evaluate(text: &str) -> Option<Value> {
    text.parse::<Expression>().ok()?.evaluate()
}

/// Pick an operation among the enabled operations, according to their weights.
///
/// Addition is used when no operation is enabled.
fn draw_operation<R: Rng + ?Sized>(profile: &DifficultyProfile, rng: &mut R) -> Operation {
    let enabled: Vec<Operation> = profile.operations().enabled();
    match enabled.choose_weighted(rng, |o| profile.weights().get(*o)) {
        Ok(o) => *o,
        Err(_) => Operation::Addition,
    }
}

/// Try to build an expression with the given operation.
///
/// Return [`None`] when the operand ranges of the profile do not allow the operation for this
/// target.
pub fn build<R: Rng + ?Sized>(
    operation: Operation,
    target: Value,
    profile: &DifficultyProfile,
    rng: &mut R,
) -> Option<Expression> {
    match operation {
        Operation::Addition => {
            let range: Value = profile.add_sub_range();
            let low: Value = Value::max(1, target - range);
            let high: Value = range.min(target - 1);
            if low > high {
                return None;
            }
            let a: Value = rng.random_range(low..=high);
            Some(Expression::new(a, operation, target - a))
        }
        Operation::Subtraction => {
            let range: Value = profile.add_sub_range();
            if range <= target {
                return None;
            }
            let b: Value = rng.random_range(1..=range - target);
            Some(Expression::new(target + b, operation, b))
        }
        Operation::Multiplication => {
            let range: Value = profile.mult_div_range();
            let mut pairs: Vec<(Value, Value)> = Vec::new();
            let mut a: Value = 2;
            while a <= range && a * a <= target {
                if target % a == 0 && target / a <= range {
                    pairs.push((a, target / a));
                }
                a += 1;
            }
            let (a, b) = *pairs.choose(rng)?;
            if rng.random_bool(0.5) {
                Some(Expression::new(a, operation, b))
            } else {
                Some(Expression::new(b, operation, a))
            }
        }
        Operation::Division => {
            let range: Value = profile.mult_div_range();
            let divisors: Vec<Value> = (2..=range.min(MAX_DIVISOR))
                .filter(|b| target.checked_mul(*b).is_some_and(|a| a <= MAX_DIVIDEND))
                .collect();
            let b: Value = *divisors.choose(rng)?;
            Some(Expression::new(target * b, operation, b))
        }
    }
}

/// Expression used when no operation fits the profile.
///
/// `2 − 1` for 1, otherwise the target split in two halves. Operand ranges are ignored.
pub fn fallback(target: Value) -> Expression {
    if target == 1 {
        return Expression::new(2, Operation::Subtraction, 1);
    }
    let half: Value = target / 2;
    Expression::new(half, Operation::Addition, target - half)
}

/// Draw operations until one of them produces an expression for the target.
///
/// # Errors
///
/// The function returns [`StageError::ExpressionSynthesisExhausted`] after [`MAX_TRIES`]
/// failed draws.
pub fn try_synthesize<R: Rng + ?Sized>(
    target: Value,
    profile: &DifficultyProfile,
    rng: &mut R,
) -> Result<Expression, StageError> {
    for _ in 0..MAX_TRIES {
        let operation: Operation = draw_operation(profile, rng);
        if let Some(e) = build(operation, target, profile, rng) {
            return Ok(e);
        }
    }
    Err(StageError::ExpressionSynthesisExhausted { target })
}

/// Build an expression that evaluates to the target. Never fails.
pub fn synthesize<R: Rng + ?Sized>(
    target: Value,
    profile: &DifficultyProfile,
    rng: &mut R,
) -> Expression {
    try_synthesize(target, profile, rng).unwrap_or_else(|e| {
        debug!("{e}: using the fallback expression");
        fallback(target)
    })
}

/// Set the expression of every cell that has an answer, except FINISH.
pub fn assign_expressions<R: Rng + ?Sized>(
    grid: Vec<Vec<Cell>>,
    profile: &DifficultyProfile,
    rng: &mut R,
) -> Vec<Vec<Cell>> {
    grid.into_iter()
        .map(|row| {
            row.into_iter()
                .map(|mut cell| {
                    if !cell.is_finish
                        && let Some(target) = cell.answer
                    {
                        cell.expression = Some(synthesize(target, profile, rng).to_string());
                    }
                    cell
                })
                .collect()
        })
        .collect()
}
