/*
values.rs

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

//! Assign a value to every connector.
//!
//! Two connectors that touch the same cell must carry different values, so that the value of
//! a cell's expression designates exactly one of its connectors.
//! The assignment is a single greedy pass over the connectors in random order. It does not
//! backtrack: when a connector has no legal value left, the whole generation attempt is
//! dropped and the orchestrator starts over with a new path and a new graph.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

use super::Value;
use super::connectors::{Connector, ConnectorGraph, Link};
use super::error::StageError;

/// Give a value in `min..=max` to every link of the graph.
///
/// The returned connectors are in the same order as [`ConnectorGraph::links`].
///
/// # Errors
///
/// The function returns [`StageError::ValueAssignmentFailed`] when all the values in the range
/// are already used around the two ends of a connector.
pub fn assign_values<R: Rng + ?Sized>(
    graph: &ConnectorGraph,
    min: Value,
    max: Value,
    rng: &mut R,
) -> Result<Vec<Connector>, StageError> {
    let links: &[Link] = graph.links();
    let mut values: Vec<Option<Value>> = vec![None; links.len()];

    let mut order: Vec<usize> = (0..links.len()).collect();
    order.shuffle(rng);

    for i in order {
        let link: &Link = &links[i];
        let used: BTreeSet<Value> = graph
            .incident(link.a)
            .iter()
            .chain(graph.incident(link.b))
            .filter_map(|j| values[*j])
            .filter(|v| (min..=max).contains(v))
            .collect();
        match pick_free(min, max, &used, rng) {
            Some(v) => values[i] = Some(v),
            None => {
                debug!(
                    "No value left in {min}..={max} for the connector {}-{} ({} used around it)",
                    link.a,
                    link.b,
                    used.len()
                );
                return Err(StageError::ValueAssignmentFailed {
                    a: link.a,
                    b: link.b,
                });
            }
        }
    }

    links
        .iter()
        .zip(values)
        .map(|(link, value)| match value {
            Some(v) => Ok(Connector::from_link(link, v)),
            None => Err(StageError::ValueAssignmentFailed {
                a: link.a,
                b: link.b,
            }),
        })
        .collect()
}

/// Pick a value uniformly among the values of `min..=max` that are not in `used`.
///
/// `used` only holds values from the range. The function draws the rank of the value among the
/// free ones, and then skips the used values below it, so the cost does not depend on the size
/// of the range.
fn pick_free<R: Rng + ?Sized>(
    min: Value,
    max: Value,
    used: &BTreeSet<Value>,
    rng: &mut R,
) -> Option<Value> {
    let size: i64 = i64::from(max) - i64::from(min) + 1;
    let free: i64 = size - used.len() as i64;
    if free <= 0 {
        return None;
    }
    let mut v: i64 = i64::from(min) + rng.random_range(0..free);
    for u in used {
        if i64::from(*u) <= v {
            v += 1;
        } else {
            break;
        }
    }
    Value::try_from(v).ok()
}
