/*
generate-test.rs

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

use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use arithmaze::generator::expression::{self, Expression, Operation};
use arithmaze::generator::profile::{Operations, OperationWeights};
use arithmaze::generator::{
    Coordinate, CustomProfile, DifficultyProfile, GenerationExhausted, GeneratorOptions, Preset,
    ProfileError, Puzzle, PuzzleGenerator, StageError, Value, generate_puzzle, validate,
};

/// Verify the puzzle properties without the validator.
fn check_invariants(puzzle: &Puzzle) {
    let context = || format!("puzzle {}\n{puzzle}", puzzle.id());

    for cell in puzzle.cells() {
        let c: Coordinate = cell.coordinate();
        let values: Vec<Value> = puzzle
            .incident_connectors(c)
            .iter()
            .map(|x| x.value)
            .collect();
        let distinct: HashSet<Value> = values.iter().copied().collect();
        assert_eq!(distinct.len(), values.len(), "{c}: {}", context());

        if cell.is_finish {
            assert_eq!(cell.answer, None, "{}", context());
            assert_eq!(cell.expression, None, "{}", context());
            continue;
        }
        let answer: Value = cell.answer.unwrap();
        let matches: usize = values.iter().filter(|v| **v == answer).count();
        assert_eq!(matches, 1, "{c}: {}", context());

        let text: &str = cell.expression.as_deref().unwrap();
        assert_eq!(expression::evaluate(text), Some(answer), "{c}: {}", context());
    }

    for (from, to) in puzzle.solution().moves() {
        let connector = puzzle.connector_between(from, to).unwrap();
        assert_eq!(
            Some(connector.value),
            puzzle.cell(from).unwrap().answer,
            "{}",
            context()
        );
    }

    let report = validate(puzzle);
    assert!(report.valid, "{:?}: {}", report.errors, context());
}

#[test]
fn addition_only_scenario() {
    let profile = DifficultyProfile::custom(CustomProfile {
        rows: 4,
        cols: 5,
        operations: Operations::ADDITION_ONLY,
        add_sub_range: 15,
        connector_min: 5,
        connector_max: 15,
        ..CustomProfile::default()
    })
    .unwrap();
    assert_eq!(profile.min_path_length(), 12);
    assert_eq!(profile.max_path_length(), 17);

    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let puzzle: Puzzle = generate_puzzle(&profile, 20, &mut rng).unwrap();
        check_invariants(&puzzle);

        let length: usize = puzzle.solution().len();
        assert!((12..=17).contains(&length), "length {length}");

        for cell in puzzle.cells() {
            if cell.is_finish {
                assert_eq!(cell.expression, None);
                continue;
            }
            let e: Expression = cell.expression.as_deref().unwrap().parse().unwrap();
            assert_eq!(e.operation, Operation::Addition);
            assert!((1..=15).contains(&e.left), "{e}");
            assert!((1..=15).contains(&e.right), "{e}");
        }
    }
}

#[test]
fn presets_generate_valid_puzzles() {
    for (i, preset) in Preset::all().into_iter().enumerate() {
        let mut generator = PuzzleGenerator::new(
            preset.profile(),
            GeneratorOptions {
                seed: Some(100 + i as u64),
                ..GeneratorOptions::default()
            },
        );
        for _ in 0..5 {
            let puzzle: Puzzle = generator.generate().unwrap();
            assert_eq!(puzzle.difficulty_label(), preset.to_string());
            assert_eq!(puzzle.rows(), preset.profile().rows());
            assert_eq!(puzzle.cols(), preset.profile().cols());
            check_invariants(&puzzle);
        }
    }
}

#[test]
#[ignore]
fn thousand_puzzles_per_preset() {
    for preset in Preset::all() {
        let mut generator = PuzzleGenerator::new(preset.profile(), GeneratorOptions::default());
        let mut failures: usize = 0;
        for _ in 0..1000 {
            match generator.generate() {
                Ok(puzzle) => check_invariants(&puzzle),
                Err(_) => failures += 1,
            }
        }
        println!("{preset}: {failures} failure(s)");
        assert!(failures <= 10, "{preset}: {failures} failures");
    }
}

#[test]
fn correct_moves_lead_to_finish() {
    let mut rng = StdRng::seed_from_u64(77);
    let puzzle: Puzzle = generate_puzzle(&Preset::Hard.profile(), 20, &mut rng).unwrap();

    let mut walk: Vec<Coordinate> = vec![Coordinate::new(0, 0)];
    while let Some(next) = puzzle.correct_move(walk[walk.len() - 1]) {
        assert!(walk.len() <= puzzle.rows() * puzzle.cols());
        walk.push(next);
    }
    assert_eq!(walk, puzzle.solution().cells());
    assert_eq!(
        walk.last(),
        Some(&Coordinate::new(puzzle.rows() - 1, puzzle.cols() - 1))
    );
}

#[test]
fn decoys_point_to_a_neighbor() {
    let mut rng = StdRng::seed_from_u64(3);
    let puzzle: Puzzle = generate_puzzle(&Preset::Tricky.profile(), 20, &mut rng).unwrap();
    for cell in puzzle.cells() {
        let c: Coordinate = cell.coordinate();
        if cell.is_finish || puzzle.solution().contains(c) {
            continue;
        }
        let next: Coordinate = puzzle.correct_move(c).unwrap();
        assert!(c.is_adjacent(next));
    }
}

#[test]
fn too_few_connector_values() {
    let profile = DifficultyProfile::custom(CustomProfile {
        rows: 5,
        cols: 5,
        connector_min: 1,
        connector_max: 3,
        ..CustomProfile::default()
    })
    .unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let e: GenerationExhausted = generate_puzzle(&profile, 8, &mut rng).unwrap_err();
    assert_eq!(e.attempts, 8);
    assert!(matches!(
        e.last_stage_error,
        Some(StageError::ValueAssignmentFailed { .. })
    ));
}

#[test]
fn invalid_custom_profiles() {
    let mult = DifficultyProfile::custom(CustomProfile {
        operations: Operations::from_list(&[Operation::Addition, Operation::Multiplication]),
        mult_div_range: 1,
        ..CustomProfile::default()
    });
    assert_eq!(mult, Err(ProfileError::MultDivRange(1)));

    let weights = DifficultyProfile::custom(CustomProfile {
        operations: Operations::ALL,
        weights: OperationWeights {
            division: 0,
            ..OperationWeights::default()
        },
        ..CustomProfile::default()
    });
    assert_eq!(weights, Err(ProfileError::Weight(Operation::Division)));
}

#[test]
fn target_one() {
    let profile = DifficultyProfile::custom(CustomProfile {
        operations: Operations::ADDITION_ONLY,
        ..CustomProfile::default()
    })
    .unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let e: Expression = expression::synthesize(1, &profile, &mut rng);
    assert_eq!(e.to_string(), "2 − 1");
    assert_eq!(expression::evaluate(&e.to_string()), Some(1));
}

#[test]
fn puzzle_json() {
    let mut rng = StdRng::seed_from_u64(19);
    let puzzle: Puzzle = generate_puzzle(&Preset::Beginner.profile(), 20, &mut rng).unwrap();
    let text: String = serde_json::to_string(&puzzle).unwrap();
    let back: Puzzle = serde_json::from_str(&text).unwrap();
    assert_eq!(back, puzzle);
    assert!(back.solution().contains(Coordinate::new(0, 0)));
    assert!(validate(&back).valid);
}
