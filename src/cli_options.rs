/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options are intended for developers tuning the difficulty profiles.
//! The command generates puzzles for a preset or for a custom profile, verifies them, and
//! prints them as text or as JSON.
//!
//! # Examples
//!
//! List the presets:
//!
//! ```text
//! $ arithmaze --ls
//! Starter: 3x4, operations [+], +/− up to 10, ×/÷ up to 2, connectors 2..=16, path 7..=10
//! Beginner: 3x5, operations [+ −], +/− up to 15, ×/÷ up to 2, connectors 1..=18, path 9..=12
//! ...
//! ```
//!
//! Generate three puzzles at the Hard level, and print some statistics:
//!
//! ```text
//! $ arithmaze -p hard -c 3 -s
//! ```
//!
//! Generate a puzzle for a custom 5x6 grid with additions and multiplications, reproducibly:
//!
//! ```text
//! $ arithmaze --rows 5 --cols 6 --ops addition,multiplication --mult-div-range 9 --seed 42
//! ```

use clap::{ArgGroup, Parser};
use log::debug;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use thiserror::Error;

use arithmaze::generator::Value;
use arithmaze::generator::expression::Operation;
use arithmaze::generator::profile::{CustomProfile, DifficultyProfile, Operations, Preset, ProfileError};
use arithmaze::generator::{GeneratorOptions, Puzzle, PuzzleGenerator, generate, validate};

const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 Hervé Quatremain\nLicense GPL-3.0-or-later"
);

/// Generate Arithmaze puzzles for developers.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
#[command(group(ArgGroup::new("custom").multiple(true)))]
struct Args {
    /// List the presets
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// Difficulty preset to generate puzzles for
    #[arg(value_enum, short, long, conflicts_with = "custom")]
    preset: Option<Preset>,

    /// JSON file with custom profile settings
    #[arg(long, group = "custom")]
    profile: Option<PathBuf>,

    /// Number of rows in the grid (custom profile)
    #[arg(long, group = "custom")]
    rows: Option<usize>,

    /// Number of columns in the grid (custom profile)
    #[arg(long, group = "custom")]
    cols: Option<usize>,

    /// Comma-separated list of operations (custom profile)
    #[arg(value_enum, long, value_delimiter = ',', group = "custom")]
    ops: Vec<Operation>,

    /// Largest operand for additions and subtractions (custom profile)
    #[arg(long, group = "custom")]
    add_sub_range: Option<Value>,

    /// Largest operand for multiplications and divisions (custom profile)
    #[arg(long, group = "custom")]
    mult_div_range: Option<Value>,

    /// Smallest connector value (custom profile)
    #[arg(long, group = "custom")]
    connector_min: Option<Value>,

    /// Largest connector value (custom profile)
    #[arg(long, group = "custom")]
    connector_max: Option<Value>,

    /// Number of puzzles to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Seed of the random generator
    #[arg(long)]
    seed: Option<u64>,

    /// Number of attempts for each puzzle
    #[arg(short, long, default_value_t = generate::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,

    /// Print the puzzles in JSON format
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Print some statistics after generating the puzzles
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Error while building the profile from the command-line options.
#[derive(Error, Debug)]
enum OptionError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse the profile file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid profile: {0}")]
    Profile(#[from] ProfileError),
}

/// Build the difficulty profile from the preset or from the custom options.
fn build_profile(args: &Args) -> Result<DifficultyProfile, OptionError> {
    let custom: bool = args.profile.is_some()
        || args.rows.is_some()
        || args.cols.is_some()
        || !args.ops.is_empty()
        || args.add_sub_range.is_some()
        || args.mult_div_range.is_some()
        || args.connector_min.is_some()
        || args.connector_max.is_some();
    if !custom {
        return Ok(args.preset.unwrap_or_default().profile());
    }

    let mut settings: CustomProfile = match &args.profile {
        Some(path) => {
            let file = File::open(path).map_err(|source| OptionError::Read {
                path: path.clone(),
                source,
            })?;
            serde_json::from_reader(BufReader::new(file))?
        }
        None => CustomProfile::default(),
    };

    // Command-line options override the file settings
    if let Some(v) = args.rows {
        settings.rows = v;
    }
    if let Some(v) = args.cols {
        settings.cols = v;
    }
    if !args.ops.is_empty() {
        settings.operations = Operations::from_list(&args.ops);
    }
    if let Some(v) = args.add_sub_range {
        settings.add_sub_range = v;
    }
    if let Some(v) = args.mult_div_range {
        settings.mult_div_range = v;
    }
    if let Some(v) = args.connector_min {
        settings.connector_min = v;
    }
    if let Some(v) = args.connector_max {
        settings.connector_max = v;
    }
    Ok(DifficultyProfile::custom(settings)?)
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    //
    // List the presets
    //
    if args.ls {
        for preset in Preset::all() {
            println!("{}", preset.profile());
        }
        return 0;
    }

    let profile: DifficultyProfile = match build_profile(&args) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            return 2;
        }
    };
    debug!("Profile: {profile}");

    let mut generator = PuzzleGenerator::new(
        profile,
        GeneratorOptions {
            max_attempts: args.max_attempts,
            seed: args.seed,
        },
    );

    let mut puzzles: Vec<Puzzle> = Vec::new();
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut attempts: usize = 0;
    for i in 0..args.count {
        debug!("Puzzle {i}");

        let puzzle: Puzzle = match generator.generate() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("{e}");
                return 1;
            }
        };
        total += generator.duration;
        if generator.duration > max {
            max = generator.duration;
        }
        attempts += generator.attempts;

        // Verify the puzzle again before handing it out
        let report = validate(&puzzle);
        if !report.valid {
            eprintln!(
                "Bug: puzzle {} is not valid: {}",
                puzzle.id(),
                report.errors.join("; ")
            );
            return 3;
        }

        if args.json {
            puzzles.push(puzzle);
        } else {
            println!("{puzzle}\n");
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&puzzles) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: cannot serialize the puzzles: {e}");
                return 1;
            }
        }
    }

    // Print some stats. Use stderr in JSON mode to keep stdout parsable.
    if args.summary && args.count > 0 {
        let summary: String = format!(
            "
           profile = {}
              seed = {}
        total time = {}s
      average time = {}s
          max time = {}s
  average attempts = {}",
            generator.profile().label(),
            generator.seed(),
            total,
            total / args.count as f32,
            max,
            attempts as f32 / args.count as f32
        );
        if args.json {
            eprintln!("{summary}");
        } else {
            println!("{summary}");
        }
    }
    0
}
