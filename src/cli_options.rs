/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of Wordmaze.

Wordmaze is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Wordmaze is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Wordmaze. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! The settings are read from the optional JSON file first, and then the command-line options
//! override them.
//!
//! # Examples
//!
//! Generate a 30x20 maze that hides the word "rust" and highlight its solution:
//!
//! ```
//! $ wordmaze --width 30 --height 20 -w rust --show-solution -o rust.png
//! ```
//!
//! Reproduce a maze and record its generation:
//!
//! ```
//! $ wordmaze -s 1234 --show-generation --show-letters -w maze --animation maze.gif
//! ```
//!
//! Print the default settings, to start a configuration file:
//!
//! ```
//! $ wordmaze --dump-config > wordmaze.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info, warn};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;

use crate::config::{COPYRIGHT_NOTICE, Settings};
use crate::draw::Draw;
use crate::generator::progress::{NoProgress, Progress};
use crate::maze::Maze;
use crate::saver::animation::Recorder;
use crate::saver::picture;

/// Generate a maze that hides a word along its solution.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Number of columns
    #[arg(long)]
    width: Option<usize>,

    /// Number of rows
    #[arg(long)]
    height: Option<usize>,

    /// Width of a cell in pixels
    #[arg(long)]
    cell_width: Option<u32>,

    /// Height of a cell in pixels
    #[arg(long)]
    cell_height: Option<u32>,

    /// Word to hide in the maze (letters only)
    #[arg(short, long)]
    word: Option<String>,

    /// Probability of branching toward each unexplored neighbor, between 0 and 1
    #[arg(short, long)]
    probability: Option<f64>,

    /// Seed of the random generator
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// PNG file for the maze
    #[arg(short, long, default_value = "maze.png")]
    output: PathBuf,

    /// GIF file for the generation steps
    #[arg(long)]
    animation: Option<PathBuf>,

    /// Highlight the solution
    #[arg(long, default_value_t = false)]
    show_solution: bool,

    /// Print the entry direction of each cell
    #[arg(long, default_value_t = false)]
    show_entries: bool,

    /// Print the number of exits of each cell
    #[arg(long, default_value_t = false)]
    show_exits: bool,

    /// Record a frame after each generation sweep
    #[arg(long, default_value_t = false)]
    show_generation: bool,

    /// Record a frame after each word encoding step
    #[arg(long, default_value_t = false)]
    show_letters: bool,

    /// Print some statistics after generating the maze
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Print the effective settings in JSON format and exit
    #[arg(long, default_value_t = false)]
    dump_config: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

impl Args {
    /// Override the settings with the options given on the command line.
    fn apply(&self, settings: &mut Settings) {
        if let Some(w) = self.width {
            settings.grid_width = w;
        }
        if let Some(h) = self.height {
            settings.grid_height = h;
        }
        if let Some(w) = self.cell_width {
            settings.cell_width = w;
        }
        if let Some(h) = self.cell_height {
            settings.cell_height = h;
        }
        if self.word.is_some() {
            settings.word = self.word.clone();
        }
        if let Some(p) = self.probability {
            settings.branch_chance = p;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }

        // Flags can only turn the display modes on
        settings.display.show_solution |= self.show_solution;
        settings.display.show_entries |= self.show_entries;
        settings.display.show_exits |= self.show_exits;
        settings.display.show_generation |= self.show_generation;
        settings.display.show_letters |= self.show_letters;
    }

    /// Read the settings file, if any, and apply the command-line overrides.
    fn settings(&self) -> Result<Settings> {
        let mut settings: Settings = match &self.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        self.apply(&mut settings);
        settings.validate().context("invalid settings")?;
        Ok(settings)
    }
}

fn init_logger(debug: bool) {
    let mut builder: env_logger::Builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

/// Parse and process command-line options.
pub fn parse() -> Result<()> {
    let args: Args = Args::parse();
    init_logger(args.debug);
    debug!("{args:?}");

    let settings: Settings = args.settings()?;

    //
    // Print the settings and stop
    //
    if args.dump_config {
        let json: String =
            serde_json::to_string_pretty(&settings).context("serializing the settings")?;
        println!("{json}");
        return Ok(());
    }

    let seed: u64 = settings.seed.unwrap_or_else(|| rand::rng().random());
    info!("Seed: {seed}");
    let mut rng: StdRng = StdRng::seed_from_u64(seed);

    //
    // Generate the maze, optionally recording the steps
    //
    let draw: Draw = Draw::new(&settings);
    let mut recorder: Option<Recorder> = args
        .animation
        .as_ref()
        .map(|_| Recorder::new(draw.clone(), settings.display));

    let mut no_progress: NoProgress = NoProgress;
    let progress: &mut dyn Progress = match recorder.as_mut() {
        Some(r) => r,
        None => &mut no_progress,
    };
    let mut maze: Maze = Maze::generate(&settings, &mut rng, progress)
        .with_context(|| format!("cannot generate the maze with seed {seed}"))?;

    //
    // Save the results
    //
    let image: image::RgbImage = picture::render(&mut maze, &draw);
    picture::save_png(&args.output, &image)?;

    if let (Some(path), Some(mut r)) = (&args.animation, recorder) {
        if r.frames().is_empty() {
            warn!("No generation step was recorded, the animation only shows the final maze");
        }
        r.push(image);
        r.save_gif(path)?;
    }

    // Print some stats
    if args.summary {
        println!(
            "
               seed = {}
               word = {}
             sweeps = {}
           explored = {}/{}
          junctions = {}
    solution length = {}
      repair passes = {}
               time = {}s",
            seed,
            maze.word.as_ref().map_or("-", |w| w.word.as_str()),
            maze.stats.sweeps,
            maze.stats.explored,
            maze.grid.len(),
            maze.stats.junctions,
            maze.stats.solution_length,
            maze.stats.repair_passes,
            maze.stats.duration
        );
    }
    Ok(())
}
