/*
maze.rs

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

//! Generate a complete maze: topology, solution, and hidden word.

use log::{Level, debug, log_enabled};
use rand::Rng;
use std::time::Instant;

use crate::config::Settings;
use crate::generator::grid::Grid;
use crate::generator::maze_builder::{Endpoints, MazeBuilder};
use crate::generator::path::Path;
use crate::generator::progress::Progress;
use crate::generator::solver::{Solver, SolverError};
use crate::generator::word_encoder::{self, EncodedWord, WordEncoder, WordError};

/// Generation statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stats {
    /// Number of generation sweeps.
    pub sweeps: usize,

    /// Number of explored cells in the final maze.
    pub explored: usize,

    /// Number of junctions in the final maze.
    pub junctions: usize,

    /// Number of cells in the solution.
    pub solution_length: usize,

    /// Number of connectivity repair passes during the word encoding.
    pub repair_passes: usize,

    /// Duration in seconds of the whole generation.
    pub duration: f32,
}

/// Generated maze.
#[derive(Debug, Clone)]
pub struct Maze {
    /// Topology.
    pub grid: Grid,

    /// Maze start and end.
    pub endpoints: Endpoints,

    /// Route from the start to the end.
    pub solution: Path,

    /// Hidden word, if one was requested.
    pub word: Option<EncodedWord>,

    /// Generation statistics.
    pub stats: Stats,
}

impl Maze {
    /// Generate a maze with the given settings.
    ///
    /// The word is validated before anything else, so an invalid word does not allocate any
    /// grid.
    ///
    /// # Errors
    ///
    /// The method returns an error if the word contains a non-alphabetic character, or if the
    /// generated maze does not have enough junctions along its solution to host the word.
    /// Nothing is retried: the caller can try again with another seed, a larger grid, or a
    /// shorter word.
    pub fn generate<R: Rng + ?Sized>(
        settings: &Settings,
        rng: &mut R,
        progress: &mut dyn Progress,
    ) -> Result<Self, WordError> {
        let word: Option<String> = match settings.word() {
            Some(w) => Some(word_encoder::validate_word(w)?),
            None => None,
        };
        let start: Instant = Instant::now();

        let mut grid: Grid = Grid::new(settings.grid_width, settings.grid_height);
        let mut builder: MazeBuilder = MazeBuilder::new(settings.branch_chance);
        let endpoints: Endpoints = builder.build(&mut grid, rng, progress);

        grid.repair_all();
        let solution: Path = match Solver::new(endpoints.start, endpoints.end).solve(&grid) {
            Ok(p) => p,
            Err(SolverError::NoPath) => {
                grid.debug();
                panic!("Bug: the generated maze has no route from its start to its end");
            }
        };

        let mut repair_passes: usize = 0;
        let encoded: Option<EncodedWord> = match word {
            Some(w) => {
                let mut encoder: WordEncoder =
                    WordEncoder::new(&w, &solution, settings.branch_chance)?;
                let encoded: EncodedWord = encoder.encode(&mut grid, rng, progress)?;
                repair_passes = encoder.repair_passes;
                Some(encoded)
            }
            None => None,
        };

        let stats: Stats = Stats {
            sweeps: builder.iteration,
            explored: grid.num_explored(),
            junctions: grid.junctions().len(),
            solution_length: solution.len(),
            repair_passes,
            duration: start.elapsed().as_secs_f32(),
        };
        if log_enabled!(Level::Debug) {
            debug!("Generation summary:");
            debug!("             sweeps = {}", stats.sweeps);
            debug!("           explored = {}", stats.explored);
            debug!("          junctions = {}", stats.junctions);
            debug!("    solution length = {}", stats.solution_length);
            debug!("      repair passes = {}", stats.repair_passes);
            debug!("           duration = {}s", stats.duration);
        }

        Ok(Self {
            grid,
            endpoints,
            solution,
            word: encoded,
            stats,
        })
    }
}
