/*
maze_builder.rs

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

//! Sweep the grid from the northern edge to the southern edge.
//!
//! The maze is always entered from the north. The builder grows a trail from a random cell of
//! the top row, then picks one of the lowest explored cells and opens its southern side.
//! If that cell is on the bottom row, it becomes the maze end. Otherwise, the cell below
//! starts the next trail. Because the lowest explored row moves down by at least one row per
//! sweep, the builder stops after at most `height` sweeps.

use log::{Level, debug, info, log_enabled};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::time::Instant;

use super::direction::Direction;
use super::grid::Grid;
use super::path::Path;
use super::path_grower::PathGrower;
use super::progress::{Progress, Stage};

/// Maze start and end.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Cell on the top row, entered from the north.
    pub start: usize,

    /// Cell on the bottom row, with an exit toward the south.
    pub end: usize,
}

/// [`MazeBuilder`] object.
pub struct MazeBuilder {
    /// Walk generator.
    grower: PathGrower,

    /// Number of sweeps it took to build the last maze.
    pub iteration: usize,

    /// Duration in seconds it took to build the last maze.
    pub duration: f32,

    /// Time when the generation started. Used to compute the [`MazeBuilder::duration`].
    start: Instant,
}

impl MazeBuilder {
    /// Create the object.
    pub fn new(chance: f64) -> Self {
        Self {
            grower: PathGrower::new(chance),
            iteration: 0,
            duration: 0.0,
            start: Instant::now(),
        }
    }

    /// Build a maze in the given grid, which should be unvisited, and return its start and end.
    pub fn build<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        progress: &mut dyn Progress,
    ) -> Endpoints {
        self.iteration = 0;
        self.duration = 0.0;
        self.start = Instant::now();

        let start: usize = grid.index(rng.random_range(0..grid.width()), 0);
        grid.cell_mut(start).set_entry(Some(Direction::North));

        let mut trail_start: usize = start;
        let end: usize = loop {
            self.iteration += 1;

            let path: Path = self.grower.grow(grid, trail_start, rng);
            for c in path.get() {
                grid.repair_links(*c);
            }
            progress.snapshot(grid, Stage::Generation);

            let (y, lowest) = Self::lowest_explored(grid, trail_start, rng);
            if y == grid.height() - 1 {
                grid.open_exit(lowest, Direction::South);
                break lowest;
            }
            match grid.link(lowest, Direction::South) {
                Some(next) => trail_start = next,
                None => break lowest,
            }
        };

        self.duration = self.start.elapsed().as_secs_f32();
        if log_enabled!(Level::Debug) {
            debug!("Maze built:");
            debug!("       start = ({}, 0)", grid.cell(start).x());
            debug!("         end = ({}, {})", grid.cell(end).x(), grid.cell(end).y());
            debug!("    explored = {}", grid.num_explored());
            grid.debug();
        }
        info!(
            "Sweeps = {}  Duration = {}",
            self.iteration, self.duration
        );
        Endpoints { start, end }
    }

    /// Return one of the explored cells on the lowest explored row, and the row.
    ///
    /// Ties are broken randomly. The `fallback` cell is returned if no cell is explored.
    fn lowest_explored<R: Rng + ?Sized>(
        grid: &Grid,
        fallback: usize,
        rng: &mut R,
    ) -> (usize, usize) {
        for y in (0..grid.height()).rev() {
            let explored: Vec<usize> = grid
                .row(y)
                .filter(|i| grid.cell(*i).explored())
                .collect();
            if let Some(c) = explored.choose(rng) {
                return (y, *c);
            }
        }
        (grid.cell(fallback).y(), fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::path_grower::DEFAULT_BRANCH_CHANCE;
    use crate::generator::progress::NoProgress;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build(width: usize, height: usize, chance: f64, seed: u64) -> (Grid, Endpoints) {
        let mut grid: Grid = Grid::new(width, height);
        let mut rng: StdRng = StdRng::seed_from_u64(seed);
        let endpoints: Endpoints =
            MazeBuilder::new(chance).build(&mut grid, &mut rng, &mut NoProgress);
        (grid, endpoints)
    }

    #[test]
    fn single_entrance_and_single_exit() {
        for seed in 0..20 {
            let (grid, e) = build(12, 9, DEFAULT_BRANCH_CHANCE, seed);

            let entrances: Vec<usize> = grid
                .row(0)
                .filter(|i| grid.cell(*i).entry() == Some(Direction::North))
                .collect();
            assert_eq!(entrances, vec![e.start]);

            let exits: Vec<usize> = grid
                .row(grid.height() - 1)
                .filter(|i| grid.cell(*i).exits().contains(Direction::South))
                .collect();
            assert_eq!(exits, vec![e.end]);
        }
    }

    #[test]
    fn link_invariants_hold_after_generation() {
        for seed in 0..20 {
            let (mut grid, _) = build(10, 10, DEFAULT_BRANCH_CHANCE, seed);
            for c in grid.cells() {
                if let Some(e) = c.entry() {
                    assert!(!c.exits().contains(e));
                }
            }
            assert_eq!(grid.repair_all(), 0);
        }
    }

    #[test]
    fn one_by_one_grid_starts_and_ends_on_the_same_cell() {
        let (grid, e) = build(1, 1, DEFAULT_BRANCH_CHANCE, 7);
        assert_eq!(e.start, 0);
        assert_eq!(e.end, 0);
        assert_eq!(grid.cell(0).entry(), Some(Direction::North));
        assert!(grid.cell(0).exits().contains(Direction::South));
    }

    #[test]
    fn zero_chance_builds_a_straight_corridor() {
        let (grid, e) = build(5, 6, 0.0, 11);
        let x: usize = grid.cell(e.start).x();

        assert_eq!(grid.num_explored(), 6);
        assert_eq!(e.end, grid.index(x, 5));
        for y in 0..6 {
            assert!(grid.cell(grid.index(x, y)).explored());
        }
    }

    #[test]
    fn sweeps_are_bounded_by_the_height() {
        let mut grid: Grid = Grid::new(8, 15);
        let mut rng: StdRng = StdRng::seed_from_u64(5);
        let mut builder: MazeBuilder = MazeBuilder::new(0.3);
        builder.build(&mut grid, &mut rng, &mut NoProgress);
        assert!(builder.iteration >= 1);
        assert!(builder.iteration <= 15);
    }

    #[test]
    fn progress_receives_one_snapshot_per_sweep() {
        struct Counter(usize);
        impl Progress for Counter {
            fn snapshot(&mut self, _grid: &mut Grid, stage: Stage) {
                assert_eq!(stage, Stage::Generation);
                self.0 += 1;
            }
        }

        let mut grid: Grid = Grid::new(6, 6);
        let mut rng: StdRng = StdRng::seed_from_u64(9);
        let mut counter: Counter = Counter(0);
        let mut builder: MazeBuilder = MazeBuilder::new(0.5);
        builder.build(&mut grid, &mut rng, &mut counter);
        assert_eq!(counter.0, builder.iteration);
    }
}
