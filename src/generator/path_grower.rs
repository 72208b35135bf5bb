/*
path_grower.rs

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

//! Grow a random branching trail from a cell.

use log::debug;
use rand::Rng;

use super::cell::Cell;
use super::direction::Direction;
use super::grid::Grid;
use super::path::Path;

/// Default probability of opening a passage toward an unexplored neighbor.
pub const DEFAULT_BRANCH_CHANCE: f64 = 0.6;

/// [`PathGrower`] object.
pub struct PathGrower {
    /// Probability, between 0 and 1, of opening a passage toward each unexplored neighbor.
    chance: f64,

    /// Number of cells explored by the last walk.
    pub explored: usize,
}

impl PathGrower {
    /// Create the object.
    pub fn new(chance: f64) -> Self {
        Self {
            chance: chance.clamp(0.0, 1.0),
            explored: 0,
        }
    }

    /// Grow a trail from the given cell and return the cells it explored, in exploration order.
    ///
    /// The frontier starts with the given cell. At each step, a random frontier cell is
    /// explored, and a passage is opened toward each of its unexplored and not yet linked
    /// neighbors with the [`PathGrower::new`] probability. Linked neighbors join the frontier.
    /// The walk stops when the frontier is empty.
    ///
    /// A neighbor is linked only once, so the trail is a tree rooted at the starting cell.
    pub fn grow<R: Rng + ?Sized>(&mut self, grid: &mut Grid, start: usize, rng: &mut R) -> Path {
        let mut path: Path = Path::new(grid.len());
        let mut frontier: Vec<usize> = vec![start];

        while !frontier.is_empty() {
            let current: usize = frontier.swap_remove(rng.random_range(0..frontier.len()));
            if grid.cell(current).explored() {
                continue;
            }
            grid.cell_mut(current).set_explored(true);
            path.push(current);

            let candidates: Vec<(Direction, usize)> = grid
                .neighbors_all(current, true)
                .into_iter()
                .filter(|(_, n)| grid.cell(*n).entry().is_none())
                .collect();
            for (d, n) in candidates {
                if rng.random_bool(self.chance) {
                    grid.link(current, d);
                    frontier.push(n);
                }
            }
        }
        self.explored = path.len();

        let c: &Cell = grid.cell(start);
        debug!(
            "Walk from ({}, {}): {} cells explored",
            c.x(),
            c.y(),
            self.explored
        );
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn zero_chance_explores_only_the_start() {
        let mut grid: Grid = Grid::new(4, 4);
        let mut rng: StdRng = StdRng::seed_from_u64(1);
        let mut grower: PathGrower = PathGrower::new(0.0);

        let path: Path = grower.grow(&mut grid, 5, &mut rng);
        assert_eq!(path.get(), &[5]);
        assert_eq!(grid.num_explored(), 1);
        assert!(grid.cell(5).exits().is_empty());
    }

    #[test]
    fn full_chance_spans_the_whole_grid() {
        let mut grid: Grid = Grid::new(5, 4);
        let mut rng: StdRng = StdRng::seed_from_u64(2);
        let mut grower: PathGrower = PathGrower::new(1.0);

        let path: Path = grower.grow(&mut grid, 0, &mut rng);
        assert_eq!(path.len(), grid.len());
        assert_eq!(grower.explored, grid.len());

        // Spanning tree: every cell but the root has a parent, and there is one link less than
        // the number of cells
        let links: usize = grid.cells().iter().map(|c| c.exits().len()).sum();
        assert_eq!(links, grid.len() - 1);
        for (i, c) in grid.cells().iter().enumerate() {
            assert_eq!(c.entry().is_none(), i == 0);
        }
        assert_eq!(grid.repair_all(), 0);
    }

    #[test]
    fn walk_never_enters_explored_cells() {
        let mut grid: Grid = Grid::new(3, 3);
        let mut rng: StdRng = StdRng::seed_from_u64(3);
        for i in grid.row(1) {
            grid.cell_mut(i).set_explored(true);
        }

        let path: Path = PathGrower::new(1.0).grow(&mut grid, 0, &mut rng);
        assert_eq!(path.len(), 3);
        for i in grid.row(2) {
            assert!(!grid.cell(i).explored());
            assert_eq!(grid.cell(i).entry(), None);
        }
    }

    #[test]
    fn links_never_duplicate_entry() {
        let mut grid: Grid = Grid::new(6, 6);
        let mut rng: StdRng = StdRng::seed_from_u64(4);
        PathGrower::new(DEFAULT_BRANCH_CHANCE).grow(&mut grid, 14, &mut rng);

        for c in grid.cells() {
            if let Some(e) = c.entry() {
                assert!(!c.exits().contains(e));
            }
        }
    }
}
