/*
solver.rs

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

//! Find the route from the maze start to its end.
//!
//! The search is a breadth-first search over candidate paths. All the candidates of a
//! generation have the same length, so the first candidate that reaches the end is a shortest
//! route. Candidates are expanded in creation order, and the exits of a junction in canonical
//! direction order, which makes the returned route reproducible.

use log::debug;
use std::collections::HashSet;
use std::fmt;

use super::direction::Direction;
use super::grid::Grid;
use super::path::Path;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum SolverError {
    /// The end cannot be reached from the start.
    NoPath,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolverError::NoPath => write!(f, "the maze end cannot be reached from its start"),
        }
    }
}

impl std::error::Error for SolverError {}

/// [`Solver`] object.
pub struct Solver {
    /// Starting cell.
    start: usize,

    /// Target cell.
    end: usize,

    /// Number of candidate generations it took to find the last solution.
    pub iteration: usize,
}

impl Solver {
    /// Create the object.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            iteration: 0,
        }
    }

    /// Return the route from the start to the end, following the cell exits.
    ///
    /// # Errors
    ///
    /// The method returns an error if all the candidates reach a dead end. Mazes produced by
    /// [`super::maze_builder::MazeBuilder`] always have a route, so the error reveals a broken
    /// topology.
    pub fn solve(&mut self, grid: &Grid) -> Result<Path, SolverError> {
        self.iteration = 0;

        let mut visited: HashSet<usize> = HashSet::from([self.start]);
        let mut candidates: Vec<Path> = vec![Path::from_slice(&[self.start])];

        while !candidates.is_empty() {
            self.iteration += 1;

            if let Some(p) = candidates.iter().find(|p| p.last() == Some(self.end)) {
                debug!(
                    "Solution found: {} cells after {} generations",
                    p.len(),
                    self.iteration
                );
                return Ok(p.clone());
            }

            let mut next: Vec<Path> = Vec::with_capacity(candidates.len());
            for p in candidates {
                let Some(last) = p.last() else {
                    continue;
                };
                let open: Vec<(Direction, usize)> = grid
                    .linked_neighbors(last)
                    .into_iter()
                    .filter(|(_, n)| visited.insert(*n))
                    .collect();

                match open.len() {
                    // Dead end
                    0 => (),
                    // Corridor: extend the candidate
                    1 => {
                        let mut p: Path = p;
                        p.push(open[0].1);
                        next.push(p);
                    }
                    // Junction: one new candidate per exit
                    _ => {
                        for (_, n) in open {
                            next.push(p.extended(n));
                        }
                    }
                }
            }
            candidates = next;
        }
        debug!("No solution after {} generations", self.iteration);
        Err(SolverError::NoPath)
    }
}
