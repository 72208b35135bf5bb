/*
word_encoder.rs

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

//! Hide a word along the solution of a maze.
//!
//! The letters are painted at the decision points of the solution: the first letter on the
//! maze start, and each following letter on the solution cell that comes right after a
//! junction. At every junction, the other branches get decoy letters that are not part of the
//! word, so a solver who always picks the letter that continues the word follows the solution.
//!
//! Encoding works in five steps:
//!
//! 1. Collect the junctions on the solution (except the maze end). A word of `n` letters needs
//!    `n - 1` of them, otherwise an error is returned and the topology is left untouched.
//! 2. Randomly select `n - 1` of these junctions.
//! 3. Cut all the side branches of the junctions that are not selected. The cells of these
//!    branches go back to the unvisited state.
//! 4. Regrow trails from the dead ends left behind, until a pass leaves the number of dead ends
//!    unchanged.
//! 5. Paint the word letters and the decoys.

use log::{Level, debug, info, log_enabled};
use rand::Rng;
use rand::seq::IndexedRandom;
use rand::seq::index;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;

use super::cell::Cell;
use super::direction::Direction;
use super::grid::Grid;
use super::path::Path;
use super::path_grower::PathGrower;
use super::progress::{Progress, Stage};

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum WordError {
    /// The word contains a character that is not a letter.
    InvalidWord(char),

    /// The solution does not have enough junctions to host all the letters.
    InsufficientJunctions { needed: usize, available: usize },
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WordError::InvalidWord(c) => {
                write!(f, "the word contains the non-alphabetic character {c:?}")
            }
            WordError::InsufficientJunctions { needed, available } => write!(
                f,
                "the maze solution has {available} usable junctions but the word needs {needed}"
            ),
        }
    }
}

impl std::error::Error for WordError {}

/// Verify that the word only contains ASCII letters and return it in lower case.
///
/// # Errors
///
/// Return [`WordError::InvalidWord`] with the first offending character.
pub fn validate_word(word: &str) -> Result<String, WordError> {
    match word.chars().find(|c| !c.is_ascii_alphabetic()) {
        Some(c) => Err(WordError::InvalidWord(c)),
        None => Ok(word.to_ascii_lowercase()),
    }
}

/// Result of the encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedWord {
    /// Encoded word, in lower case.
    pub word: String,

    /// Selected junctions, in solution order.
    pub junctions: Vec<usize>,

    /// Cells that display the word letters, in solution order. The first one is the maze start.
    pub letter_cells: Vec<usize>,
}

/// [`WordEncoder`] object.
pub struct WordEncoder<'a> {
    /// Letters of the word, in lower case.
    word: Vec<char>,

    /// Maze solution.
    solution: &'a Path,

    /// Walk generator used to regrow the pruned areas.
    grower: PathGrower,

    /// Number of connectivity repair passes during the last encoding.
    pub repair_passes: usize,
}

impl<'a> WordEncoder<'a> {
    /// Create the object.
    ///
    /// # Errors
    ///
    /// Return [`WordError::InvalidWord`] if the word contains a non-alphabetic character.
    pub fn new(word: &str, solution: &'a Path, chance: f64) -> Result<Self, WordError> {
        Ok(Self {
            word: validate_word(word)?.chars().collect(),
            solution,
            grower: PathGrower::new(chance),
            repair_passes: 0,
        })
    }

    /// Encode the word in the maze.
    ///
    /// # Errors
    ///
    /// Return [`WordError::InsufficientJunctions`] when the solution does not have enough
    /// junctions. The grid is not modified in that case.
    pub fn encode<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        progress: &mut dyn Progress,
    ) -> Result<EncodedWord, WordError> {
        let Some(start) = self.solution.first() else {
            return Err(WordError::InsufficientJunctions {
                needed: self.word.len(),
                available: 0,
            });
        };
        let needed: usize = self.word.len().saturating_sub(1);
        let candidates: Vec<usize> = self.solution_junctions(grid);

        if candidates.len() < needed {
            debug!(
                "Not enough junctions: {} available, {} needed",
                candidates.len(),
                needed
            );
            return Err(WordError::InsufficientJunctions {
                needed,
                available: candidates.len(),
            });
        }
        if self.word.is_empty() {
            return Ok(EncodedWord {
                word: String::new(),
                junctions: Vec::new(),
                letter_cells: Vec::new(),
            });
        }

        // Positions in the solution of the selected junctions, in solution order
        let mut picked: Vec<usize> = index::sample(rng, candidates.len(), needed).into_vec();
        picked.sort_unstable();
        let selected: Vec<usize> = picked.iter().map(|i| candidates[*i]).collect();
        let selected_set: HashSet<usize> = selected.iter().copied().collect();

        if log_enabled!(Level::Debug) {
            debug!("Encoding word {:?}", self.word.iter().collect::<String>());
            debug!("    solution junctions = {candidates:?}");
            debug!("              selected = {selected:?}");
        }

        for pos in candidates.iter().filter(|p| !selected_set.contains(*p)) {
            self.prune_side_branches(grid, *pos);
        }
        progress.snapshot(grid, Stage::Pruning);

        self.repair_connectivity(grid, rng, progress);

        let letter_cells: Vec<usize> = std::iter::once(start)
            .chain(selected.iter().map(|pos| self.solution.get()[pos + 1]))
            .collect();
        for (cell, letter) in letter_cells.iter().zip(self.word.iter()) {
            grid.cell_mut(*cell).set_letter(Some(*letter));
        }
        self.place_decoys(grid, rng);
        grid.repair_all();
        progress.snapshot(grid, Stage::Letters);

        info!(
            "Word encoded on {} junctions after {} repair passes",
            selected.len(),
            self.repair_passes
        );
        if log_enabled!(Level::Debug) {
            grid.debug();
        }
        Ok(EncodedWord {
            word: self.word.iter().collect(),
            junctions: selected.iter().map(|pos| self.solution.get()[*pos]).collect(),
            letter_cells,
        })
    }

    /// Return the positions, in the solution, of the junctions that can host a letter.
    /// The maze end is excluded.
    fn solution_junctions(&self, grid: &Grid) -> Vec<usize> {
        let cells: &[usize] = self.solution.get();
        (0..cells.len().saturating_sub(1))
            .filter(|pos| grid.cell(cells[*pos]).is_junction())
            .collect()
    }

    /// Close the side branches of the junction at the given solution position, and put all the
    /// cells of these branches back in the unvisited state.
    fn prune_side_branches(&self, grid: &mut Grid, pos: usize) {
        let junction: usize = self.solution.get()[pos];
        let next: usize = self.solution.get()[pos + 1];

        for (d, n) in grid.linked_neighbors(junction) {
            if n == next || self.solution.contains(n) {
                continue;
            }
            grid.close_exit(junction, d);
            self.clear_branch(grid, n);
        }
    }

    /// Walk the branch from the given cell, breadth first, and reset all its cells.
    /// The walk stops at cells that are already unvisited.
    fn clear_branch(&self, grid: &mut Grid, root: usize) {
        let mut queue: VecDeque<usize> = VecDeque::from([root]);
        let mut visited: HashSet<usize> = HashSet::from([root]);
        let mut cleared: usize = 0;

        while let Some(c) = queue.pop_front() {
            let cell: &Cell = grid.cell(c);
            if self.solution.contains(c)
                || (!cell.explored() && cell.entry().is_none() && cell.exits().is_empty())
            {
                continue;
            }
            for (_, n) in grid.linked_neighbors(c) {
                if visited.insert(n) {
                    queue.push_back(n);
                }
            }
            grid.reset_cell(c);
            cleared += 1;
        }
        debug!("Branch from cell {root}: {cleared} cells cleared");
    }

    /// Regrow trails from the explored cells that have no exit, until the number of these
    /// dead ends is the same after a pass as before it, or a pass does not regrow anything.
    /// The number of passes is bounded by the number of cells.
    fn repair_connectivity<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        progress: &mut dyn Progress,
    ) {
        self.repair_passes = 0;
        let mut dead_ends: usize = Self::count_dead_ends(grid);

        for _ in 0..grid.len() {
            self.repair_passes += 1;
            let orphans: Vec<usize> = (0..grid.len())
                .filter(|i| grid.cell(*i).explored() && grid.cell(*i).exits().is_empty())
                .collect();
            let mut regrown: usize = 0;

            for o in orphans {
                // An earlier regrowth in this pass might have reached this cell's neighbors
                let options: Vec<(Direction, usize)> = grid
                    .neighbors_all(o, true)
                    .into_iter()
                    .filter(|(_, n)| grid.cell(*n).entry().is_none())
                    .collect();
                let Some(&(d, n)) = options.choose(rng) else {
                    continue;
                };
                grid.link(o, d);
                self.grower.grow(grid, n, rng);
                regrown += 1;
            }

            let previous: usize = dead_ends;
            dead_ends = Self::count_dead_ends(grid);
            debug!(
                "Repair pass {}: {regrown} trails regrown, dead ends {previous} -> {dead_ends}",
                self.repair_passes
            );
            progress.snapshot(grid, Stage::Repair);
            if regrown == 0 || dead_ends == previous {
                break;
            }
        }
    }

    /// Number of explored cells without any exit.
    fn count_dead_ends(grid: &Grid) -> usize {
        grid.cells()
            .iter()
            .filter(|c| c.explored() && c.exits().is_empty())
            .count()
    }

    /// Paint a letter that is not in the word on every branch cell of every junction that does
    /// not already show a letter.
    fn place_decoys<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) {
        let used: BTreeSet<char> = self.word.iter().copied().collect();
        let decoys: Vec<char> = ('a'..='z').filter(|c| !used.contains(c)).collect();
        if decoys.is_empty() {
            debug!("The word uses all the letters: no decoys");
            return;
        }

        let junctions: Vec<usize> = grid.junctions().iter().copied().collect();
        for j in junctions {
            for (_, n) in grid.linked_neighbors(j) {
                if grid.cell(n).letter().is_none()
                    && let Some(l) = decoys.choose(rng)
                {
                    grid.cell_mut(n).set_letter(Some(*l));
                }
            }
        }
    }
}
