/*
grid.rs

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

//! Maze topology: the cells and the links between them.
//!
//! Cells are stored in row-major order and identified by their index in the [`Grid`].
//! All the other objects ([`super::path::Path`], the frontier of the walks, the maze start and
//! end) refer to cells through these indexes.
//!
//! The topology maintains two link invariants:
//!
//! * a cell never has an exit in its entry direction,
//! * an exit toward a neighbor is only kept if that neighbor is entered from the opposite
//!   direction.
//!
//! [`Grid::repair_links`] enforces both for one cell.

use log::{Level, debug, log_enabled};
use std::collections::BTreeSet;

use super::cell::Cell;
use super::direction::Direction;

/// Cell matrix.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Number of columns.
    width: usize,

    /// Number of rows.
    height: usize,

    /// Cells in row-major order.
    cells: Vec<Cell>,

    /// Cached list of the junctions (cells with two exits or more).
    /// [`None`] when the topology changed since the last computation.
    junctions: Option<BTreeSet<usize>>,
}

impl Grid {
    /// Create a [`Grid`] object with all its cells unvisited.
    ///
    /// The dimensions are clamped to at least one cell.
    ///
    /// # Panics
    ///
    /// The number of cells must fit in a `usize`. [`crate::config::Settings::validate`]
    /// rejects larger grids.
    pub fn new(width: usize, height: usize) -> Self {
        let width: usize = width.max(1);
        let height: usize = height.max(1);
        let Some(len) = width.checked_mul(height) else {
            panic!("Bug: a {width}x{height} grid has too many cells");
        };
        let mut cells: Vec<Cell> = Vec::with_capacity(len);

        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
            junctions: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Index of the cell at the given coordinates.
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    /// Mutable access to a cell. The junction cache is dropped because the caller might change
    /// the exits.
    pub fn cell_mut(&mut self, index: usize) -> &mut Cell {
        self.invalidate_junctions();
        &mut self.cells[index]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Indexes of the cells in the given row.
    pub fn row(&self, y: usize) -> std::ops::Range<usize> {
        let first: usize = y * self.width;
        first..first + self.width
    }

    /// Return the adjacent cell in the given direction.
    ///
    /// Return [`None`] if the neighbor would be outside the grid, or if `ignore_explored` is
    /// set and the neighbor has already been explored.
    pub fn neighbor(
        &self,
        index: usize,
        direction: Direction,
        ignore_explored: bool,
    ) -> Option<usize> {
        let cell: &Cell = &self.cells[index];
        let (dx, dy) = direction.delta();
        let x: usize = cell.x().checked_add_signed(dx)?;
        let y: usize = cell.y().checked_add_signed(dy)?;

        if x >= self.width || y >= self.height {
            return None;
        }
        let n: usize = self.index(x, y);
        if ignore_explored && self.cells[n].explored() {
            return None;
        }
        Some(n)
    }

    /// Return all the adjacent cells, in canonical direction order.
    pub fn neighbors_all(&self, index: usize, ignore_explored: bool) -> Vec<(Direction, usize)> {
        Direction::ALL
            .iter()
            .filter_map(|d| {
                self.neighbor(index, *d, ignore_explored)
                    .map(|n| (*d, n))
            })
            .collect()
    }

    /// Return the cells reachable through the exits of the given cell, in canonical direction
    /// order. Exits leaving the grid are skipped.
    pub fn linked_neighbors(&self, index: usize) -> Vec<(Direction, usize)> {
        self.cells[index]
            .exits()
            .iter()
            .filter_map(|d| self.neighbor(index, d, false).map(|n| (d, n)))
            .collect()
    }

    /// Open a passage from the given cell to its neighbor in the given direction.
    ///
    /// The neighbor is entered from the opposite direction.
    /// Return the neighbor, or [`None`] if the direction leads outside the grid (nothing is
    /// changed in that case).
    pub fn link(&mut self, index: usize, direction: Direction) -> Option<usize> {
        let n: usize = self.neighbor(index, direction, false)?;

        self.invalidate_junctions();
        self.cells[index].add_exit(direction);
        self.cells[n].set_entry(Some(direction.opposite()));
        Some(n)
    }

    /// Open an exit without touching the neighbor. Used for the maze end, which exits the grid.
    pub fn open_exit(&mut self, index: usize, direction: Direction) {
        self.invalidate_junctions();
        self.cells[index].add_exit(direction);
    }

    /// Close an exit without touching the neighbor.
    pub fn close_exit(&mut self, index: usize, direction: Direction) {
        self.invalidate_junctions();
        self.cells[index].remove_exit(direction);
    }

    /// Put the cell back in its unvisited state.
    pub fn reset_cell(&mut self, index: usize) {
        self.invalidate_junctions();
        self.cells[index].reset();
    }

    /// Return the junctions of the maze.
    ///
    /// The list is cached until the topology changes.
    pub fn junctions(&mut self) -> &BTreeSet<usize> {
        self.junctions.get_or_insert_with(|| {
            self.cells
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_junction())
                .map(|(i, _)| i)
                .collect()
        })
    }

    /// Drop the junction cache. Every method that changes the exits calls it.
    fn invalidate_junctions(&mut self) {
        self.junctions = None;
    }

    /// Remove the exits of the given cell that break the link invariants: an exit that
    /// duplicates the entry direction, and an exit toward a neighbor that is not entered from
    /// the opposite direction.
    ///
    /// Exits that leave the grid are kept: the maze end exits through the southern edge.
    /// Return `true` if the cell changed. Running the method again without any other change in
    /// between returns `false`.
    pub fn repair_links(&mut self, index: usize) -> bool {
        let entry: Option<Direction> = self.cells[index].entry();
        let mut broken: Vec<Direction> = Vec::new();

        for d in self.cells[index].exits().iter() {
            if Some(d) == entry {
                broken.push(d);
                continue;
            }
            if let Some(n) = self.neighbor(index, d, false)
                && self.cells[n].entry() != Some(d.opposite())
            {
                broken.push(d);
            }
        }

        if broken.is_empty() {
            return false;
        }
        self.invalidate_junctions();
        for d in broken {
            debug!(
                "Repair: removing exit {d} from cell ({}, {})",
                self.cells[index].x(),
                self.cells[index].y()
            );
            self.cells[index].remove_exit(d);
        }
        true
    }

    /// Run [`Grid::repair_links`] on all the cells. Return the number of cells that changed.
    pub fn repair_all(&mut self) -> usize {
        (0..self.cells.len())
            .filter(|i| self.repair_links(*i))
            .count()
    }

    /// Number of explored cells.
    pub fn num_explored(&self) -> usize {
        self.cells.iter().filter(|c| c.explored()).count()
    }

    /// Flag all the cells for redrawing.
    pub fn mark_all_dirty(&mut self) {
        for c in &mut self.cells {
            c.mark_dirty();
        }
    }

    /// Clear the redraw flag of a cell once it has been rendered.
    pub fn clear_dirty(&mut self, index: usize) {
        self.cells[index].clear_dirty();
    }

    /// Print the topology.
    ///
    /// Each cell is drawn on a 2x2 character block. A missing wall is a passage.
    pub fn debug(&self) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        let mut s: String = String::new();

        for y in 0..self.height {
            s.clear();
            for i in self.row(y) {
                let c: &Cell = &self.cells[i];
                s.push('+');
                s.push(if self.is_open(c, Direction::North) {
                    ' '
                } else {
                    '-'
                });
            }
            s.push('+');
            debug!("{s}");

            s.clear();
            for i in self.row(y) {
                let c: &Cell = &self.cells[i];
                s.push(if self.is_open(c, Direction::West) {
                    ' '
                } else {
                    '|'
                });
                s.push(match (c.letter(), c.explored()) {
                    (Some(l), _) => l,
                    (None, true) => ' ',
                    (None, false) => '#',
                });
            }
            s.push('|');
            debug!("{s}");
        }

        s.clear();
        for i in self.row(self.height - 1) {
            s.push('+');
            s.push(if self.is_open(&self.cells[i], Direction::South) {
                ' '
            } else {
                '-'
            });
        }
        s.push('+');
        debug!("{s}");
    }

    /// Whether there is a passage on the given side of the cell.
    pub fn is_open(&self, cell: &Cell, direction: Direction) -> bool {
        cell.exits().contains(direction) || cell.entry() == Some(direction)
    }
}
