/*
cell.rs

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

//! One position of the maze grid.

use super::direction::{Direction, Exits};

/// Maze cell.
///
/// Every setter that changes what the cell looks like raises the [`Cell::is_dirty`] flag. The
/// renderer clears the flag after painting the cell, and skips the cells that are not dirty.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Column in the grid.
    x: usize,

    /// Row in the grid. Row 0 is the northern edge of the maze.
    y: usize,

    /// Direction from which the cell is entered from its parent.
    /// [`None`] for a cell that has never been linked.
    entry: Option<Direction>,

    /// Directions with an open passage to a neighbor.
    exits: Exits,

    /// Whether a generation walk has visited the cell.
    explored: bool,

    /// Glyph to render in the cell.
    letter: Option<char>,

    /// Whether the cell changed since it was last rendered.
    dirty: bool,
}

impl Cell {
    /// Create a [`Cell`] object in its unvisited state.
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            entry: None,
            exits: Exits::new(),
            explored: false,
            letter: None,
            dirty: true,
        }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn entry(&self) -> Option<Direction> {
        self.entry
    }

    pub fn exits(&self) -> Exits {
        self.exits
    }

    pub fn explored(&self) -> bool {
        self.explored
    }

    pub fn letter(&self) -> Option<char> {
        self.letter
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the cell has two exits or more.
    pub fn is_junction(&self) -> bool {
        self.exits.len() >= 2
    }

    pub fn set_entry(&mut self, entry: Option<Direction>) {
        if self.entry != entry {
            self.entry = entry;
            self.dirty = true;
        }
    }

    /// Open an exit. Return `true` if the exit was not already open.
    pub fn add_exit(&mut self, direction: Direction) -> bool {
        let added: bool = self.exits.insert(direction);
        self.dirty |= added;
        added
    }

    /// Close an exit. Return `true` if the exit was open.
    pub fn remove_exit(&mut self, direction: Direction) -> bool {
        let removed: bool = self.exits.remove(direction);
        self.dirty |= removed;
        removed
    }

    pub fn set_explored(&mut self, explored: bool) {
        if self.explored != explored {
            self.explored = explored;
            self.dirty = true;
        }
    }

    pub fn set_letter(&mut self, letter: Option<char>) {
        if self.letter != letter {
            self.letter = letter;
            self.dirty = true;
        }
    }

    /// Put the cell back in its unvisited state.
    pub fn reset(&mut self) {
        self.set_entry(None);
        if !self.exits.is_empty() {
            self.exits.clear();
            self.dirty = true;
        }
        self.set_explored(false);
        self.set_letter(None);
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_unvisited_and_dirty() {
        let cell: Cell = Cell::new(3, 4);
        assert_eq!((cell.x(), cell.y()), (3, 4));
        assert_eq!(cell.entry(), None);
        assert!(cell.exits().is_empty());
        assert!(!cell.explored());
        assert_eq!(cell.letter(), None);
        assert!(cell.is_dirty());
    }

    #[test]
    fn only_real_changes_raise_the_dirty_flag() {
        let mut cell: Cell = Cell::new(0, 0);
        cell.clear_dirty();

        cell.set_entry(None);
        cell.remove_exit(Direction::East);
        cell.set_letter(None);
        assert!(!cell.is_dirty());

        cell.add_exit(Direction::East);
        assert!(cell.is_dirty());
        cell.clear_dirty();

        cell.set_letter(Some('q'));
        assert!(cell.is_dirty());
    }

    #[test]
    fn reset_restores_the_unvisited_state() {
        let mut cell: Cell = Cell::new(1, 1);
        cell.set_entry(Some(Direction::North));
        cell.add_exit(Direction::South);
        cell.add_exit(Direction::East);
        cell.set_explored(true);
        cell.set_letter(Some('m'));
        cell.clear_dirty();

        cell.reset();
        assert_eq!(cell, {
            let mut fresh: Cell = Cell::new(1, 1);
            fresh.mark_dirty();
            fresh
        });
        assert!(!cell.is_junction());
    }
}
