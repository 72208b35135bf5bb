/*
path.rs

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

//! Ordered list of maze cells.
//!
//! A path is either the trail of a generation walk, or a route from the maze start toward its
//! end while solving. It only stores cell indexes; the cells belong to the
//! [`super::grid::Grid`].

use std::collections::HashSet;

/// Path object.
#[derive(Debug, Default, Clone)]
pub struct Path {
    /// Path as an ordered list of cell indexes.
    path: Vec<usize>,

    /// Stores the visited status of the cells.
    /// Instead of looking for the cell in the [`Path::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    visited: HashSet<usize>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Path {
    /// Create a [`Path`] object.
    pub fn new(capacity: usize) -> Self {
        Self {
            path: Vec::with_capacity(capacity),
            visited: HashSet::with_capacity(capacity),
        }
    }

    /// Create a [`Path`] object from a list of cell indexes.
    pub fn from_slice(path: &[usize]) -> Self {
        let mut p: Path = Path::new(path.len());
        for i in path {
            p.push(*i);
        }
        p
    }

    /// Add a cell at the end of the path.
    pub fn push(&mut self, cell: usize) {
        self.path.push(cell);
        self.visited.insert(cell);
    }

    /// Return a copy of the path extended with the given cell.
    pub fn extended(&self, cell: usize) -> Self {
        let mut p: Path = self.clone();
        p.push(cell);
        p
    }

    /// Get the number of cells in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the cell is in the path or not.
    pub fn contains(&self, cell: usize) -> bool {
        self.visited.contains(&cell)
    }

    /// Return the cell indexes in order.
    pub fn get(&self) -> &[usize] {
        &self.path
    }

    /// Return the first cell of the path.
    pub fn first(&self) -> Option<usize> {
        self.path.first().copied()
    }

    /// Return the last cell of the path.
    pub fn last(&self) -> Option<usize> {
        self.path.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_membership_in_sync() {
        let mut p: Path = Path::new(4);
        assert!(!p.contains(7));
        p.push(7);
        p.push(3);
        assert!(p.contains(3));
        assert!(p.contains(7));
        assert_eq!(p.get(), &[7, 3]);
        assert_eq!(p.first(), Some(7));
        assert_eq!(p.last(), Some(3));
    }

    #[test]
    fn extended_leaves_the_original_untouched() {
        let p: Path = Path::from_slice(&[0, 1, 2]);
        let q: Path = p.extended(5);

        assert_eq!(p.len(), 3);
        assert_eq!(q.get(), &[0, 1, 2, 5]);
        assert!(!p.contains(5));
        assert_ne!(p, q);
    }
}
