/*
direction.rs

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

//! Grid directions and sets of directions.

use std::fmt;
use strum_macros::FromRepr;

/// One of the four grid directions.
///
/// The discriminant gives the canonical order (North, South, East, West) in which neighbors
/// are always visited. Downstream iteration relies on that order for reproducible runs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, FromRepr)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    South = 1,
    East = 2,
    West = 3,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::North => write!(f, "North"),
            Direction::South => write!(f, "South"),
            Direction::East => write!(f, "East"),
            Direction::West => write!(f, "West"),
        }
    }
}

impl Direction {
    /// All the directions, in canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Return the opposite direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Return the unit grid offset `(dx, dy)` for the direction. `y` grows toward the south.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Lower case initial, used by the debug overlays.
    pub fn initial(self) -> char {
        match self {
            Direction::North => 'n',
            Direction::South => 's',
            Direction::East => 'e',
            Direction::West => 'w',
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of directions in which a cell has an open passage.
///
/// Stored as a bit mask. Iteration always follows the canonical direction order.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Exits(u8);

impl Exits {
    /// Create an empty set.
    pub fn new() -> Self {
        Self(0)
    }

    /// Add a direction. Return `true` if the direction was not already in the set.
    pub fn insert(&mut self, direction: Direction) -> bool {
        let absent: bool = !self.contains(direction);
        self.0 |= direction.bit();
        absent
    }

    /// Remove a direction. Return `true` if the direction was in the set.
    pub fn remove(&mut self, direction: Direction) -> bool {
        let present: bool = self.contains(direction);
        self.0 &= !direction.bit();
        present
    }

    /// Whether the direction is in the set.
    pub fn contains(&self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Number of directions in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Remove all the directions.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Iterate over the directions in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        (0..Direction::ALL.len() as u8)
            .filter_map(Direction::from_repr)
            .filter(|d| self.contains(*d))
    }
}

impl FromIterator<Direction> for Exits {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut exits: Exits = Exits::new();
        for d in iter {
            exits.insert(d);
        }
        exits
    }
}
