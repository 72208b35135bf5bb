/*
generator.rs

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

//! Build the maze topology and hide a word in it.
//!
//! A [`grid::Grid`] object stores the [`cell::Cell`] objects and the links between them.
//! A new grid has all its cells unvisited.
//!
//! A maze is produced in three steps:
//!
//! * A [`maze_builder::MazeBuilder`] object sweeps the grid from the top row to the bottom row.
//!   Each sweep is a random branching walk done by a [`path_grower::PathGrower`] object.
//!   The builder returns the maze start (top row) and end (bottom row).
//!
//! * A [`solver::Solver`] object finds the route from the start to the end as a
//!   [`path::Path`] object.
//!
//! * Optionally, a [`word_encoder::WordEncoder`] object reshapes the branches around that route
//!   and paints the letters of a word at its junctions.
//!   If the route does not have enough junctions for the word, then the method returns an
//!   error and the grid is left untouched. In that case, a new maze must be generated.
//!
//! All the random draws come from the generator that the caller passes in, so a seeded
//! generator reproduces the same maze.
//! The [`progress::Progress`] trait lets the caller observe the grid between the steps.

pub mod cell;
pub mod direction;
pub mod grid;
pub mod maze_builder;
pub mod path;
pub mod path_grower;
pub mod progress;
pub mod solver;
pub mod word_encoder;
