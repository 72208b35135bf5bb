/*
progress.rs

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

//! Observe the topology while it is being built.

use super::grid::Grid;

/// Step of the maze generation that produced a snapshot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// A generation sweep has completed.
    Generation,

    /// The word encoder cut the side branches of the junctions it did not select.
    Pruning,

    /// A connectivity repair pass has completed.
    Repair,

    /// The word letters and the decoys are painted.
    Letters,
}

/// Receive the topology after each significant step.
///
/// The observer gets mutable access so that it can render the grid, which clears the dirty
/// flags of the cells.
pub trait Progress {
    fn snapshot(&mut self, grid: &mut Grid, stage: Stage);
}

/// Observer that ignores all the snapshots.
pub struct NoProgress;

impl Progress for NoProgress {
    fn snapshot(&mut self, _grid: &mut Grid, _stage: Stage) {}
}
