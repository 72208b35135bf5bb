/*
picture.rs

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

//! Save the final maze as a PNG image.

use anyhow::{Context, Result};
use image::{ImageFormat, RgbImage};
use log::{debug, info};
use std::path::Path;

use crate::draw::{Draw, ImageSurface, Markers};
use crate::maze::Maze;

/// Paint the whole maze, with its start, end, and solution markers.
pub fn render(maze: &mut Maze, draw: &Draw) -> RgbImage {
    let markers: Markers = Markers {
        start: Some(maze.endpoints.start),
        end: Some(maze.endpoints.end),
        solution: Some(&maze.solution),
    };
    let mut surface: ImageSurface = draw.surface(&maze.grid);

    // New surface: every cell must be painted
    maze.grid.mark_all_dirty();
    draw.render(&mut maze.grid, &mut surface, &markers);
    surface.into_image()
}

/// Write the image to a PNG file.
pub fn save_png(path: &Path, image: &RgbImage) -> Result<()> {
    debug!(
        "Saving {}x{} image to {path:?}",
        image.width(),
        image.height()
    );
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("saving image {}", path.display()))?;
    info!("Maze saved to {}", path.display());
    Ok(())
}
