/*
draw.rs

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

//! Paint the maze.
//!
//! The [`Draw`] object walks through the cells and paints the dirty ones on a
//! [`RenderingSurface`]. [`ImageSurface`] is the surface backed by an RGB pixel buffer, which
//! the [`crate::saver`] module writes to files.

use image::RgbImage;
use log::{Level, debug, log_enabled};

use crate::config::{DisplayFlags, Palette, Rgb, Settings};
use crate::generator::cell::Cell;
use crate::generator::direction::Direction;
use crate::generator::grid::Grid;
use crate::generator::path::Path;
use crate::glyphs;

/// Pixel rectangle of a cell in the surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CellRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Drawing primitives that the renderer needs.
pub trait RenderingSurface {
    /// Paint the whole region.
    fn fill(&mut self, region: CellRegion, color: Rgb);

    /// Paint the one pixel wide side of the region in the given direction.
    fn draw_edge(&mut self, region: CellRegion, direction: Direction, color: Rgb);

    /// Paint a character centered in the region.
    fn draw_glyph(&mut self, region: CellRegion, character: char, color: Rgb);
}

/// Surface backed by an RGB pixel buffer.
pub struct ImageSurface {
    image: RgbImage,
}

impl ImageSurface {
    /// Create a [`ImageSurface`] object of the given size, in pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
        }
    }

    /// Create a [`ImageSurface`] object large enough for the grid with the given cell size.
    ///
    /// # Panics
    ///
    /// The image size must fit in 32 bits. [`Settings::validate`] rejects larger images.
    pub fn for_grid(grid: &Grid, cell_width: u32, cell_height: u32) -> Self {
        let size = |cells: usize, pixels: u32| -> Option<u32> {
            u32::try_from(cells).ok()?.checked_mul(pixels)
        };
        match (
            size(grid.width(), cell_width),
            size(grid.height(), cell_height),
        ) {
            (Some(w), Some(h)) => Self::new(w, h),
            _ => panic!(
                "Bug: a {}x{} grid with {cell_width}x{cell_height} pixel cells is too large",
                grid.width(),
                grid.height()
            ),
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Paint a pixel. Pixels outside the region or the image are ignored.
    fn put(&mut self, region: &CellRegion, x: u32, y: u32, color: Rgb) {
        if x < region.x
            || y < region.y
            || x >= region.x + region.width
            || y >= region.y + region.height
            || x >= self.image.width()
            || y >= self.image.height()
        {
            return;
        }
        self.image.put_pixel(x, y, image::Rgb(color));
    }
}

impl RenderingSurface for ImageSurface {
    fn fill(&mut self, region: CellRegion, color: Rgb) {
        for y in region.y..region.y + region.height {
            for x in region.x..region.x + region.width {
                self.put(&region, x, y, color);
            }
        }
    }

    fn draw_edge(&mut self, region: CellRegion, direction: Direction, color: Rgb) {
        if region.width == 0 || region.height == 0 {
            return;
        }
        let right: u32 = region.x + region.width - 1;
        let bottom: u32 = region.y + region.height - 1;

        match direction {
            Direction::North | Direction::South => {
                let y: u32 = if direction == Direction::North {
                    region.y
                } else {
                    bottom
                };
                for x in region.x..=right {
                    self.put(&region, x, y, color);
                }
            }
            Direction::East | Direction::West => {
                let x: u32 = if direction == Direction::West {
                    region.x
                } else {
                    right
                };
                for y in region.y..=bottom {
                    self.put(&region, x, y, color);
                }
            }
        }
    }

    fn draw_glyph(&mut self, region: CellRegion, character: char, color: Rgb) {
        let Some(bitmap) = glyphs::glyph(character) else {
            debug!("No glyph for {character:?}");
            return;
        };

        // Keep a one pixel margin for the walls
        let scale: u32 = (region.width.saturating_sub(2) / glyphs::GLYPH_WIDTH)
            .min(region.height.saturating_sub(2) / glyphs::GLYPH_HEIGHT)
            .max(1);
        let glyph_width: u32 = glyphs::GLYPH_WIDTH * scale;
        let glyph_height: u32 = glyphs::GLYPH_HEIGHT * scale;
        let left: u32 = region.x + region.width.saturating_sub(glyph_width) / 2;
        let top: u32 = region.y + region.height.saturating_sub(glyph_height) / 2;

        for gy in 0..glyphs::GLYPH_HEIGHT {
            for gx in 0..glyphs::GLYPH_WIDTH {
                if !glyphs::is_set(bitmap, gx, gy) {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        self.put(
                            &region,
                            left + gx * scale + dx,
                            top + gy * scale + dy,
                            color,
                        );
                    }
                }
            }
        }
    }
}

/// Cells that get a special background color.
#[derive(Debug, Default, Clone, Copy)]
pub struct Markers<'a> {
    /// Maze start.
    pub start: Option<usize>,

    /// Maze end.
    pub end: Option<usize>,

    /// Solution, highlighted when [`DisplayFlags::show_solution`] is set.
    pub solution: Option<&'a Path>,
}

/// Renderer.
#[derive(Debug, Clone)]
pub struct Draw {
    /// Width of a cell in pixels.
    cell_width: u32,

    /// Height of a cell in pixels.
    cell_height: u32,

    /// Colors.
    palette: Palette,

    /// Debug display modes.
    display: DisplayFlags,
}

impl Draw {
    /// Create a [`Draw`] object.
    pub fn new(settings: &Settings) -> Self {
        Self {
            cell_width: settings.cell_width,
            cell_height: settings.cell_height,
            palette: settings.palette.clone(),
            display: settings.display,
        }
    }

    /// Create an [`ImageSurface`] object sized for the grid.
    pub fn surface(&self, grid: &Grid) -> ImageSurface {
        ImageSurface::for_grid(grid, self.cell_width, self.cell_height)
    }

    /// Pixel rectangle of the given cell.
    pub fn region(&self, cell: &Cell) -> CellRegion {
        CellRegion {
            x: cell.x() as u32 * self.cell_width,
            y: cell.y() as u32 * self.cell_height,
            width: self.cell_width,
            height: self.cell_height,
        }
    }

    /// Paint the dirty cells of the grid and clear their dirty flag.
    ///
    /// The links are repaired first, so that the walls reflect the actual passages.
    /// Return the number of painted cells.
    pub fn render<S: RenderingSurface>(
        &self,
        grid: &mut Grid,
        surface: &mut S,
        markers: &Markers,
    ) -> usize {
        grid.repair_all();

        let mut painted: usize = 0;
        for i in 0..grid.len() {
            if !grid.cell(i).is_dirty() {
                continue;
            }
            self.draw_cell(grid, i, surface, markers);
            grid.clear_dirty(i);
            painted += 1;
        }
        if log_enabled!(Level::Debug) {
            debug!("Rendered {painted} cells");
        }
        painted
    }

    fn draw_cell<S: RenderingSurface>(
        &self,
        grid: &Grid,
        index: usize,
        surface: &mut S,
        markers: &Markers,
    ) {
        let cell: &Cell = grid.cell(index);
        let region: CellRegion = self.region(cell);

        let background: Rgb = if markers.start == Some(index) {
            self.palette.start
        } else if markers.end == Some(index) {
            self.palette.end
        } else if self.display.show_solution
            && markers.solution.is_some_and(|p| p.contains(index))
        {
            self.palette.solution
        } else if cell.explored() {
            self.palette.background
        } else {
            self.palette.unexplored
        };
        surface.fill(region, background);

        for d in Direction::ALL {
            if !grid.is_open(cell, d) {
                surface.draw_edge(region, d, self.palette.wall);
            }
        }

        if let Some(c) = self.glyph_for(cell) {
            surface.draw_glyph(region, c, self.palette.glyph);
        }
    }

    /// Character to paint in the cell: its letter, otherwise the debug overlay.
    fn glyph_for(&self, cell: &Cell) -> Option<char> {
        if cell.letter().is_some() {
            return cell.letter();
        }
        if self.display.show_exits && cell.explored() {
            return char::from_digit(cell.exits().len() as u32, 10);
        }
        if self.display.show_entries {
            return cell.entry().map(Direction::initial);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface that only counts the calls.
    #[derive(Default)]
    struct CountingSurface {
        fills: usize,
        edges: usize,
        glyphs: Vec<char>,
    }

    impl RenderingSurface for CountingSurface {
        fn fill(&mut self, _region: CellRegion, _color: Rgb) {
            self.fills += 1;
        }

        fn draw_edge(&mut self, _region: CellRegion, _direction: Direction, _color: Rgb) {
            self.edges += 1;
        }

        fn draw_glyph(&mut self, _region: CellRegion, character: char, _color: Rgb) {
            self.glyphs.push(character);
        }
    }

    fn settings(cell_width: u32, cell_height: u32) -> Settings {
        Settings {
            cell_width,
            cell_height,
            ..Settings::default()
        }
    }

    #[test]
    fn surface_size_follows_grid_and_cell_sizes() {
        let grid: Grid = Grid::new(7, 4);
        let draw: Draw = Draw::new(&settings(9, 13));
        let surface: ImageSurface = draw.surface(&grid);
        assert_eq!(surface.image().dimensions(), (63, 52));
    }

    #[test]
    fn only_dirty_cells_are_painted() {
        let mut grid: Grid = Grid::new(3, 2);
        let draw: Draw = Draw::new(&settings(10, 10));
        let mut surface: CountingSurface = CountingSurface::default();

        assert_eq!(draw.render(&mut grid, &mut surface, &Markers::default()), 6);
        assert_eq!(surface.fills, 6);
        assert_eq!(surface.edges, 24);
        assert_eq!(draw.render(&mut grid, &mut surface, &Markers::default()), 0);

        grid.link(0, Direction::East);
        assert_eq!(draw.render(&mut grid, &mut surface, &Markers::default()), 2);
        assert!(grid.cells().iter().all(|c| !c.is_dirty()));
    }

    #[test]
    fn walls_and_passages() {
        let mut grid: Grid = Grid::new(2, 1);
        grid.cell_mut(0).set_explored(true);
        grid.cell_mut(1).set_explored(true);
        grid.link(0, Direction::East);

        let s: Settings = settings(10, 10);
        let draw: Draw = Draw::new(&s);
        let mut surface: ImageSurface = draw.surface(&grid);
        draw.render(&mut grid, &mut surface, &Markers::default());
        let img: &RgbImage = surface.image();
        let wall: image::Rgb<u8> = image::Rgb(s.palette.wall);
        let background: image::Rgb<u8> = image::Rgb(s.palette.background);

        // Closed sides
        assert_eq!(*img.get_pixel(5, 0), wall);
        assert_eq!(*img.get_pixel(0, 5), wall);
        assert_eq!(*img.get_pixel(19, 5), wall);
        // Open passage between the two cells
        assert_eq!(*img.get_pixel(9, 5), background);
        assert_eq!(*img.get_pixel(10, 5), background);
        // Interior
        assert_eq!(*img.get_pixel(5, 5), background);
    }

    #[test]
    fn start_end_and_solution_colors() {
        let mut grid: Grid = Grid::new(3, 1);
        for i in 0..3 {
            grid.cell_mut(i).set_explored(true);
        }
        let path: Path = Path::from_slice(&[0, 1, 2]);
        let mut s: Settings = settings(4, 4);
        s.display.show_solution = true;
        let draw: Draw = Draw::new(&s);
        let mut surface: ImageSurface = draw.surface(&grid);
        let markers: Markers = Markers {
            start: Some(0),
            end: Some(2),
            solution: Some(&path),
        };
        draw.render(&mut grid, &mut surface, &markers);

        let img: &RgbImage = surface.image();
        assert_eq!(img.get_pixel(1, 1).0, s.palette.start);
        assert_eq!(img.get_pixel(5, 1).0, s.palette.solution);
        assert_eq!(img.get_pixel(9, 1).0, s.palette.end);
    }

    #[test]
    fn letters_come_before_debug_overlays() {
        let mut grid: Grid = Grid::new(2, 1);
        grid.cell_mut(0).set_explored(true);
        grid.cell_mut(1).set_explored(true);
        grid.link(0, Direction::East);
        grid.cell_mut(1).set_letter(Some('k'));

        let mut s: Settings = settings(10, 10);
        s.display.show_exits = true;
        let draw: Draw = Draw::new(&s);
        let mut surface: CountingSurface = CountingSurface::default();
        draw.render(&mut grid, &mut surface, &Markers::default());
        assert_eq!(surface.glyphs, vec!['1', 'k']);

        s.display.show_exits = false;
        s.display.show_entries = true;
        grid.cell_mut(1).set_letter(None);
        let draw: Draw = Draw::new(&s);
        let mut surface: CountingSurface = CountingSurface::default();
        grid.mark_all_dirty();
        draw.render(&mut grid, &mut surface, &Markers::default());
        assert_eq!(surface.glyphs, vec!['w']);
    }

    #[test]
    fn glyph_is_centered_in_the_cell() {
        let mut surface: ImageSurface = ImageSurface::new(20, 20);
        let region: CellRegion = CellRegion {
            x: 0,
            y: 0,
            width: 20,
            height: 20,
        };
        let white: Rgb = [255, 255, 255];
        surface.draw_glyph(region, 'i', white);

        // 'I' has its top bar on the first glyph row; scale is 2, glyph is 10x14, left = 5,
        // top = 3. The bar covers glyph columns 1 to 3.
        let img: &RgbImage = surface.image();
        assert_eq!(img.get_pixel(7, 3).0, white);
        assert_eq!(img.get_pixel(12, 4).0, white);
        assert_eq!(img.get_pixel(5, 3).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn drawing_is_clipped_to_the_region() {
        let mut surface: ImageSurface = ImageSurface::new(4, 4);
        let region: CellRegion = CellRegion {
            x: 0,
            y: 0,
            width: 2,
            height: 2,
        };
        surface.draw_glyph(region, 'm', [9, 9, 9]);
        surface.draw_edge(region, Direction::South, [7, 7, 7]);

        let img: &RgbImage = surface.image();
        assert_eq!(img.get_pixel(3, 3).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(2, 1).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(1, 1).0, [7, 7, 7]);
    }
}
