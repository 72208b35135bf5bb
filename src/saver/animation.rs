/*
animation.rs

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

//! Record the generation steps and save them as an animated GIF image.
//!
//! The [`Recorder`] object is passed to [`crate::maze::Maze::generate`] as the progress
//! observer. It keeps one surface for the whole generation and only repaints the cells that
//! changed since the previous frame.

use anyhow::{Context, Result};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, RgbImage};
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::config::DisplayFlags;
use crate::draw::{Draw, ImageSurface, Markers};
use crate::generator::grid::Grid;
use crate::generator::progress::{Progress, Stage};

/// Delay between two frames, in milliseconds.
pub const FRAME_DELAY_MS: u32 = 200;

/// Progress observer that collects a frame per snapshot.
pub struct Recorder {
    draw: Draw,

    /// Stages to record.
    display: DisplayFlags,

    /// Created at the first recorded snapshot, when the grid size is known.
    surface: Option<ImageSurface>,

    /// Recorded frames.
    frames: Vec<RgbImage>,
}

impl Recorder {
    /// Create a [`Recorder`] object.
    ///
    /// Generation sweeps are recorded when [`DisplayFlags::show_generation`] is set and word
    /// encoding steps when [`DisplayFlags::show_letters`] is set.
    pub fn new(draw: Draw, display: DisplayFlags) -> Self {
        Self {
            draw,
            display,
            surface: None,
            frames: Vec::new(),
        }
    }

    pub fn frames(&self) -> &[RgbImage] {
        &self.frames
    }

    /// Append a frame that is not a generation step, such as the final maze.
    pub fn push(&mut self, image: RgbImage) {
        self.frames.push(image);
    }

    fn records(&self, stage: Stage) -> bool {
        match stage {
            Stage::Generation => self.display.show_generation,
            Stage::Pruning | Stage::Repair | Stage::Letters => self.display.show_letters,
        }
    }

    /// Save the recorded frames to a GIF file that loops forever.
    pub fn save_gif(&self, path: &Path) -> Result<()> {
        save_gif(path, &self.frames, FRAME_DELAY_MS)
    }
}

impl Progress for Recorder {
    fn snapshot(&mut self, grid: &mut Grid, stage: Stage) {
        if !self.records(stage) {
            return;
        }
        let draw: &Draw = &self.draw;
        let surface: &mut ImageSurface = self.surface.get_or_insert_with(|| {
            // Fresh surface
            grid.mark_all_dirty();
            draw.surface(grid)
        });
        draw.render(grid, surface, &Markers::default());
        self.frames.push(surface.image().clone());
        debug!("Recorded frame {} ({stage:?})", self.frames.len());
    }
}

/// Write the frames to an animated GIF file.
pub fn save_gif(path: &Path, frames: &[RgbImage], delay_ms: u32) -> Result<()> {
    let file: File =
        File::create(path).with_context(|| format!("creating animation {}", path.display()))?;
    let mut encoder: GifEncoder<BufWriter<File>> = GifEncoder::new(BufWriter::new(file));
    encoder
        .set_repeat(Repeat::Infinite)
        .context("setting the animation loop")?;

    for image in frames {
        let frame: Frame = Frame::from_parts(
            DynamicImage::ImageRgb8(image.clone()).to_rgba8(),
            0,
            0,
            Delay::from_numer_denom_ms(delay_ms, 1),
        );
        encoder
            .encode_frame(frame)
            .with_context(|| format!("writing animation {}", path.display()))?;
    }
    info!(
        "Animation with {} frames saved to {}",
        frames.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::maze::Maze;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::path::PathBuf;

    fn settings(show_generation: bool, show_letters: bool) -> Settings {
        let mut s: Settings = Settings {
            grid_width: 10,
            grid_height: 8,
            cell_width: 6,
            cell_height: 6,
            word: Some(String::from("go")),
            ..Settings::default()
        };
        s.display.show_generation = show_generation;
        s.display.show_letters = show_letters;
        s
    }

    fn record(s: &Settings) -> (Option<Maze>, Recorder) {
        let mut recorder: Recorder = Recorder::new(Draw::new(s), s.display);
        let maze: Option<Maze> = (0..100).find_map(|seed| {
            recorder.frames.clear();
            let mut rng: StdRng = StdRng::seed_from_u64(seed);
            Maze::generate(s, &mut rng, &mut recorder).ok()
        });
        (maze, recorder)
    }

    #[test]
    fn one_frame_per_generation_sweep() {
        let s: Settings = settings(true, false);
        let (maze, recorder) = record(&s);
        let maze: Maze = maze.unwrap();

        assert_eq!(recorder.frames().len(), maze.stats.sweeps);
        assert!(
            recorder
                .frames()
                .iter()
                .all(|f| Some(f.dimensions()) == s.image_size())
        );
    }

    #[test]
    fn nothing_is_recorded_without_display_flags() {
        let s: Settings = settings(false, false);
        let (maze, recorder) = record(&s);
        assert!(maze.is_some());
        assert!(recorder.frames().is_empty());
    }

    #[test]
    fn letter_steps_follow_the_generation() {
        let s: Settings = settings(true, true);
        let (maze, recorder) = record(&s);
        let maze: Maze = maze.unwrap();

        // Pruning, repair passes, and letters
        assert!(recorder.frames().len() >= maze.stats.sweeps + 2);
        assert_ne!(
            recorder.frames()[maze.stats.sweeps - 1],
            recorder.frames()[recorder.frames().len() - 1]
        );
    }

    #[test]
    fn letter_flag_records_all_the_encoding_stages() {
        let s: Settings = settings(false, true);
        let recorder: Recorder = Recorder::new(Draw::new(&s), s.display);
        assert!(!recorder.records(Stage::Generation));
        assert!(recorder.records(Stage::Pruning));
        assert!(recorder.records(Stage::Repair));
        assert!(recorder.records(Stage::Letters));
    }

    #[test]
    fn frames_are_written_as_gif() {
        let frames: Vec<RgbImage> = vec![
            RgbImage::from_pixel(12, 9, image::Rgb([0, 0, 0])),
            RgbImage::from_pixel(12, 9, image::Rgb([255, 255, 255])),
        ];
        let path: PathBuf = std::env::temp_dir().join(format!(
            "wordmaze-animation-test-{}.gif",
            std::process::id()
        ));
        save_gif(&path, &frames, 100).unwrap();
        assert_eq!(image::image_dimensions(&path).unwrap(), (12, 9));
        std::fs::remove_file(&path).unwrap();
    }
}
