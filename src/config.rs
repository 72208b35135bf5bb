/*
config.rs

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

//! Generation and rendering settings.
//!
//! The settings can be read from a JSON file. Missing keys take their default value, so the
//! following file only changes the grid size and the word:
//!
//! ```json
//! {
//!     "grid_width": 40,
//!     "grid_height": 30,
//!     "word": "labyrinth"
//! }
//! ```

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::generator::path_grower::DEFAULT_BRANCH_CHANCE;

pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 Hervé Quatremain\n",
    "License GPL-3.0-or-later <https://www.gnu.org/licenses/gpl-3.0.html>"
);

/// RGB color, components between 0 and 255.
pub type Rgb = [u8; 3];

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// A grid or cell dimension is zero.
    ZeroDimension(&'static str),

    /// The branch probability is not between 0 and 1.
    InvalidProbability(f64),

    /// The grid has too many cells, or the image size in pixels does not fit in 32 bits.
    ImageTooLarge,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::ZeroDimension(name) => write!(f, "{name} must be at least 1"),
            ConfigError::InvalidProbability(p) => {
                write!(f, "the branch probability must be between 0 and 1, got {p}")
            }
            ConfigError::ImageTooLarge => write!(f, "the maze image is too large"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Colors used to paint the maze.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Palette {
    /// Walls between cells.
    pub wall: Rgb,

    /// Explored cells.
    pub background: Rgb,

    /// Cells that no walk reached.
    pub unexplored: Rgb,

    /// Maze start.
    pub start: Rgb,

    /// Maze end.
    pub end: Rgb,

    /// Cells of the solution, when displayed.
    pub solution: Rgb,

    /// Letters and debug overlays.
    pub glyph: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            wall: [0, 0, 0],
            background: [127, 127, 127],
            unexplored: [0, 0, 0],
            start: [0, 255, 0],
            end: [255, 0, 0],
            solution: [0, 0, 255],
            glyph: [255, 255, 255],
        }
    }
}

/// Debug display modes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct DisplayFlags {
    /// Highlight the solution.
    pub show_solution: bool,

    /// Print the entry direction of each cell.
    pub show_entries: bool,

    /// Print the number of exits of each cell.
    pub show_exits: bool,

    /// Record a frame after each generation sweep.
    pub show_generation: bool,

    /// Record a frame after each word encoding step.
    pub show_letters: bool,
}

/// All the settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Number of columns.
    pub grid_width: usize,

    /// Number of rows.
    pub grid_height: usize,

    /// Width of a cell in pixels.
    pub cell_width: u32,

    /// Height of a cell in pixels.
    pub cell_height: u32,

    /// Word to hide in the maze.
    pub word: Option<String>,

    /// Probability of opening a passage toward each unexplored neighbor during the walks.
    pub branch_chance: f64,

    /// Seed of the random generator. A random seed is drawn when missing.
    pub seed: Option<u64>,

    /// Debug display modes.
    pub display: DisplayFlags,

    /// Colors.
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: 25,
            grid_height: 25,
            cell_width: 20,
            cell_height: 20,
            word: None,
            branch_chance: DEFAULT_BRANCH_CHANCE,
            seed: None,
            display: DisplayFlags::default(),
            palette: Palette::default(),
        }
    }
}

impl Settings {
    /// Read the settings from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Settings file: {path:?}");
        let file: File =
            File::open(path).with_context(|| format!("opening settings {}", path.display()))?;
        let reader: BufReader<File> = BufReader::new(file);
        let settings: Settings = serde_json::from_reader(reader)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        Ok(settings)
    }

    /// Verify that the values can be used for generating and rendering a maze.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 {
            return Err(ConfigError::ZeroDimension("grid width"));
        }
        if self.grid_height == 0 {
            return Err(ConfigError::ZeroDimension("grid height"));
        }
        if self.cell_width == 0 {
            return Err(ConfigError::ZeroDimension("cell width"));
        }
        if self.cell_height == 0 {
            return Err(ConfigError::ZeroDimension("cell height"));
        }
        if !(0.0..=1.0).contains(&self.branch_chance) {
            return Err(ConfigError::InvalidProbability(self.branch_chance));
        }
        if self.grid_width.checked_mul(self.grid_height).is_none() || self.image_size().is_none()
        {
            return Err(ConfigError::ImageTooLarge);
        }
        Ok(())
    }

    /// Word to encode, or [`None`] if no word or an empty word is set.
    pub fn word(&self) -> Option<&str> {
        self.word.as_deref().filter(|w| !w.is_empty())
    }

    /// Size of the rendered image in pixels, or [`None`] if it does not fit in 32 bits.
    pub fn image_size(&self) -> Option<(u32, u32)> {
        let width: u32 = u32::try_from(self.grid_width)
            .ok()?
            .checked_mul(self.cell_width)?;
        let height: u32 = u32::try_from(self.grid_height)
            .ok()?
            .checked_mul(self.cell_height)?;
        Some((width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_default_values() {
        let settings: Settings =
            serde_json::from_str(r#"{"grid_width": 40, "word": "maze", "display": {"show_solution": true}}"#)
                .unwrap();
        assert_eq!(settings.grid_width, 40);
        assert_eq!(settings.grid_height, 25);
        assert_eq!(settings.word(), Some("maze"));
        assert!(settings.display.show_solution);
        assert!(!settings.display.show_exits);
        assert_eq!(settings.palette, Palette::default());
        assert_eq!(settings.branch_chance, DEFAULT_BRANCH_CHANCE);
    }

    #[test]
    fn settings_survive_a_json_round_trip() {
        let mut settings: Settings = Settings::default();
        settings.seed = Some(1234);
        settings.palette.wall = [10, 20, 30];

        let json: String = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn validation_rejects_unusable_values() {
        let mut settings: Settings = Settings::default();
        assert_eq!(settings.validate(), Ok(()));

        settings.branch_chance = 1.5;
        assert_eq!(
            settings.validate(),
            Err(ConfigError::InvalidProbability(1.5))
        );

        settings.branch_chance = 0.5;
        settings.cell_height = 0;
        assert_eq!(
            settings.validate(),
            Err(ConfigError::ZeroDimension("cell height"))
        );
    }

    #[test]
    fn empty_word_means_no_word() {
        let mut settings: Settings = Settings::default();
        settings.word = Some(String::new());
        assert_eq!(settings.word(), None);
    }

    #[test]
    fn image_size_follows_grid_and_cell_sizes() {
        let mut settings: Settings = Settings::default();
        settings.grid_width = 7;
        settings.grid_height = 3;
        settings.cell_width = 11;
        settings.cell_height = 13;
        assert_eq!(settings.image_size(), Some((77, 39)));
    }

    #[test]
    fn oversized_images_are_rejected() {
        let mut settings: Settings = Settings::default();
        settings.grid_width = 300_000;
        settings.cell_width = 20_000;
        assert_eq!(settings.image_size(), None);
        assert_eq!(settings.validate(), Err(ConfigError::ImageTooLarge));

        settings.cell_width = 1;
        settings.grid_height = usize::MAX;
        assert_eq!(settings.validate(), Err(ConfigError::ImageTooLarge));

        // Largest width that fits
        settings.grid_height = 2;
        settings.grid_width = 1;
        settings.cell_width = u32::MAX;
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.image_size(), Some((u32::MAX, 40)));
    }
}
