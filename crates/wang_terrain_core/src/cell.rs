//! Placed tile references and their orientation algebra

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terrain color identifier (0 = wildcard / unpainted, 1+ = a real color)
pub type ColorId = u8;

/// The reserved wildcard color. Matches anything, never stored as a real color.
pub const WILDCARD: ColorId = 0;

/// A placed tile: which tile of which tileset, in which orientation.
///
/// The three flip flags together encode all 8 dihedral orientations of a
/// square sprite. The horizontal and vertical flips are applied first and
/// `flip_d`, a diagonal transpose, is applied last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub tileset_index: u32,
    pub tile_id: u32,
    #[serde(default)]
    pub flip_h: bool,
    #[serde(default)]
    pub flip_v: bool,
    #[serde(default)]
    pub flip_d: bool,
}

impl Cell {
    /// Create an unflipped cell
    pub fn new(tileset_index: u32, tile_id: u32) -> Self {
        Self {
            tileset_index,
            tile_id,
            flip_h: false,
            flip_v: false,
            flip_d: false,
        }
    }

    /// Set all three flip flags at once
    pub fn with_flips(mut self, flip_h: bool, flip_v: bool, flip_d: bool) -> Self {
        self.flip_h = flip_h;
        self.flip_v = flip_v;
        self.flip_d = flip_d;
        self
    }

    /// Check if the cell is drawn in its authored orientation
    pub fn is_unflipped(&self) -> bool {
        !self.flip_h && !self.flip_v && !self.flip_d
    }

    /// Same tile, authored orientation
    pub fn base(&self) -> Self {
        Self::new(self.tileset_index, self.tile_id)
    }

    /// Rotate the sprite 90 degrees clockwise.
    ///
    /// `(flip_h, flip_v, flip_d) -> (flip_v, !flip_h, !flip_d)`
    pub fn rotated_cw(self) -> Self {
        Self {
            flip_h: self.flip_v,
            flip_v: !self.flip_h,
            flip_d: !self.flip_d,
            ..self
        }
    }

    /// Rotate the sprite `n` quarter turns clockwise
    pub fn rotated(self, n: usize) -> Self {
        (0..n % 4).fold(self, |cell, _| cell.rotated_cw())
    }

    /// Mirror the sprite across its vertical axis.
    ///
    /// A transposed sprite has its axes swapped, so the vertical flag is toggled instead.
    pub fn flipped_horizontally(self) -> Self {
        if self.flip_d {
            Self {
                flip_v: !self.flip_v,
                ..self
            }
        } else {
            Self {
                flip_h: !self.flip_h,
                ..self
            }
        }
    }

    /// Mirror the sprite across its horizontal axis
    pub fn flipped_vertically(self) -> Self {
        if self.flip_d {
            Self {
                flip_h: !self.flip_h,
                ..self
            }
        } else {
            Self {
                flip_v: !self.flip_v,
                ..self
            }
        }
    }

    /// Canonical sprite-cache key: `"tilesetIndex:tileId:flipH:flipV:flipD"`
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            self.tileset_index, self.tile_id, self.flip_h, self.flip_v, self.flip_d
        )
    }
}
