//! Wang IDs: the 8-slot boundary color vector of a tile
//!
//! Slots use Tiled's position indexing:
//!   7|0|1
//!   6|X|2
//!   5|4|3
//! - Even indices (0,2,4,6) = Edges (Top, Right, Bottom, Left)
//! - Odd indices (1,3,5,7) = Corners (TopRight, BottomRight, BottomLeft, TopLeft)

use crate::terrain::WangSetType;
use crate::AutotileError;
use serde::{Deserialize, Serialize};
use std::fmt;
use wang_terrain_core::{ColorId, WILDCARD};

/// Number of slots in a WangId
pub const WANG_ID_LEN: usize = 8;

/// Named slot positions, clockwise from the top edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WangPosition {
    Top = 0,
    TopRight = 1,
    Right = 2,
    BottomRight = 3,
    Bottom = 4,
    BottomLeft = 5,
    Left = 6,
    TopLeft = 7,
}

impl WangPosition {
    pub const ALL: [WangPosition; 8] = [
        WangPosition::Top,
        WangPosition::TopRight,
        WangPosition::Right,
        WangPosition::BottomRight,
        WangPosition::Bottom,
        WangPosition::BottomLeft,
        WangPosition::Left,
        WangPosition::TopLeft,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Grid offset of the neighbor in this direction (+y is down)
    pub fn offset(self) -> (i32, i32) {
        NEIGHBOR_OFFSETS[self.index()]
    }
}

/// Neighbor offsets in WangId slot order. Rows grow downward.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),  // 0 = Top
    (1, -1),  // 1 = TopRight
    (1, 0),   // 2 = Right
    (1, 1),   // 3 = BottomRight
    (0, 1),   // 4 = Bottom
    (-1, 1),  // 5 = BottomLeft
    (-1, 0),  // 6 = Left
    (-1, -1), // 7 = TopLeft
];

/// Boundary colors of a tile at all 8 positions. 0 = wildcard.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WangId {
    colors: [ColorId; WANG_ID_LEN],
}

impl WangId {
    pub const WILDCARD: Self = WangId {
        colors: [WILDCARD; WANG_ID_LEN],
    };

    pub const fn new(colors: [ColorId; WANG_ID_LEN]) -> Self {
        Self { colors }
    }

    /// Build from a slice, failing unless it has exactly 8 entries
    pub fn from_slice(colors: &[ColorId]) -> Result<Self, AutotileError> {
        let colors: [ColorId; WANG_ID_LEN] = colors
            .try_into()
            .map_err(|_| AutotileError::InvalidWangId { len: colors.len() })?;
        Ok(Self { colors })
    }

    /// Every slot set to one color
    pub fn filled(color: ColorId) -> Self {
        Self {
            colors: [color; WANG_ID_LEN],
        }
    }

    /// Every slot active under `set_type` set to `color`, others wildcard
    pub fn filled_for(set_type: WangSetType, color: ColorId) -> Self {
        let mut wang_id = Self::WILDCARD;
        for &i in set_type.active_indices() {
            wang_id.colors[i] = color;
        }
        wang_id
    }

    pub fn colors(&self) -> &[ColorId; WANG_ID_LEN] {
        &self.colors
    }

    /// Color at slot `i` (wraps modulo 8)
    pub fn index_color(&self, i: usize) -> ColorId {
        self.colors[i % WANG_ID_LEN]
    }

    pub fn color_at(&self, position: WangPosition) -> ColorId {
        self.colors[position.index()]
    }

    /// Copy with slot `i` replaced
    #[must_use]
    pub fn with_index_color(mut self, i: usize, color: ColorId) -> Self {
        self.colors[i % WANG_ID_LEN] = color;
        self
    }

    /// Slot on a neighbor that faces slot `i`
    pub fn opposite_index(i: usize) -> usize {
        (i + 4) % 8
    }

    /// Check if index is a corner (odd indices: 1,3,5,7)
    pub fn is_corner(i: usize) -> bool {
        i % 2 == 1
    }

    /// Get next index clockwise
    pub fn next_index(i: usize) -> usize {
        (i + 1) % 8
    }

    /// Get previous index counter-clockwise
    pub fn prev_index(i: usize) -> usize {
        (i + 7) % 8
    }

    /// Rotate `n` quarter turns clockwise: slot `i` moves to `(i + 2n) mod 8`
    #[must_use]
    pub fn rotated(&self, n: usize) -> Self {
        let shift = 2 * (n % 4);
        let mut colors = [WILDCARD; WANG_ID_LEN];
        for (i, &color) in self.colors.iter().enumerate() {
            colors[(i + shift) % 8] = color;
        }
        Self { colors }
    }

    /// Mirror across the vertical axis (left <-> right)
    #[must_use]
    pub fn flipped_horizontally(&self) -> Self {
        let mut colors = [WILDCARD; WANG_ID_LEN];
        for (i, color) in colors.iter_mut().enumerate() {
            *color = self.colors[(8 - i) % 8];
        }
        Self { colors }
    }

    /// Mirror across the horizontal axis (top <-> bottom)
    #[must_use]
    pub fn flipped_vertically(&self) -> Self {
        let mut colors = [WILDCARD; WANG_ID_LEN];
        for (i, color) in colors.iter_mut().enumerate() {
            *color = self.colors[(12 - i) % 8];
        }
        Self { colors }
    }

    /// Compatibility under `set_type`: wildcards match anything, otherwise
    /// every active slot must be equal.
    pub fn matches(&self, other: &WangId, set_type: WangSetType) -> bool {
        set_type.active_indices().iter().all(|&i| {
            let a = self.colors[i];
            let b = other.colors[i];
            a == WILDCARD || b == WILDCARD || a == b
        })
    }

    pub fn has_wildcards(&self, set_type: WangSetType) -> bool {
        set_type
            .active_indices()
            .iter()
            .any(|&i| self.colors[i] == WILDCARD)
    }

    /// Check if any slot holds a real color
    pub fn has_any_color(&self) -> bool {
        self.colors.iter().any(|&c| c != WILDCARD)
    }

    /// Distinct non-wildcard colors on the active slots, in slot order
    pub fn active_colors(&self, set_type: WangSetType) -> Vec<ColorId> {
        let mut colors = Vec::new();
        for &i in set_type.active_indices() {
            let color = self.colors[i];
            if color != WILDCARD && !colors.contains(&color) {
                colors.push(color);
            }
        }
        colors
    }

    /// The single color on every active slot, if there is one
    pub fn uniform_color(&self, set_type: WangSetType) -> Option<ColorId> {
        let active = set_type.active_indices();
        let first = self.colors[active[0]];
        if first != WILDCARD && active.iter().all(|&i| self.colors[i] == first) {
            Some(first)
        } else {
            None
        }
    }

    /// Canonical key: slot 0 in the most significant byte, so key order
    /// follows slot order and equal keys mean equal WangIds.
    pub fn to_key(&self) -> u64 {
        u64::from_be_bytes(self.colors)
    }
}

impl fmt::Debug for WangId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WangId({:?})", self.colors)
    }
}

impl fmt::Display for WangId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, color) in self.colors.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", color)?;
        }
        Ok(())
    }
}

impl From<[ColorId; WANG_ID_LEN]> for WangId {
    fn from(colors: [ColorId; WANG_ID_LEN]) -> Self {
        Self::new(colors)
    }
}

impl TryFrom<&[ColorId]> for WangId {
    type Error = AutotileError;

    fn try_from(colors: &[ColorId]) -> Result<Self, Self::Error> {
        Self::from_slice(colors)
    }
}
