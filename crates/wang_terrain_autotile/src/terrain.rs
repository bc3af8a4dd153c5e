//! Terrain colors and Wang sets
//!
//! A [`WangSet`] owns the authored tile -> WangId mapping for one terrain
//! family, plus the caches derived from it (orientation variants and the
//! color-distance graph). Caches are rebuilt lazily after any change.

use crate::config::VariantConfig;
use crate::distance::ColorDistances;
use crate::variant::{generate_variants, WangVariant};
use crate::wang::WangId;
use crate::AutotileError;
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::collections::HashMap;
use uuid::Uuid;
use wang_terrain_core::{Cell, ColorId, WILDCARD};

/// Simple RGBA color for terrain visualization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build from 8-bit channels
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Type of Wang set - determines which WangId slots take part in matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WangSetType {
    /// Only the 4 corners (odd slots) matter
    /// Good for basic terrain transitions
    #[default]
    Corner,
    /// Only the 4 edges (even slots) matter
    /// Good for roads, platforms, paths
    Edge,
    /// All 8 slots matter
    /// Most flexible, requires more tiles
    Mixed,
}

impl WangSetType {
    /// Slot indices that participate in matching and distance computation
    pub fn active_indices(&self) -> &'static [usize] {
        match self {
            WangSetType::Corner => &[1, 3, 5, 7],
            WangSetType::Edge => &[0, 2, 4, 6],
            WangSetType::Mixed => &[0, 1, 2, 3, 4, 5, 6, 7],
        }
    }

    pub fn is_active(&self, index: usize) -> bool {
        match self {
            WangSetType::Corner => index % 2 == 1,
            WangSetType::Edge => index % 2 == 0,
            WangSetType::Mixed => index < 8,
        }
    }

    /// Get the number of positions used by this set type
    pub fn position_count(&self) -> usize {
        self.active_indices().len()
    }
}

/// A named terrain color within a set (e.g., "Grass", "Dirt", "Water")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WangColor {
    pub name: String,
    /// Display color for UI visualization
    pub color: Color,
    /// Representative tile for this color (shown in UI)
    #[serde(default)]
    pub icon_tile: Option<Cell>,
    /// Relative selection weight of tiles using this color
    #[serde(default = "default_probability")]
    pub probability: f32,
}

fn default_probability() -> f32 {
    1.0
}

impl WangColor {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            icon_tile: None,
            probability: 1.0,
        }
    }

    pub fn with_probability(mut self, probability: f32) -> Self {
        self.probability = probability;
        self
    }
}

/// One authored tile of a Wang set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WangTile {
    pub tileset_index: u32,
    pub tile_id: u32,
    pub wang_id: WangId,
    /// Relative selection weight of this tile
    #[serde(default = "default_probability")]
    pub probability: f32,
}

impl WangTile {
    pub fn cell(&self) -> Cell {
        Cell::new(self.tileset_index, self.tile_id)
    }
}

/// Lazily rebuilt data derived from the authored tiles
#[derive(Debug, Clone, Default)]
struct WangSetCache {
    tile_index: OnceCell<HashMap<(u32, u32), usize>>,
    variants: OnceCell<Vec<WangVariant>>,
    variant_lookup: OnceCell<HashMap<Cell, WangId>>,
    distances: OnceCell<ColorDistances>,
}

/// A terrain family: its colors, authored tiles, and derived caches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WangSet {
    pub id: Uuid,
    pub name: String,
    set_type: WangSetType,
    /// Colors in id order: `colors[0]` is color 1
    colors: Vec<WangColor>,
    /// Authored tiles in authoring order
    tiles: Vec<WangTile>,
    #[serde(default)]
    variant_config: VariantConfig,
    #[serde(skip)]
    cache: WangSetCache,
}

impl WangSet {
    pub fn new(name: impl Into<String>, set_type: WangSetType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            set_type,
            colors: Vec::new(),
            tiles: Vec::new(),
            variant_config: VariantConfig::default(),
            cache: WangSetCache::default(),
        }
    }

    pub fn with_variant_config(mut self, config: VariantConfig) -> Self {
        self.set_variant_config(config);
        self
    }

    pub fn set_type(&self) -> WangSetType {
        self.set_type
    }

    pub fn variant_config(&self) -> VariantConfig {
        self.variant_config
    }

    /// Change which orientation transforms are allowed
    pub fn set_variant_config(&mut self, config: VariantConfig) {
        if self.variant_config != config {
            self.variant_config = config;
            self.invalidate_variants();
        }
    }

    fn invalidate_variants(&mut self) {
        self.cache.variants = OnceCell::new();
        self.cache.variant_lookup = OnceCell::new();
    }

    fn invalidate_tiles(&mut self) {
        self.cache.tile_index = OnceCell::new();
        self.cache.distances = OnceCell::new();
        self.invalidate_variants();
    }

    // Colors

    /// Add a new color, returning its 1-based id
    pub fn add_color(
        &mut self,
        name: impl Into<String>,
        color: Color,
    ) -> Result<ColorId, AutotileError> {
        self.add_wang_color(WangColor::new(name, color))
    }

    /// Add a new color. Fails once every non-wildcard id is taken.
    pub fn add_wang_color(&mut self, color: WangColor) -> Result<ColorId, AutotileError> {
        let id = ColorId::try_from(self.colors.len() + 1).map_err(|_| AutotileError::TooManyColors {
            max: ColorId::MAX as usize,
        })?;
        self.colors.push(color);
        self.cache.distances = OnceCell::new();
        Ok(id)
    }

    /// Remove a color. Tile slots using it become wildcards and higher ids shift down.
    pub fn remove_color(&mut self, id: ColorId) -> Option<WangColor> {
        if id == WILDCARD || id as usize > self.colors.len() {
            return None;
        }
        for tile in &mut self.tiles {
            let mut wang_id = tile.wang_id;
            for i in 0..8 {
                let color = wang_id.index_color(i);
                if color == id {
                    wang_id = wang_id.with_index_color(i, WILDCARD);
                } else if color > id {
                    wang_id = wang_id.with_index_color(i, color - 1);
                }
            }
            tile.wang_id = wang_id;
        }
        let removed = self.colors.remove(id as usize - 1);
        self.invalidate_tiles();
        Some(removed)
    }

    pub fn color(&self, id: ColorId) -> Option<&WangColor> {
        if id == WILDCARD {
            return None;
        }
        self.colors.get(id as usize - 1)
    }

    pub fn colors(&self) -> &[WangColor] {
        &self.colors
    }

    pub fn color_count(&self) -> usize {
        self.colors.len()
    }

    /// Get color id by name
    pub fn color_id(&self, name: &str) -> Option<ColorId> {
        self.colors
            .iter()
            .position(|c| c.name == name)
            .map(|i| (i + 1) as ColorId)
    }

    pub fn set_color_probability(&mut self, id: ColorId, probability: f32) {
        if id != WILDCARD {
            if let Some(color) = self.colors.get_mut(id as usize - 1) {
                color.probability = probability;
            }
        }
    }

    // Tiles

    /// Map a tile to a WangId, replacing any existing mapping for it
    pub fn add_tile(&mut self, tileset_index: u32, tile_id: u32, wang_id: WangId) {
        self.add_tile_with_probability(tileset_index, tile_id, wang_id, 1.0);
    }

    pub fn add_tile_with_probability(
        &mut self,
        tileset_index: u32,
        tile_id: u32,
        wang_id: WangId,
        probability: f32,
    ) {
        let tile = WangTile {
            tileset_index,
            tile_id,
            wang_id,
            probability,
        };
        match self.tile_position(tileset_index, tile_id) {
            Some(pos) => self.tiles[pos] = tile,
            None => self.tiles.push(tile),
        }
        self.invalidate_tiles();
    }

    /// Remove a tile mapping, returning its WangId
    pub fn remove_tile(&mut self, tileset_index: u32, tile_id: u32) -> Option<WangId> {
        let pos = self.tile_position(tileset_index, tile_id)?;
        let removed = self.tiles.remove(pos);
        self.invalidate_tiles();
        Some(removed.wang_id)
    }

    pub fn tiles(&self) -> &[WangTile] {
        &self.tiles
    }

    fn tile_position(&self, tileset_index: u32, tile_id: u32) -> Option<usize> {
        self.cache
            .tile_index
            .get_or_init(|| {
                self.tiles
                    .iter()
                    .enumerate()
                    .map(|(pos, t)| ((t.tileset_index, t.tile_id), pos))
                    .collect()
            })
            .get(&(tileset_index, tile_id))
            .copied()
    }

    /// Authored WangId of a tile
    pub fn wang_id_of(&self, tileset_index: u32, tile_id: u32) -> Option<WangId> {
        self.tile_position(tileset_index, tile_id)
            .map(|pos| self.tiles[pos].wang_id)
    }

    /// WangId of a placed cell, orientation included
    pub fn wang_id_of_cell(&self, cell: &Cell) -> Option<WangId> {
        let lookup = self.cache.variant_lookup.get_or_init(|| {
            let mut lookup = HashMap::new();
            for variant in self.all_variants() {
                lookup.entry(variant.cell).or_insert(variant.wang_id);
            }
            lookup
        });
        lookup.get(cell).copied().or_else(|| {
            if cell.is_unflipped() {
                self.wang_id_of(cell.tileset_index, cell.tile_id)
            } else {
                None
            }
        })
    }

    /// Selection weight of a tile (1.0 for unknown tiles)
    pub fn tile_probability(&self, tileset_index: u32, tile_id: u32) -> f32 {
        self.tile_position(tileset_index, tile_id)
            .map(|pos| self.tiles[pos].probability)
            .unwrap_or(1.0)
    }

    /// Tiles whose active slots all carry `color` (useful for "fill" tiles)
    pub fn uniform_tiles(&self, color: ColorId) -> Vec<Cell> {
        self.tiles
            .iter()
            .filter(|t| t.wang_id.uniform_color(self.set_type) == Some(color))
            .map(WangTile::cell)
            .collect()
    }

    // Derived data

    /// Every orientation variant of every authored tile
    pub fn all_variants(&self) -> &[WangVariant] {
        self.cache
            .variants
            .get_or_init(|| generate_variants(&self.tiles, self.variant_config))
    }

    /// The color-distance graph over this set's colors
    pub fn color_distances(&self) -> &ColorDistances {
        self.cache.distances.get_or_init(|| {
            ColorDistances::build(
                self.colors.len(),
                self.tiles.iter().map(|t| &t.wang_id),
                self.set_type,
            )
        })
    }

    /// Shortest transition chain length between two colors.
    ///
    /// 0 when equal or either is a wildcard, -1 when no chain of tiles connects them.
    pub fn color_distance(&self, a: ColorId, b: ColorId) -> i32 {
        if a == b || a == WILDCARD || b == WILDCARD {
            return 0;
        }
        self.color_distances().distance(a, b)
    }

    /// First color to step through when going from `from` to `to`.
    ///
    /// `to` itself when the colors can border directly, None when unreachable.
    pub fn next_hop_color(&self, from: ColorId, to: ColorId) -> Option<ColorId> {
        match self.color_distance(from, to) {
            0 | 1 => Some(to),
            d if d < 0 => None,
            _ => {
                let hop = self.color_distances().next_hop(from, to);
                if hop > 0 {
                    Some(hop as ColorId)
                } else {
                    None
                }
            }
        }
    }

    /// Largest finite color distance in the set
    pub fn max_color_distance(&self) -> i32 {
        self.color_distances().max_distance()
    }

    /// Product of the probabilities of every color on the WangId's slots
    pub fn wang_id_probability(&self, wang_id: &WangId) -> f32 {
        wang_id
            .colors()
            .iter()
            .filter(|&&c| c != WILDCARD)
            .map(|&c| self.color(c).map(|wc| wc.probability).unwrap_or(1.0))
            .product()
    }
}
