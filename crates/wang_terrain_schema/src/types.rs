//! Serialized Wang set metadata

use serde::{Deserialize, Serialize};
use wang_terrain_autotile::{VariantConfig, WangSetType};

fn default_probability() -> f32 {
    1.0
}

/// One tileset and the Wang sets authored over it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilesetMetadata {
    pub name: String,
    /// Number of tiles in the tileset image
    #[serde(rename = "tilecount")]
    pub tile_count: u32,
    #[serde(default)]
    pub wangsets: Vec<WangSetMetadata>,
}

/// A Wang set as it appears in metadata files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WangSetMetadata {
    pub name: String,
    #[serde(rename = "type")]
    pub set_type: WangSetType,
    /// Ordered colors: the first entry is color 1
    #[serde(default)]
    pub colors: Vec<WangColorMetadata>,
    #[serde(default)]
    pub wangtiles: Vec<WangTileMetadata>,
    /// Orientation transforms allowed when matching
    #[serde(default)]
    pub transformations: VariantConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WangColorMetadata {
    pub name: String,
    /// Display color as `#rrggbb` or `#aarrggbb`
    pub color: String,
    #[serde(default = "default_probability")]
    pub probability: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WangTileMetadata {
    #[serde(rename = "tileid")]
    pub tile_id: u32,
    /// Color per slot, clockwise from the top edge. Must have 8 entries.
    #[serde(rename = "wangid")]
    pub wang_id: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f32>,
}
