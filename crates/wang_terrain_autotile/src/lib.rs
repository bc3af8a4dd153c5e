//! Tiled-compatible Wang terrain autotile engine
//!
//! This crate turns a grid of painted terrain colors into concrete tile
//! placements, picking the tile and orientation whose boundary colors agree
//! with every neighbor.
//!
//! # Features
//! - Corner, Edge, and Mixed Wang set types
//! - Rotated and mirrored variants of authored tiles
//! - Color-distance graph for indirect transitions (Dirt -> Grass -> Sand)
//! - Weighted random tie-breaking from a caller-supplied seeded RNG
//! - Single-cell, region and flood-fill painting with incremental re-resolution
//!
//! # Example
//!
//! ```rust,ignore
//! use wang_terrain_autotile::{paint_terrain, Color, WangId, WangSet, WangSetType};
//! use wang_terrain_core::AutotileMap;
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut set = WangSet::new("Ground", WangSetType::Corner);
//! let grass = set.add_color("Grass", Color::GREEN)?;
//! let dirt = set.add_color("Dirt", Color::rgb(0.6, 0.4, 0.2))?;
//! set.add_tile(0, 0, WangId::filled(grass));
//! set.add_tile(0, 1, WangId::filled(dirt));
//! // ... transition tiles
//!
//! let mut map = AutotileMap::filled(10, 10, grass);
//! let mut rng = SmallRng::seed_from_u64(0);
//! let changed = paint_terrain(&mut map, &set, 5, 5, dirt, &mut rng);
//! ```

pub mod boundary;
pub mod config;
pub mod distance;
pub mod fill;
pub mod matching;
pub mod painter;
pub mod terrain;
pub mod variant;
pub mod wang;

#[cfg(test)]
mod testing;

// Re-export main types at crate root
pub use boundary::BoundaryColors;
pub use config::{AutotileConfig, BrushTool, TerrainBrush, VariantConfig};
pub use distance::{ColorDistances, UNREACHABLE};
pub use fill::flood_fill_terrain;
pub use matching::{find_best_match, match_penalty, wang_id_from_surroundings, BestMatch};
pub use painter::{paint_terrain, paint_terrain_region, preview_terrain, resolve_all_tiles, Pos};
pub use terrain::{Color, WangColor, WangSet, WangSetType, WangTile};
pub use variant::{generate_variants, tile_variants, WangVariant};
pub use wang::{WangId, WangPosition, NEIGHBOR_OFFSETS, WANG_ID_LEN};

// Re-export wang_terrain_core
pub use wang_terrain_core;

use thiserror::Error;

/// Errors raised by the autotile engine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AutotileError {
    #[error("WangId must have exactly 8 entries, got {len}")]
    InvalidWangId { len: usize },
    #[error("A Wang set holds at most {max} colors")]
    TooManyColors { max: usize },
}
