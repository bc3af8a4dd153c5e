//! Orientation variants of authored tiles
//!
//! Each authored (tile, WangId) pair expands into the rotations and flips
//! allowed by [`VariantConfig`]. Variants of one tile that present the same
//! boundary are deduplicated, keeping the first one generated.

use crate::config::VariantConfig;
use crate::terrain::WangTile;
use crate::wang::WangId;
use std::collections::HashSet;
use wang_terrain_core::Cell;

/// One orientation of an authored tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WangVariant {
    /// Boundary colors after the transform
    pub wang_id: WangId,
    /// The authored tile with the transform's flip flags
    pub cell: Cell,
    /// Per-tile selection weight, copied from the authored tile
    pub probability: f32,
}

/// Variants of every tile, in authoring order
pub fn generate_variants(tiles: &[WangTile], config: VariantConfig) -> Vec<WangVariant> {
    tiles
        .iter()
        .flat_map(|tile| tile_variants(tile, config))
        .collect()
}

/// Variants of a single tile.
///
/// Order: base, then 90/180/270 rotations, then horizontal mirrors of
/// everything so far, then vertical mirrors of everything so far.
pub fn tile_variants(tile: &WangTile, config: VariantConfig) -> Vec<WangVariant> {
    let mut orientations: Vec<(WangId, Cell)> = vec![(tile.wang_id, tile.cell())];

    if config.allow_rotate {
        for n in 1..4 {
            orientations.push((tile.wang_id.rotated(n), tile.cell().rotated(n)));
        }
    }

    if config.allow_flip_h {
        let mirrored: Vec<_> = orientations
            .iter()
            .map(|(wang_id, cell)| (wang_id.flipped_horizontally(), cell.flipped_horizontally()))
            .collect();
        orientations.extend(mirrored);
    }

    if config.allow_flip_v {
        let mirrored: Vec<_> = orientations
            .iter()
            .map(|(wang_id, cell)| (wang_id.flipped_vertically(), cell.flipped_vertically()))
            .collect();
        orientations.extend(mirrored);
    }

    let mut seen = HashSet::new();
    orientations
        .into_iter()
        .filter(|(wang_id, _)| seen.insert(wang_id.to_key()))
        .map(|(wang_id, cell)| WangVariant {
            wang_id,
            cell,
            probability: tile.probability,
        })
        .collect()
}
