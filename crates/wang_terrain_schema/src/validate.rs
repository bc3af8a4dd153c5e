//! Metadata validation logic
//!
//! Validation never fails fast. Every problem found is described in the
//! returned list so a loader can report them all at once.

use crate::convert::parse_hex_color;
use crate::{TilesetMetadata, WangSetMetadata};
use std::collections::HashSet;
use wang_terrain_autotile::{WangSetType, WANG_ID_LEN};
use wang_terrain_core::ColorId;

/// Check a Wang set against a tileset with `tile_count` tiles
pub fn validate_wang_set_metadata(meta: &WangSetMetadata, tile_count: u32) -> Vec<String> {
    let mut errors = Vec::new();
    let set_name = &meta.name;

    if meta.name.trim().is_empty() {
        errors.push("Wang set name must not be empty".to_string());
    }

    if meta.colors.len() > ColorId::MAX as usize {
        errors.push(format!(
            "Wang set '{}' has {} colors, at most {} are supported",
            set_name,
            meta.colors.len(),
            ColorId::MAX
        ));
    }

    for (i, color) in meta.colors.iter().enumerate() {
        if parse_hex_color(&color.color).is_none() {
            errors.push(format!(
                "Wang set '{}' color {} ('{}') has invalid display color '{}'",
                set_name,
                i + 1,
                color.name,
                color.color
            ));
        }
        if color.probability.is_nan() || color.probability < 0.0 {
            errors.push(format!(
                "Wang set '{}' color {} ('{}') has invalid probability {}",
                set_name,
                i + 1,
                color.name,
                color.probability
            ));
        }
    }

    let color_count = meta.colors.len() as u32;
    let mut seen_tiles = HashSet::new();

    for tile in &meta.wangtiles {
        let tile_id = tile.tile_id;

        if !seen_tiles.insert(tile_id) {
            errors.push(format!(
                "Wang set '{}' maps tile {} more than once",
                set_name, tile_id
            ));
        }

        if tile_id >= tile_count {
            errors.push(format!(
                "Wang set '{}' tile {} is outside the tileset ({} tiles)",
                set_name, tile_id, tile_count
            ));
        }

        if let Some(probability) = tile.probability {
            if probability.is_nan() || probability < 0.0 {
                errors.push(format!(
                    "Wang set '{}' tile {} has invalid probability {}",
                    set_name, tile_id, probability
                ));
            }
        }

        if tile.wang_id.len() != WANG_ID_LEN {
            errors.push(format!(
                "Wang set '{}' tile {} has a WangId of length {}, expected {}",
                set_name,
                tile_id,
                tile.wang_id.len(),
                WANG_ID_LEN
            ));
            continue;
        }

        for (slot, &color) in tile.wang_id.iter().enumerate() {
            if color > color_count {
                errors.push(format!(
                    "Wang set '{}' tile {} slot {} references color {}, but only {} colors exist",
                    set_name, tile_id, slot, color, color_count
                ));
            }

            let misplaced = match meta.set_type {
                WangSetType::Corner => slot % 2 == 0,
                WangSetType::Edge => slot % 2 == 1,
                WangSetType::Mixed => false,
            };
            if misplaced && color != 0 {
                errors.push(format!(
                    "Wang set '{}' tile {} has color {} on {} slot {}, which a {:?} set leaves empty",
                    set_name,
                    tile_id,
                    color,
                    if slot % 2 == 0 { "edge" } else { "corner" },
                    slot,
                    meta.set_type
                ));
            }
        }
    }

    errors
}

/// Check every Wang set of a tileset, plus name uniqueness across sets
pub fn validate_tileset_metadata(tileset: &TilesetMetadata) -> Vec<String> {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for wang_set in &tileset.wangsets {
        if !names.insert(wang_set.name.as_str()) {
            errors.push(format!(
                "Tileset '{}' defines Wang set '{}' more than once",
                tileset.name, wang_set.name
            ));
        }
        errors.extend(validate_wang_set_metadata(wang_set, tileset.tile_count));
    }

    errors
}
