//! Conversion between metadata and engine Wang sets

use crate::validate::{validate_tileset_metadata, validate_wang_set_metadata};
use crate::{MetadataError, TilesetMetadata, WangColorMetadata, WangSetMetadata, WangTileMetadata};
use log::debug;
use wang_terrain_autotile::{Color, WangColor, WangId, WangSet};
use wang_terrain_core::ColorId;

/// Parse a `#rrggbb` or `#aarrggbb` display color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();

    match digits.len() {
        6 => Some(Color::from_rgba8(channel(0)?, channel(2)?, channel(4)?, 255)),
        8 => Some(Color::from_rgba8(
            channel(2)?,
            channel(4)?,
            channel(6)?,
            channel(0)?,
        )),
        _ => None,
    }
}

/// Format a display color, dropping alpha when opaque
pub fn format_hex_color(color: &Color) -> String {
    let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    let (r, g, b, a) = (to_u8(color.r), to_u8(color.g), to_u8(color.b), to_u8(color.a));
    if a == 255 {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", a, r, g, b)
    }
}

/// Validate one Wang set and build it over tileset `tileset_index`
pub fn build_wang_set(
    meta: &WangSetMetadata,
    tileset_index: u32,
    tile_count: u32,
) -> Result<WangSet, MetadataError> {
    let errors = validate_wang_set_metadata(meta, tile_count);
    if !errors.is_empty() {
        return Err(MetadataError::Validation(errors));
    }

    let mut wang_set =
        WangSet::new(meta.name.clone(), meta.set_type).with_variant_config(meta.transformations);

    for color in &meta.colors {
        let display = parse_hex_color(&color.color).unwrap_or_default();
        wang_set
            .add_wang_color(
                WangColor::new(color.name.clone(), display).with_probability(color.probability),
            )
            .map_err(|e| MetadataError::Validation(vec![e.to_string()]))?;
    }

    for tile in &meta.wangtiles {
        let colors: Vec<ColorId> = tile.wang_id.iter().map(|&c| c as ColorId).collect();
        let wang_id = WangId::from_slice(&colors)
            .map_err(|e| MetadataError::Validation(vec![e.to_string()]))?;
        wang_set.add_tile_with_probability(
            tileset_index,
            tile.tile_id,
            wang_id,
            tile.probability.unwrap_or(1.0),
        );
    }

    debug!(
        "Built Wang set '{}' ({:?}): {} colors, {} tiles, {} variants",
        wang_set.name,
        wang_set.set_type(),
        wang_set.color_count(),
        wang_set.tiles().len(),
        wang_set.all_variants().len()
    );

    Ok(wang_set)
}

/// Validate a whole tileset and build all of its Wang sets.
///
/// Errors from every set are reported together.
pub fn build_wang_sets(
    tileset: &TilesetMetadata,
    tileset_index: u32,
) -> Result<Vec<WangSet>, MetadataError> {
    let errors = validate_tileset_metadata(tileset);
    if !errors.is_empty() {
        return Err(MetadataError::Validation(errors));
    }

    tileset
        .wangsets
        .iter()
        .map(|meta| build_wang_set(meta, tileset_index, tileset.tile_count))
        .collect()
}

/// Describe a Wang set as metadata.
///
/// Only tiles from `tileset_index` are written, since metadata is per tileset.
pub fn wang_set_metadata(wang_set: &WangSet, tileset_index: u32) -> WangSetMetadata {
    WangSetMetadata {
        name: wang_set.name.clone(),
        set_type: wang_set.set_type(),
        colors: wang_set
            .colors()
            .iter()
            .map(|c| WangColorMetadata {
                name: c.name.clone(),
                color: format_hex_color(&c.color),
                probability: c.probability,
            })
            .collect(),
        wangtiles: wang_set
            .tiles()
            .iter()
            .filter(|t| t.tileset_index == tileset_index)
            .map(|t| WangTileMetadata {
                tile_id: t.tile_id,
                wang_id: t.wang_id.colors().iter().map(|&c| c as u32).collect(),
                probability: (t.probability != 1.0).then_some(t.probability),
            })
            .collect(),
        transformations: wang_set.variant_config(),
    }
}
