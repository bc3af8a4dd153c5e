//! Wang set metadata for wang_terrain
//!
//! This crate defines the on-disk description of a tileset's Wang sets,
//! validates it, and builds engine [`WangSet`]s from it. Validation collects
//! every problem instead of stopping at the first one.
//!
//! # Example
//!
//! ```rust,ignore
//! use wang_terrain_schema::{load_tileset_metadata, build_wang_sets};
//!
//! let tileset = load_tileset_metadata(Path::new("terrain.json"))?;
//! let wang_sets = build_wang_sets(&tileset, 0)?;
//! ```

mod convert;
mod types;
mod validate;

pub use convert::*;
pub use types::*;
pub use validate::*;

use std::path::Path;
use thiserror::Error;
pub use wang_terrain_autotile::WangSet;

/// Errors that can occur when loading or validating metadata
#[derive(Debug, Error, PartialEq)]
pub enum MetadataError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Load tileset metadata from a JSON file
pub fn load_tileset_metadata(path: &Path) -> Result<TilesetMetadata, MetadataError> {
    let content = std::fs::read_to_string(path).map_err(|e| MetadataError::Io(e.to_string()))?;

    parse_tileset_metadata(&content)
}

/// Parse tileset metadata from a JSON string, validating every Wang set
pub fn parse_tileset_metadata(json: &str) -> Result<TilesetMetadata, MetadataError> {
    let tileset: TilesetMetadata =
        serde_json::from_str(json).map_err(|e| MetadataError::Parse(e.to_string()))?;

    let errors = validate_tileset_metadata(&tileset);
    if !errors.is_empty() {
        return Err(MetadataError::Validation(errors));
    }

    Ok(tileset)
}

/// Save tileset metadata to a JSON file
pub fn save_tileset_metadata(tileset: &TilesetMetadata, path: &Path) -> Result<(), MetadataError> {
    let content =
        serde_json::to_string_pretty(tileset).map_err(|e| MetadataError::Parse(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| MetadataError::Io(e.to_string()))?;

    Ok(())
}

/// Load a tileset file and build all of its Wang sets
pub fn load_wang_sets(path: &Path, tileset_index: u32) -> Result<Vec<WangSet>, MetadataError> {
    let tileset = load_tileset_metadata(path)?;
    build_wang_sets(&tileset, tileset_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wang_terrain_autotile::WangSetType;

    const TERRAIN_JSON: &str = r##"{
        "name": "terrain.png",
        "tilecount": 32,
        "wangsets": [
            {
                "name": "Ground",
                "type": "corner",
                "colors": [
                    { "name": "Grass", "color": "#40a040" },
                    { "name": "Dirt", "color": "#8b5a2b", "probability": 0.5 }
                ],
                "wangtiles": [
                    { "tileid": 0, "wangid": [0, 1, 0, 1, 0, 1, 0, 1] },
                    { "tileid": 1, "wangid": [0, 2, 0, 2, 0, 2, 0, 2] },
                    { "tileid": 2, "wangid": [0, 2, 0, 2, 0, 1, 0, 1], "probability": 2.0 }
                ],
                "transformations": { "allow_rotate": true, "allow_flip_h": true }
            },
            {
                "name": "Roads",
                "type": "edge",
                "colors": [{ "name": "Road", "color": "#ff808080" }],
                "wangtiles": [
                    { "tileid": 20, "wangid": [1, 0, 0, 0, 1, 0, 0, 0] }
                ]
            }
        ]
    }"##;

    #[test]
    fn test_parse_tileset_metadata() {
        let tileset = parse_tileset_metadata(TERRAIN_JSON).unwrap();
        assert_eq!(tileset.tile_count, 32);
        assert_eq!(tileset.wangsets.len(), 2);

        let ground = &tileset.wangsets[0];
        assert_eq!(ground.set_type, WangSetType::Corner);
        assert_eq!(ground.colors[0].probability, 1.0);
        assert_eq!(ground.colors[1].probability, 0.5);
        assert_eq!(ground.wangtiles[2].probability, Some(2.0));
        assert!(ground.transformations.allow_flip_h);
        assert!(!ground.transformations.allow_flip_v);

        let roads = &tileset.wangsets[1];
        assert_eq!(roads.set_type, WangSetType::Edge);
        assert!(!roads.transformations.allow_rotate);
    }

    #[test]
    fn test_build_wang_sets_from_json() {
        let tileset = parse_tileset_metadata(TERRAIN_JSON).unwrap();
        let sets = build_wang_sets(&tileset, 1).unwrap();

        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].color_distance(1, 2), 1);
        assert!(sets[1].wang_id_of(1, 20).is_some());
    }

    #[test]
    fn test_parse_error() {
        let result = parse_tileset_metadata("{ not json");
        assert!(matches!(result, Err(MetadataError::Parse(_))));
    }

    #[test]
    fn test_validation_errors_are_reported() {
        let json = r##"{
            "name": "bad.png",
            "tilecount": 4,
            "wangsets": [{
                "name": "Ground",
                "type": "corner",
                "colors": [{ "name": "Grass", "color": "#40a040" }],
                "wangtiles": [
                    { "tileid": 0, "wangid": [0, 1, 0, 1] },
                    { "tileid": 9, "wangid": [0, 1, 0, 1, 0, 1, 0, 1] }
                ]
            }]
        }"##;

        match parse_tileset_metadata(json) {
            Err(MetadataError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                let message = MetadataError::Validation(errors).to_string();
                assert!(message.starts_with("Validation failed: "));
            }
            other => panic!("expected validation errors, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("wang_terrain_schema_missing_file.json");
        let result = load_tileset_metadata(&path);
        assert!(matches!(result, Err(MetadataError::Io(_))));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "wang_terrain_schema_round_trip_{}.json",
            std::process::id()
        ));
        let tileset = parse_tileset_metadata(TERRAIN_JSON).unwrap();

        save_tileset_metadata(&tileset, &path).unwrap();
        let loaded = load_tileset_metadata(&path).unwrap();
        let sets = load_wang_sets(&path, 0).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, tileset);
        assert_eq!(sets.len(), 2);
    }
}
