//! Flood fill with indirect transitions
//!
//! Recolors the 4-connected region sharing the start cell's color, then
//! re-derives the boundary colors (stepping stones at the region's edge
//! included) and re-resolves the region together with its surrounding ring
//! in a single pass.

use crate::boundary::BoundaryColors;
use crate::painter::{resolve_cells, sort_around, stale_cells, with_neighborhood, Pos};
use crate::terrain::WangSet;
use log::debug;
use rand::Rng;
use std::collections::{HashSet, VecDeque};
use wang_terrain_core::{ColorId, TerrainGrid, TerrainGridMut, WILDCARD};

const CARDINAL_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Fill the region connected to `(x, y)` with `color`.
///
/// Starting off-map or on an unpainted cell does nothing. Otherwise every
/// recomputed position is returned, nearest to the start first, even when
/// the region already had `color`.
pub fn flood_fill_terrain(
    map: &mut impl TerrainGridMut,
    wang_set: &WangSet,
    x: i32,
    y: i32,
    color: ColorId,
    rng: &mut impl Rng,
) -> Vec<Pos> {
    if !map.in_bounds(x, y) {
        return Vec::new();
    }
    let target = map.color_at(x, y);
    if target == WILDCARD {
        return Vec::new();
    }

    let before = BoundaryColors::derive(&*map, wang_set);
    let region = connected_region(&*map, x, y, target);
    for &(rx, ry) in &region {
        map.set_color_at(rx, ry, color);
    }
    let after = BoundaryColors::derive(&*map, wang_set);

    let mut touched = stale_cells(&*map, &before, &after);
    touched.extend(with_neighborhood(&*map, region.iter().copied()));
    let order = sort_around(touched, (x, y));
    let changed = resolve_cells(map, wang_set, &after, &order, rng);

    debug!(
        "flood_fill_terrain: {} cells from ({}, {}) recolored {} -> {}, {} stepping stone(s), {} recomputed, {} changed",
        region.len(),
        x,
        y,
        target,
        color,
        after.stepping_stone_count(),
        order.len(),
        changed.len()
    );

    order
}

/// 4-connected cells sharing `target`, in breadth-first order from the start
fn connected_region(map: &impl TerrainGrid, x: i32, y: i32, target: ColorId) -> Vec<Pos> {
    let mut region = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    visited.insert((x, y));
    queue.push_back((x, y));

    while let Some((cx, cy)) = queue.pop_front() {
        region.push((cx, cy));
        for (dx, dy) in CARDINAL_OFFSETS {
            let next = (cx + dx, cy + dy);
            if map.in_bounds(next.0, next.1)
                && map.color_at(next.0, next.1) == target
                && visited.insert(next)
            {
                queue.push_back(next);
            }
        }
    }

    region
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::resolve_all_tiles;
    use crate::testing::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use wang_terrain_core::AutotileMap;

    fn seeded_rng() -> SmallRng {
        SmallRng::seed_from_u64(3)
    }

    #[test]
    fn test_refill_same_color_still_resolves() {
        let set = grass_dirt_corner_set();
        let mut map = AutotileMap::filled(5, 5, GRASS);
        resolve_all_tiles(&mut map, &set, &mut seeded_rng());

        let recomputed = flood_fill_terrain(&mut map, &set, 2, 2, GRASS, &mut seeded_rng());
        assert!(!recomputed.is_empty());
        assert_eq!(recomputed[0], (2, 2));
        assert!(map.colors().iter().all(|&c| c == GRASS));
    }

    #[test]
    fn test_sand_line_filled_back_to_dirt() {
        let set = grass_dirt_sand_corner_set();
        let mut map = AutotileMap::filled(5, 5, DIRT);
        for y in 1..=3 {
            map.set_color_at(2, y, SAND);
        }
        resolve_all_tiles(&mut map, &set, &mut seeded_rng());

        flood_fill_terrain(&mut map, &set, 2, 2, DIRT, &mut seeded_rng());

        for y in 1..=3 {
            assert_eq!(map.color_at(2, y), DIRT);
            assert!(map.cell_at(2, y).is_some());
        }
        assert!(map.colors().iter().all(|&c| c == DIRT));
    }

    #[test]
    fn test_fill_does_not_cross_color_boundary() {
        let set = grass_dirt_corner_set();
        let mut map = AutotileMap::filled(7, 3, GRASS);
        // A Dirt wall splits the Grass into two regions
        for y in 0..3 {
            map.set_color_at(3, y, DIRT);
        }

        flood_fill_terrain(&mut map, &set, 0, 1, DIRT, &mut seeded_rng());

        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(map.color_at(x, y), DIRT);
            }
            for x in 4..7 {
                assert_eq!(map.color_at(x, y), GRASS);
            }
        }
    }

    #[test]
    fn test_fill_diagonal_cells_are_not_connected() {
        let set = grass_dirt_corner_set();
        let mut map = AutotileMap::filled(2, 2, DIRT);
        map.set_color_at(0, 0, GRASS);
        map.set_color_at(1, 1, GRASS);

        flood_fill_terrain(&mut map, &set, 0, 0, DIRT, &mut seeded_rng());
        assert_eq!(map.color_at(0, 0), DIRT);
        assert_eq!(map.color_at(1, 1), GRASS);
    }

    #[test]
    fn test_fill_noop_off_map_or_empty() {
        let set = grass_dirt_corner_set();
        let mut map = AutotileMap::filled(3, 3, GRASS);
        map.set_color_at(1, 1, WILDCARD);
        let before = map.clone();

        assert!(flood_fill_terrain(&mut map, &set, -1, 0, DIRT, &mut seeded_rng()).is_empty());
        assert!(flood_fill_terrain(&mut map, &set, 0, 3, DIRT, &mut seeded_rng()).is_empty());
        assert!(flood_fill_terrain(&mut map, &set, 1, 1, DIRT, &mut seeded_rng()).is_empty());
        assert_eq!(map, before);
    }

    #[test]
    fn test_fill_inserts_intermediates_at_region_edge() {
        let set = grass_dirt_sand_corner_set();
        let mut map = AutotileMap::filled(6, 3, DIRT);
        for y in 0..3 {
            for x in 0..2 {
                map.set_color_at(x, y, GRASS);
            }
        }
        resolve_all_tiles(&mut map, &set, &mut seeded_rng());

        // The Grass strip becomes Sand, the Dirt next to it steps through Grass
        flood_fill_terrain(&mut map, &set, 0, 0, SAND, &mut seeded_rng());

        for y in 0..3 {
            assert_eq!(map.color_at(1, y), SAND);
            assert_eq!(map.color_at(2, y), DIRT);
            let wang_id = map
                .cell_at(2, y)
                .and_then(|cell| set.wang_id_of_cell(&cell))
                .unwrap();
            assert!(!wang_id.active_colors(set.set_type()).contains(&DIRT));
        }
    }

    #[test]
    fn test_fill_survives_export_import_round_trip() {
        let set = grass_dirt_sand_corner_set();
        let mut map = AutotileMap::filled(6, 6, DIRT);
        map.set_color_at(2, 2, GRASS);
        map.set_color_at(2, 3, GRASS);
        resolve_all_tiles(&mut map, &set, &mut seeded_rng());
        flood_fill_terrain(&mut map, &set, 2, 2, SAND, &mut seeded_rng());
        let filled = wang_ids(&map, &set);

        let colors = map.export_colors();
        map.clear();
        assert_eq!(map.resolved_count(), 0);

        map.import_colors(&colors).unwrap();
        resolve_all_tiles(&mut map, &set, &mut seeded_rng());
        assert_eq!(map.export_colors(), colors);
        assert_eq!(map.resolved_count(), 36);
        assert_eq!(wang_ids(&map, &set), filled);
        assert_eq!(shared_corner_mismatches(&map, &set), 0);
        assert_eq!(tiles_joining(&map, &set, DIRT, SAND), 0);
    }
}
