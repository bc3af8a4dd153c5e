//! Shared Wang set fixtures for unit tests

use crate::terrain::{Color, WangSet, WangSetType};
use crate::wang::WangId;
use wang_terrain_core::{AutotileMap, Cell, ColorId, TerrainGrid};

pub(crate) const GRASS: ColorId = 1;
pub(crate) const DIRT: ColorId = 2;
pub(crate) const SAND: ColorId = 3;

/// Corner WangId from its corners, clockwise from top-right
pub(crate) fn corner_id(tr: ColorId, br: ColorId, bl: ColorId, tl: ColorId) -> WangId {
    WangId::new([0, tr, 0, br, 0, bl, 0, tl])
}

/// Corners of a two-color tile whose bit `n` selects `b` on the n-th corner
fn masked_corners(mask: u32, a: ColorId, b: ColorId) -> WangId {
    let pick = |bit: u32| if mask & (1 << bit) != 0 { b } else { a };
    corner_id(pick(0), pick(1), pick(2), pick(3))
}

/// Grass/Dirt corner set with all 16 combinations on tileset 0.
///
/// Tile id is the bitmask of Dirt corners (tr, br, bl, tl), so tile 0 is
/// all Grass and tile 15 is all Dirt.
pub(crate) fn grass_dirt_corner_set() -> WangSet {
    let mut set = WangSet::new("Ground", WangSetType::Corner);
    let grass = set.add_color("Grass", Color::GREEN).unwrap();
    let dirt = set.add_color("Dirt", Color::from_rgba8(139, 90, 43, 255)).unwrap();
    for mask in 0..16 {
        set.add_tile(0, mask, masked_corners(mask, grass, dirt));
    }
    set
}

/// Grass/Dirt plus Grass/Sand, with no tile joining Dirt and Sand directly.
///
/// Grass/Sand tiles are ids 16..=30 for Sand masks 1..=15 (tile 30 is all Sand).
pub(crate) fn grass_dirt_sand_corner_set() -> WangSet {
    let mut set = grass_dirt_corner_set();
    let sand = set.add_color("Sand", Color::from_rgba8(237, 201, 175, 255)).unwrap();
    for mask in 1..16 {
        set.add_tile(0, 15 + mask, masked_corners(mask, GRASS, sand));
    }
    set
}

/// Colors 1 and 2 connect, color 3 connects to nothing
pub(crate) fn disconnected_set() -> WangSet {
    let mut set = WangSet::new("Islands", WangSetType::Corner);
    set.add_color("A", Color::RED).unwrap();
    set.add_color("B", Color::GREEN).unwrap();
    set.add_color("C", Color::BLUE).unwrap();
    set.add_tile(0, 0, corner_id(1, 1, 1, 1));
    set.add_tile(0, 1, corner_id(2, 2, 2, 2));
    set.add_tile(0, 2, corner_id(1, 2, 2, 1));
    set.add_tile(0, 3, corner_id(3, 3, 3, 3));
    set
}

/// The authored cell of `set` with exactly these corners
pub(crate) fn corner_cell(
    set: &WangSet,
    tr: ColorId,
    br: ColorId,
    bl: ColorId,
    tl: ColorId,
) -> Cell {
    let wang_id = corner_id(tr, br, bl, tl);
    set.tiles()
        .iter()
        .find(|t| t.wang_id == wang_id)
        .map(|t| t.cell())
        .unwrap_or_else(|| panic!("no tile with corners {wang_id}"))
}

/// WangId of every resolved cell, row-major
pub(crate) fn wang_ids(map: &AutotileMap, set: &WangSet) -> Vec<Option<WangId>> {
    map.positions()
        .map(|(x, y)| map.cell_at(x, y).and_then(|cell| set.wang_id_of_cell(&cell)))
        .collect()
}

/// Corners where two resolved neighbors disagree on the color they share
pub(crate) fn shared_corner_mismatches(map: &AutotileMap, set: &WangSet) -> usize {
    // (neighbor offset, our corner slot, their corner slot)
    const SHARED: [((i32, i32), usize, usize); 6] = [
        ((1, 0), 1, 7),
        ((1, 0), 3, 5),
        ((0, 1), 5, 7),
        ((0, 1), 3, 1),
        ((1, 1), 3, 7),
        ((-1, 1), 5, 1),
    ];
    let wang_id = |x: i32, y: i32| map.cell_at(x, y).and_then(|cell| set.wang_id_of_cell(&cell));

    map.positions()
        .map(|(x, y)| {
            let Some(ours) = wang_id(x, y) else {
                return 0;
            };
            SHARED
                .iter()
                .filter(|((dx, dy), mine, theirs)| {
                    wang_id(x + dx, y + dy)
                        .is_some_and(|other| ours.index_color(*mine) != other.index_color(*theirs))
                })
                .count()
        })
        .sum()
}

/// Resolved tiles showing both `a` and `b`
pub(crate) fn tiles_joining(map: &AutotileMap, set: &WangSet, a: ColorId, b: ColorId) -> usize {
    wang_ids(map, set)
        .into_iter()
        .flatten()
        .filter(|wang_id| {
            let colors = wang_id.active_colors(set.set_type());
            colors.contains(&a) && colors.contains(&b)
        })
        .count()
}
