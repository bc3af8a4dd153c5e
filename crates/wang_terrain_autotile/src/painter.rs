//! Terrain painting with indirect transitions
//!
//! Painting writes the new color, then re-derives the boundary colors of the
//! map (stepping stones included) and re-resolves every cell whose desired
//! WangId moved. Stepping-stone colors only steer tile resolution. The
//! painted color plane is never touched by them.

use crate::boundary::BoundaryColors;
use crate::matching::find_best_match;
use crate::terrain::WangSet;
use crate::wang::NEIGHBOR_OFFSETS;
use log::{debug, trace, warn};
use rand::Rng;
use std::collections::BTreeSet;
use wang_terrain_core::{Cell, ColorId, TerrainGrid, TerrainGridMut, WILDCARD};

/// A grid position
pub type Pos = (i32, i32);

/// Paint a single cell and re-resolve around it.
///
/// Painting color 0 erases the cell. Returns the positions whose resolved
/// tile changed, nearest to `(x, y)` first. Off-map positions are a no-op.
pub fn paint_terrain(
    map: &mut impl TerrainGridMut,
    wang_set: &WangSet,
    x: i32,
    y: i32,
    color: ColorId,
    rng: &mut impl Rng,
) -> Vec<Pos> {
    paint_terrain_region(map, wang_set, &[(x, y)], color, rng)
}

/// Paint several cells with one color as a single edit.
///
/// Boundary derivation and re-resolution run once for the whole region.
/// Changes are ordered around the first in-bounds position.
pub fn paint_terrain_region(
    map: &mut impl TerrainGridMut,
    wang_set: &WangSet,
    positions: &[Pos],
    color: ColorId,
    rng: &mut impl Rng,
) -> Vec<Pos> {
    let painted: Vec<Pos> = positions
        .iter()
        .copied()
        .filter(|&(x, y)| map.in_bounds(x, y))
        .collect();
    let Some(&origin) = painted.first() else {
        return Vec::new();
    };

    let before = BoundaryColors::derive(&*map, wang_set);
    for &(x, y) in &painted {
        map.set_color_at(x, y, color);
    }
    let after = BoundaryColors::derive(&*map, wang_set);

    let mut stale = stale_cells(&*map, &before, &after);
    stale.extend(with_neighborhood(&*map, painted.iter().copied()));
    let order = sort_around(stale, origin);
    let changed = resolve_cells(map, wang_set, &after, &order, rng);

    debug!(
        "paint_terrain: {} cell(s) painted with color {}, {} stepping stone(s), {} recomputed, {} changed",
        painted.len(),
        color,
        after.stepping_stone_count(),
        order.len(),
        changed.len()
    );

    changed
}

/// Compute what painting a cell would change without touching `map`.
///
/// Returns each changed position with its new tile, in the same order
/// [`paint_terrain`] would report them.
pub fn preview_terrain<G>(
    map: &G,
    wang_set: &WangSet,
    x: i32,
    y: i32,
    color: ColorId,
    rng: &mut impl Rng,
) -> Vec<(Pos, Option<Cell>)>
where
    G: TerrainGridMut + Clone,
{
    let mut scratch = map.clone();
    paint_terrain(&mut scratch, wang_set, x, y, color, rng)
        .into_iter()
        .map(|(px, py)| ((px, py), scratch.cell_at(px, py)))
        .collect()
}

/// Re-resolve every cell of the map from the painted colors alone.
///
/// Each cell is matched independently against its derived boundary, in
/// row-major order so the random draws are reproducible. Color-0 cells end up
/// unresolved. Returns the positions whose tile changed.
pub fn resolve_all_tiles(
    map: &mut impl TerrainGridMut,
    wang_set: &WangSet,
    rng: &mut impl Rng,
) -> Vec<Pos> {
    let boundary = BoundaryColors::derive(&*map, wang_set);
    let order: Vec<Pos> = (0..map.height() as i32)
        .flat_map(|y| (0..map.width() as i32).map(move |x| (x, y)))
        .collect();
    let changed = resolve_cells(map, wang_set, &boundary, &order, rng);
    debug!(
        "resolve_all_tiles: {} cells, {} stepping stone(s), {} changed",
        order.len(),
        boundary.stepping_stone_count(),
        changed.len()
    );
    changed
}

/// Cells whose tile no longer fits the colors.
///
/// That is every cell whose desired WangId differs between `before` and
/// `after`, every painted cell without a tile, and every unpainted cell
/// still holding one.
pub(crate) fn stale_cells(
    map: &impl TerrainGrid,
    before: &BoundaryColors,
    after: &BoundaryColors,
) -> BTreeSet<Pos> {
    (0..map.height() as i32)
        .flat_map(|y| (0..map.width() as i32).map(move |x| (x, y)))
        .filter(|&(x, y)| {
            let painted = map.color_at(x, y) != WILDCARD;
            before.desired_wang_id(x, y) != after.desired_wang_id(x, y)
                || painted != map.cell_at(x, y).is_some()
        })
        .collect()
}

/// Every in-bounds position of `cells` plus its 8 neighbors
pub(crate) fn with_neighborhood(
    map: &impl TerrainGrid,
    cells: impl IntoIterator<Item = Pos>,
) -> BTreeSet<Pos> {
    let mut result = BTreeSet::new();
    for (x, y) in cells {
        result.insert((x, y));
        for (dx, dy) in NEIGHBOR_OFFSETS {
            result.insert((x + dx, y + dy));
        }
    }
    result.retain(|&(x, y)| map.in_bounds(x, y));
    result
}

/// Order positions by squared distance from `origin`, then by row, then by column
pub(crate) fn sort_around(positions: impl IntoIterator<Item = Pos>, origin: Pos) -> Vec<Pos> {
    let mut sorted: Vec<Pos> = positions.into_iter().collect();
    sorted.sort_by_key(|&(x, y)| {
        let (dx, dy) = (x - origin.0, y - origin.1);
        (dx * dx + dy * dy, y, x)
    });
    sorted
}

/// Match each cell of `order` against its boundary, returning the positions
/// whose tile changed.
///
/// Cells never read each other's tiles, so the order only decides which
/// random draw each cell gets. When no variant fits, the previous tile is kept.
pub(crate) fn resolve_cells(
    map: &mut impl TerrainGridMut,
    wang_set: &WangSet,
    boundary: &BoundaryColors,
    order: &[Pos],
    rng: &mut impl Rng,
) -> Vec<Pos> {
    let set_type = wang_set.set_type();
    let mut changed = Vec::new();

    for &(x, y) in order {
        let previous = map.cell_at(x, y);
        let resolved = if map.color_at(x, y) == WILDCARD {
            None
        } else {
            let desired = boundary.desired_wang_id(x, y);
            match find_best_match(wang_set, &desired, set_type, rng) {
                Some(best) => {
                    trace!(
                        "resolved ({}, {}) to {} (penalty {})",
                        x,
                        y,
                        best.variant.cell,
                        best.penalty
                    );
                    Some(best.variant.cell)
                }
                None => {
                    warn!(
                        "No tile in '{}' fits {} at ({}, {}), keeping previous tile",
                        wang_set.name, desired, x, y
                    );
                    previous
                }
            }
        };

        if resolved != previous {
            map.set_cell_at(x, y, resolved);
            changed.push((x, y));
        }
    }

    changed
}
