//! Tile matching
//!
//! Builds the desired boundary of a cell from its neighbors and picks the
//! variant that fits it best. Exact matches cost nothing, mismatched slots
//! cost their color distance, and a slot whose colors cannot be connected at
//! all disqualifies the candidate. Ties are broken by a weighted random draw.

use crate::terrain::{WangSet, WangSetType};
use crate::variant::WangVariant;
use crate::wang::{WangId, NEIGHBOR_OFFSETS};
use log::trace;
use rand::Rng;
use wang_terrain_core::{TerrainGrid, WILDCARD};

/// The variant chosen for a cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch {
    pub variant: WangVariant,
    /// Summed color distance over mismatched slots (0 = exact)
    pub penalty: i32,
}

/// What a neighbor presents toward the cell being resolved
fn neighbor_wang_id(map: &impl TerrainGrid, x: i32, y: i32, wang_set: &WangSet) -> WangId {
    if !map.in_bounds(x, y) {
        return WangId::WILDCARD;
    }
    let color = map.color_at(x, y);
    match map.cell_at(x, y) {
        Some(cell) => wang_set
            .wang_id_of_cell(&cell)
            .unwrap_or_else(|| WangId::filled(color)),
        None => WangId::filled(color),
    }
}

/// Build the desired WangId for a cell from its 8 neighbors.
///
/// - Off-map or empty neighbors contribute wildcards.
/// - A painted but unresolved neighbor contributes its painted color.
/// - A resolved neighbor contributes the color on its facing slot.
///
/// A corner the diagonal neighbor leaves open is taken from the matching
/// corner of the two edge neighbors that also touch it.
pub fn wang_id_from_surroundings(
    map: &impl TerrainGrid,
    x: i32,
    y: i32,
    wang_set: &WangSet,
) -> WangId {
    let mut neighbors = [WangId::WILDCARD; 8];
    for (i, (dx, dy)) in NEIGHBOR_OFFSETS.iter().enumerate() {
        neighbors[i] = neighbor_wang_id(map, x + dx, y + dy, wang_set);
    }

    let mut result = WangId::WILDCARD;

    // Edges come from the opposite edge of the edge neighbor
    for i in [0, 2, 4, 6] {
        let opp = WangId::opposite_index(i);
        result = result.with_index_color(i, neighbors[i].index_color(opp));
    }

    // Corners come from the diagonal neighbor, with edge-neighbor fallbacks
    for i in [1, 3, 5, 7] {
        let opp = WangId::opposite_index(i);
        let mut color = neighbors[i].index_color(opp);

        // Fallback 1: the edge neighbor counter-clockwise of this corner
        if color == WILDCARD {
            let edge = WangId::prev_index(i);
            color = neighbors[edge].index_color((i + 2) % 8);
        }

        // Fallback 2: the edge neighbor clockwise of this corner
        if color == WILDCARD {
            let edge = WangId::next_index(i);
            color = neighbors[edge].index_color((i + 6) % 8);
        }

        result = result.with_index_color(i, color);
    }

    result
}

/// Penalty of placing `candidate` where `desired` is wanted, or None when
/// some active slot asks for a color the candidate cannot transition to.
pub fn match_penalty(
    wang_set: &WangSet,
    desired: &WangId,
    candidate: &WangId,
    set_type: WangSetType,
) -> Option<i32> {
    let mut penalty = 0;
    for &i in set_type.active_indices() {
        let want = desired.index_color(i);
        let have = candidate.index_color(i);
        if want == WILDCARD || have == WILDCARD || want == have {
            continue;
        }
        let distance = wang_set.color_distance(want, have);
        if distance < 0 {
            return None;
        }
        penalty += distance;
    }
    Some(penalty)
}

/// Find the lowest-penalty variant for `desired`.
///
/// Every variant at the minimum penalty enters a pool weighted by
/// `wang_id_probability * tile probability`, and one is drawn from `rng`.
/// Returns None when every variant is disqualified.
pub fn find_best_match(
    wang_set: &WangSet,
    desired: &WangId,
    set_type: WangSetType,
    rng: &mut impl Rng,
) -> Option<BestMatch> {
    let mut best_penalty = i32::MAX;
    let mut candidates: Vec<(&WangVariant, f32)> = Vec::new();
    let mut rejected_count = 0;

    for variant in wang_set.all_variants() {
        let Some(penalty) = match_penalty(wang_set, desired, &variant.wang_id, set_type) else {
            rejected_count += 1;
            continue;
        };

        if penalty < best_penalty {
            best_penalty = penalty;
            candidates.clear();
        }
        if penalty == best_penalty {
            let weight = wang_set.wang_id_probability(&variant.wang_id) * variant.probability;
            candidates.push((variant, weight));
        }
    }

    trace!(
        "find_best_match: {} candidates at penalty {}, {} rejected for {:?}",
        candidates.len(),
        best_penalty,
        rejected_count,
        desired
    );

    random_pick(&candidates, rng).map(|variant| BestMatch {
        variant: *variant,
        penalty: best_penalty,
    })
}

/// Weighted random draw. A single candidate is returned without consuming randomness.
fn random_pick<'a, T>(candidates: &[(&'a T, f32)], rng: &mut impl Rng) -> Option<&'a T> {
    match candidates {
        [] => None,
        [(only, _)] => Some(*only),
        _ => {
            let total: f32 = candidates.iter().map(|(_, w)| w.max(0.0)).sum();
            if total <= 0.0 {
                // All weights zero: fall back to a uniform draw
                let idx = rng.gen_range(0..candidates.len());
                return Some(candidates[idx].0);
            }

            let mut remaining = rng.gen::<f32>() * total;
            for (candidate, weight) in candidates {
                remaining -= weight.max(0.0);
                if remaining <= 0.0 {
                    return Some(*candidate);
                }
            }
            candidates.last().map(|(c, _)| *c)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use wang_terrain_core::{AutotileMap, Cell, TerrainGridMut};

    fn seeded_rng() -> SmallRng {
        SmallRng::seed_from_u64(0)
    }

    #[test]
    fn test_surroundings_off_map_and_empty_are_wildcards() {
        let set = grass_dirt_corner_set();
        let map = AutotileMap::new(1, 1);
        assert_eq!(wang_id_from_surroundings(&map, 0, 0, &set), WangId::WILDCARD);
    }

    #[test]
    fn test_surroundings_use_painted_colors_of_unresolved_neighbors() {
        let set = grass_dirt_corner_set();
        let mut map = AutotileMap::new(3, 3);
        map.set_color_at(2, 0, DIRT); // top-right diagonal

        let desired = wang_id_from_surroundings(&map, 1, 1, &set);
        assert_eq!(desired.index_color(1), DIRT);
        assert_eq!(desired.index_color(3), WILDCARD);
        assert_eq!(desired.index_color(5), WILDCARD);
    }

    #[test]
    fn test_surroundings_take_facing_slot_of_resolved_neighbor() {
        let set = grass_dirt_corner_set();
        let mut map = AutotileMap::new(3, 3);
        // Right neighbor: Dirt on its left corners, Grass on its right corners
        map.set_color_at(2, 1, GRASS);
        map.set_cell_at(2, 1, Some(corner_cell(&set, GRASS, GRASS, DIRT, DIRT)));

        let desired = wang_id_from_surroundings(&map, 1, 1, &set);
        // Our right corners face its left corners
        assert_eq!(desired.index_color(1), DIRT);
        assert_eq!(desired.index_color(3), DIRT);
        assert_eq!(desired.index_color(5), WILDCARD);
        assert_eq!(desired.index_color(7), WILDCARD);
    }

    #[test]
    fn test_find_best_match_exact() {
        let set = grass_dirt_corner_set();
        let mut rng = seeded_rng();
        let desired = corner_id(GRASS, DIRT, DIRT, GRASS);

        let best = find_best_match(&set, &desired, set.set_type(), &mut rng).unwrap();
        assert_eq!(best.penalty, 0);
        assert_eq!(best.variant.wang_id, desired);
    }

    #[test]
    fn test_find_best_match_wildcards_pool_all() {
        let set = grass_dirt_corner_set();
        let desired = corner_id(GRASS, GRASS, GRASS, 0);

        let mut picked = std::collections::HashSet::new();
        let mut rng = seeded_rng();
        for _ in 0..64 {
            let best = find_best_match(&set, &desired, set.set_type(), &mut rng).unwrap();
            assert_eq!(best.penalty, 0);
            picked.insert(best.variant.cell);
        }
        // All-Grass and the Dirt top-left corner tile both fit
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_find_best_match_penalizes_indirect_colors() {
        let set = grass_dirt_sand_corner_set();
        let mut rng = seeded_rng();
        // Dirt and Sand on one tile cannot be authored, Grass bridges them
        let desired = corner_id(DIRT, DIRT, SAND, SAND);

        let best = find_best_match(&set, &desired, set.set_type(), &mut rng).unwrap();
        assert!(best.penalty > 0);
        assert!(match_penalty(&set, &desired, &best.variant.wang_id, set.set_type()).is_some());
    }

    #[test]
    fn test_unreachable_colors_disqualify() {
        let set = disconnected_set();
        let mut rng = seeded_rng();
        // Color 3 has no tiles bridging it to 1
        let desired = corner_id(1, 1, 3, 3);
        let only_one = find_best_match(&set, &desired, set.set_type(), &mut rng);
        assert!(only_one.is_none());
    }

    #[test]
    fn test_weighted_pick_respects_probability() {
        let mut set = grass_dirt_corner_set();
        set.add_tile_with_probability(0, 100, corner_id(GRASS, GRASS, GRASS, GRASS), 9.0);
        let desired = corner_id(GRASS, GRASS, GRASS, GRASS);

        let mut counts: HashMap<u32, usize> = HashMap::new();
        let mut rng = seeded_rng();
        for _ in 0..1000 {
            let best = find_best_match(&set, &desired, set.set_type(), &mut rng).unwrap();
            *counts.entry(best.variant.cell.tile_id).or_default() += 1;
        }
        let heavy = counts.get(&100).copied().unwrap_or(0);
        let light = counts.get(&0).copied().unwrap_or(0);
        assert_eq!(heavy + light, 1000);
        assert!(heavy > light * 4);
    }

    #[test]
    fn test_single_candidate_does_not_consume_rng() {
        let set = grass_dirt_corner_set();
        let desired = corner_id(DIRT, DIRT, DIRT, DIRT);

        let mut rng = seeded_rng();
        find_best_match(&set, &desired, set.set_type(), &mut rng);
        let mut fresh = seeded_rng();
        assert_eq!(rng.gen::<u64>(), fresh.gen::<u64>());
        assert_eq!(
            find_best_match(&set, &desired, set.set_type(), &mut seeded_rng()).map(|m| m.variant.cell),
            Some(Cell::new(0, 15))
        );
    }
}
