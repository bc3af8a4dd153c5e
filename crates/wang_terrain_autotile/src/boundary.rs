//! Boundary colors shared between neighboring tiles
//!
//! Every tile corner and edge midpoint is a site on a lattice of twice the
//! map's resolution. A site is shared by every cell touching it (4 for a
//! corner, 2 for an edge), and it holds one color derived from the painted
//! colors of those cells. Neighboring tiles therefore always ask for the same
//! color where they meet, and the whole layout depends on the color plane
//! alone, never on the order cells were painted or resolved in.
//!
//! Lattice coordinates: cell `(x, y)` sits at `(2x + 1, 2y + 1)` and its slot
//! `i` at that point plus `NEIGHBOR_OFFSETS[i]`.

use crate::terrain::{WangSet, WangSetType};
use crate::wang::{WangId, NEIGHBOR_OFFSETS};
use log::trace;
use std::cmp::Reverse;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use wang_terrain_core::{ColorId, TerrainGrid, WILDCARD};

/// How firmly a site holds its color. Smaller is firmer.
///
/// Colors painted on fewer of the touching cells win, so a lone painted cell
/// keeps all of its corners. Next come colors whose cells have fewer
/// same-colored neighbors (thin shapes stay visible), then higher color ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Claim {
    count: u8,
    support: u8,
    color: Reverse<ColorId>,
}

/// The color of every tile corner and edge of a map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryColors {
    set_type: WangSetType,
    map_width: u32,
    map_height: u32,
    colors: Vec<ColorId>,
    claims: Vec<Option<Claim>>,
    stepping_stones: usize,
}

impl BoundaryColors {
    /// Derive the boundary colors of `map` for `wang_set`: claim every site,
    /// then insert stepping-stone colors wherever a tile would join two colors
    /// no authored tile can join.
    pub fn derive(map: &impl TerrainGrid, wang_set: &WangSet) -> Self {
        let mut boundary = Self::claim(map, wang_set.set_type());
        boundary.insert_intermediate_colors(wang_set);
        boundary
    }

    /// Give every active site the firmest claim among its touching cells.
    ///
    /// Sites touching only unpainted cells stay wildcards.
    pub fn claim(map: &impl TerrainGrid, set_type: WangSetType) -> Self {
        let (map_width, map_height) = (map.width(), map.height());
        let lattice_width = 2 * map_width as usize + 1;
        let lattice_height = 2 * map_height as usize + 1;

        let support: Vec<u8> = (0..map_height as i32)
            .flat_map(|y| (0..map_width as i32).map(move |x| (x, y)))
            .map(|(x, y)| same_color_neighbors(map, x, y))
            .collect();

        let mut colors = vec![WILDCARD; lattice_width * lattice_height];
        let mut claims = vec![None; lattice_width * lattice_height];

        for sy in 0..lattice_height as i32 {
            for sx in 0..lattice_width as i32 {
                if !site_is_active(sx, sy, set_type) {
                    continue;
                }

                let mut touching: Vec<(ColorId, u8)> = Vec::with_capacity(4);
                for cy in touching_cells(sy) {
                    for cx in touching_cells(sx) {
                        let color = map.color_at(cx, cy);
                        if map.in_bounds(cx, cy) && color != WILDCARD {
                            let idx = cy as usize * map_width as usize + cx as usize;
                            touching.push((color, support[idx]));
                        }
                    }
                }

                let best = touching
                    .iter()
                    .map(|&(color, _)| {
                        let same = touching.iter().filter(|(c, _)| *c == color);
                        Claim {
                            count: same.clone().count() as u8,
                            support: same.map(|(_, s)| *s).min().unwrap_or(0),
                            color: Reverse(color),
                        }
                    })
                    .min();

                if let Some(claim) = best {
                    let idx = sy as usize * lattice_width + sx as usize;
                    colors[idx] = claim.color.0;
                    claims[idx] = Some(claim);
                }
            }
        }

        Self {
            set_type,
            map_width,
            map_height,
            colors,
            claims,
            stepping_stones: 0,
        }
    }

    /// Replace site colors until no tile joins two colors more than one
    /// transition apart.
    ///
    /// Works in rounds over the current colors. For each such pair on a tile,
    /// the site with the weaker claim takes the next-hop color from the
    /// firmer one toward its own. A site that already took a stepping stone
    /// always wins against one that has not and never changes again, so the
    /// rings grow outward and the loop ends. Unreachable pairs are left alone.
    /// Returns the number of sites changed.
    pub fn insert_intermediate_colors(&mut self, wang_set: &WangSet) -> usize {
        let mut stepped = vec![false; self.colors.len()];
        let mut inserted = 0;

        loop {
            // loser -> (firmest winner, hop color)
            let mut proposals: BTreeMap<usize, ((Option<Claim>, usize), ColorId)> = BTreeMap::new();

            for y in 0..self.map_height as i32 {
                for x in 0..self.map_width as i32 {
                    let sites = self.cell_sites(x, y);
                    for (n, &a) in sites.iter().enumerate() {
                        for &b in &sites[n + 1..] {
                            let (color_a, color_b) = (self.colors[a], self.colors[b]);
                            if color_a == WILDCARD
                                || color_b == WILDCARD
                                || wang_set.color_distance(color_a, color_b) <= 1
                            {
                                continue;
                            }

                            let (winner, loser) = match (stepped[a], stepped[b]) {
                                (true, true) => continue,
                                (true, false) => (a, b),
                                (false, true) => (b, a),
                                (false, false) if self.rank(a) <= self.rank(b) => (a, b),
                                (false, false) => (b, a),
                            };
                            let Some(hop) =
                                wang_set.next_hop_color(self.colors[winner], self.colors[loser])
                            else {
                                continue;
                            };

                            let rank = self.rank(winner);
                            match proposals.entry(loser) {
                                Entry::Vacant(entry) => {
                                    entry.insert((rank, hop));
                                }
                                Entry::Occupied(mut entry) if rank < entry.get().0 => {
                                    entry.insert((rank, hop));
                                }
                                Entry::Occupied(_) => {}
                            }
                        }
                    }
                }
            }

            if proposals.is_empty() {
                break;
            }
            for (site, (_, hop)) in proposals {
                trace!(
                    "stepping stone at site {}: {} replaces {}",
                    site,
                    hop,
                    self.colors[site]
                );
                self.colors[site] = hop;
                stepped[site] = true;
                inserted += 1;
            }
        }

        self.stepping_stones += inserted;
        inserted
    }

    /// Number of sites holding a stepping-stone color
    pub fn stepping_stone_count(&self) -> usize {
        self.stepping_stones
    }

    /// The WangId cell `(x, y)` should show, wildcard off the map
    pub fn desired_wang_id(&self, x: i32, y: i32) -> WangId {
        if x < 0 || y < 0 || x >= self.map_width as i32 || y >= self.map_height as i32 {
            return WangId::WILDCARD;
        }
        self.set_type
            .active_indices()
            .iter()
            .fold(WangId::WILDCARD, |wang_id, &i| {
                let color = self.site_index(slot_site(x, y, i)).map_or(WILDCARD, |idx| self.colors[idx]);
                wang_id.with_index_color(i, color)
            })
    }

    fn lattice_width(&self) -> usize {
        2 * self.map_width as usize + 1
    }

    fn site_index(&self, (sx, sy): (i32, i32)) -> Option<usize> {
        let lattice_height = 2 * self.map_height as usize + 1;
        if sx < 0 || sy < 0 || sx as usize >= self.lattice_width() || sy as usize >= lattice_height {
            return None;
        }
        Some(sy as usize * self.lattice_width() + sx as usize)
    }

    /// Lattice indices of the active slots of an in-bounds cell
    fn cell_sites(&self, x: i32, y: i32) -> Vec<usize> {
        self.set_type
            .active_indices()
            .iter()
            .filter_map(|&i| self.site_index(slot_site(x, y, i)))
            .collect()
    }

    /// Total order over sites: firmest claim first, then lattice position
    fn rank(&self, site: usize) -> (Option<Claim>, usize) {
        (self.claims[site], site)
    }
}

/// Lattice position of slot `index` of cell `(x, y)`
fn slot_site(x: i32, y: i32, index: usize) -> (i32, i32) {
    let (dx, dy) = NEIGHBOR_OFFSETS[index];
    (2 * x + 1 + dx, 2 * y + 1 + dy)
}

/// Cell coordinates along one axis touching lattice coordinate `s`
fn touching_cells(s: i32) -> RangeInclusive<i32> {
    if s % 2 == 0 {
        s / 2 - 1..=s / 2
    } else {
        (s - 1) / 2..=(s - 1) / 2
    }
}

/// Corner sites sit on even/even lattice points, edge sites on mixed parity
fn site_is_active(sx: i32, sy: i32, set_type: WangSetType) -> bool {
    match (sx % 2 == 0, sy % 2 == 0) {
        (true, true) => set_type.is_active(1),
        (false, false) => false,
        _ => set_type.is_active(0),
    }
}

/// Painted neighbors (all 8 directions) sharing the cell's color
fn same_color_neighbors(map: &impl TerrainGrid, x: i32, y: i32) -> u8 {
    let color = map.color_at(x, y);
    if color == WILDCARD {
        return 0;
    }
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|(dx, dy)| map.color_at(x + dx, y + dy) == color)
        .count() as u8
}
