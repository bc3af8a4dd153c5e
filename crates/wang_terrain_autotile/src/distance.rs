//! Color-distance graph
//!
//! Two colors are adjacent when a single authored tile carries both on its
//! active slots. All-pairs shortest paths (Floyd-Warshall) over that graph
//! tell the painter how many transition steps separate two colors and which
//! color to step through first.

use crate::terrain::WangSetType;
use crate::wang::WangId;
use wang_terrain_core::{ColorId, WILDCARD};

/// Marker for "no chain of tiles connects these colors"
pub const UNREACHABLE: i32 = -1;

const INFINITY: i32 = i32::MAX;

/// Square distance and next-hop matrices indexed by color id.
///
/// Row/column 0 is the wildcard and is never part of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorDistances {
    size: usize,
    distance: Vec<i32>,
    next_hop: Vec<i32>,
    max_distance: i32,
}

impl ColorDistances {
    /// Build the matrices for colors `1..=color_count` from the authored WangIds
    pub fn build<'a>(
        color_count: usize,
        wang_ids: impl IntoIterator<Item = &'a WangId>,
        set_type: WangSetType,
    ) -> Self {
        let size = color_count + 1;
        let mut distance = vec![INFINITY; size * size];
        let mut next_hop = vec![UNREACHABLE; size * size];

        for c in 1..size {
            distance[c * size + c] = 0;
            next_hop[c * size + c] = c as i32;
        }

        for wang_id in wang_ids {
            let colors = wang_id.active_colors(set_type);
            for &a in &colors {
                for &b in &colors {
                    let (a, b) = (a as usize, b as usize);
                    if a == b || a >= size || b >= size {
                        continue;
                    }
                    distance[a * size + b] = 1;
                    next_hop[a * size + b] = b as i32;
                }
            }
        }

        // Relax through every intermediate color
        for k in 1..size {
            for a in 1..size {
                let a_to_k = distance[a * size + k];
                if a_to_k == INFINITY {
                    continue;
                }
                for c in 1..size {
                    let k_to_c = distance[k * size + c];
                    if k_to_c == INFINITY {
                        continue;
                    }
                    let through = a_to_k + k_to_c;
                    if through < distance[a * size + c] {
                        distance[a * size + c] = through;
                        next_hop[a * size + c] = next_hop[a * size + k];
                    }
                }
            }
        }

        let mut max_distance = 0;
        for d in distance.iter_mut() {
            if *d == INFINITY {
                *d = UNREACHABLE;
            } else {
                max_distance = max_distance.max(*d);
            }
        }

        Self {
            size,
            distance,
            next_hop,
            max_distance,
        }
    }

    /// Number of real colors covered
    pub fn color_count(&self) -> usize {
        self.size - 1
    }

    fn slot(&self, a: ColorId, b: ColorId) -> Option<usize> {
        let (a, b) = (a as usize, b as usize);
        if a == WILDCARD as usize || b == WILDCARD as usize || a >= self.size || b >= self.size {
            None
        } else {
            Some(a * self.size + b)
        }
    }

    /// Shortest path length, or -1 when unreachable or out of range
    pub fn distance(&self, a: ColorId, b: ColorId) -> i32 {
        self.slot(a, b)
            .map(|idx| self.distance[idx])
            .unwrap_or(UNREACHABLE)
    }

    /// First color on the shortest path from `a` to `b`, or -1
    pub fn next_hop(&self, a: ColorId, b: ColorId) -> i32 {
        self.slot(a, b)
            .map(|idx| self.next_hop[idx])
            .unwrap_or(UNREACHABLE)
    }

    /// Largest finite distance between any two colors
    pub fn max_distance(&self) -> i32 {
        self.max_distance
    }
}
