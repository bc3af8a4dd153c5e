//! The painted-color / resolved-tile grid that autotiling operates on

use crate::{Cell, ColorId, MapError, WILDCARD};
use serde::{Deserialize, Serialize};

/// Read access to a terrain grid.
///
/// Out-of-bounds reads return safe defaults (color 0 / no cell) instead of erroring.
pub trait TerrainGrid {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i32 && y < self.height() as i32
    }

    /// Painted color at a position (0 when unpainted or out of bounds)
    fn color_at(&self, x: i32, y: i32) -> ColorId;

    /// Resolved tile at a position (None when unresolved or out of bounds)
    fn cell_at(&self, x: i32, y: i32) -> Option<Cell>;
}

/// Write access to a terrain grid. Out-of-bounds writes are no-ops.
pub trait TerrainGridMut: TerrainGrid {
    fn set_color_at(&mut self, x: i32, y: i32, color: ColorId);
    fn set_cell_at(&mut self, x: i32, y: i32, cell: Option<Cell>);
}

/// A width x height grid with two parallel planes: painted colors and resolved tiles.
///
/// Colors are the source of truth. Resolved cells are a derived cache that can
/// always be rebuilt from the colors.
///
/// Deserialization checks that both planes hold exactly `width * height` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AutotileMapData")]
pub struct AutotileMap {
    width: u32,
    height: u32,
    colors: Vec<ColorId>,
    cells: Vec<Option<Cell>>,
}

/// Serialized form of [`AutotileMap`], checked before it becomes a map
#[derive(Deserialize)]
struct AutotileMapData {
    width: u32,
    height: u32,
    colors: Vec<ColorId>,
    cells: Vec<Option<Cell>>,
}

impl TryFrom<AutotileMapData> for AutotileMap {
    type Error = MapError;

    fn try_from(data: AutotileMapData) -> Result<Self, Self::Error> {
        let expected = data.width as usize * data.height as usize;
        for actual in [data.colors.len(), data.cells.len()] {
            if actual != expected {
                return Err(MapError::DimensionMismatch { expected, actual });
            }
        }
        Ok(Self {
            width: data.width,
            height: data.height,
            colors: data.colors,
            cells: data.cells,
        })
    }
}

impl AutotileMap {
    /// Create an empty map (all colors 0, no resolved tiles)
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            colors: vec![WILDCARD; size],
            cells: vec![None; size],
        }
    }

    /// Create a map with every cell painted in one color and nothing resolved
    pub fn filled(width: u32, height: u32, color: ColorId) -> Self {
        let mut map = Self::new(width, height);
        map.colors.fill(color);
        map
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Iterate every in-bounds position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = (i32, i32)> {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    /// The color plane in row-major order
    pub fn colors(&self) -> &[ColorId] {
        &self.colors
    }

    /// The resolved-tile plane in row-major order
    pub fn cells(&self) -> &[Option<Cell>] {
        &self.cells
    }

    /// Copy out the color plane
    pub fn export_colors(&self) -> Vec<ColorId> {
        self.colors.clone()
    }

    /// Replace the color plane. Resolved tiles are dropped since they no longer
    /// describe the new colors.
    pub fn import_colors(&mut self, colors: &[ColorId]) -> Result<(), MapError> {
        if colors.len() != self.colors.len() {
            return Err(MapError::DimensionMismatch {
                expected: self.colors.len(),
                actual: colors.len(),
            });
        }
        self.colors.copy_from_slice(colors);
        self.clear_cells();
        Ok(())
    }

    /// Reset both planes
    pub fn clear(&mut self) {
        self.colors.fill(WILDCARD);
        self.clear_cells();
    }

    /// Drop every resolved tile, keeping the colors
    pub fn clear_cells(&mut self) {
        self.cells.fill(None);
    }

    /// Number of cells with a resolved tile
    pub fn resolved_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl TerrainGrid for AutotileMap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color_at(&self, x: i32, y: i32) -> ColorId {
        self.index(x, y)
            .map(|idx| self.colors[idx])
            .unwrap_or(WILDCARD)
    }

    fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).and_then(|idx| self.cells[idx])
    }
}

impl TerrainGridMut for AutotileMap {
    fn set_color_at(&mut self, x: i32, y: i32, color: ColorId) {
        if let Some(idx) = self.index(x, y) {
            self.colors[idx] = color;
        }
    }

    fn set_cell_at(&mut self, x: i32, y: i32, cell: Option<Cell>) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = cell;
        }
    }
}
