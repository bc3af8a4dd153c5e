//! Snapshot-based undo/redo for terrain edits

use crate::AutotileMap;

/// Default number of snapshots kept on the undo stack
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Undo/redo stacks of whole-map snapshots.
///
/// Call [`TerrainHistory::record`] before each edit. Snapshots are plain
/// copies of the map, so restoring never goes through a serialization round-trip.
#[derive(Debug, Clone)]
pub struct TerrainHistory {
    undo_stack: Vec<AutotileMap>,
    redo_stack: Vec<AutotileMap>,
    limit: usize,
}

impl Default for TerrainHistory {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl TerrainHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Push the current state of `map` before it is edited
    pub fn record(&mut self, map: &AutotileMap) {
        if self.undo_stack.len() == self.limit {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(map.clone());
        self.redo_stack.clear(); // New edit invalidates redo
    }

    /// Restore the last recorded state. Returns false if there is nothing to undo.
    pub fn undo(&mut self, map: &mut AutotileMap) -> bool {
        match self.undo_stack.pop() {
            Some(snapshot) => {
                self.redo_stack.push(std::mem::replace(map, snapshot));
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone state. Returns false if there is nothing to redo.
    pub fn redo(&mut self, map: &mut AutotileMap) -> bool {
        match self.redo_stack.pop() {
            Some(snapshot) => {
                self.undo_stack.push(std::mem::replace(map, snapshot));
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
