//! Core data structures for wang_terrain
//!
//! This crate provides the plain data the autotiling engine operates on:
//! - `Cell` - A placed tile reference with its three flip flags
//! - `TerrainGrid` / `TerrainGridMut` - The grid contract the engine consumes
//! - `AutotileMap` - A contiguous painted-color + resolved-tile grid
//! - `TerrainHistory` - Snapshot-based undo/redo

mod cell;
mod grid;
mod history;

pub use cell::{Cell, ColorId, WILDCARD};
pub use grid::{AutotileMap, TerrainGrid, TerrainGridMut};
pub use history::{TerrainHistory, DEFAULT_HISTORY_LIMIT};

use thiserror::Error;

/// Errors raised by map operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("Color plane has {actual} entries, map expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}
