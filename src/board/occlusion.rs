//! Spatial index from (layer, cell) to live tiles.
//!
//! The index is the board's occlusion lookup: O(1) answers to "is this
//! cell occupied by a live tile?". It only ever contains live tiles;
//! removal takes a tile out immediately, while the tile record itself
//! stays in the arena.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Cell, TileId};

/// Index from `(layer, cell)` to the live tile occupying it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OcclusionIndex {
    cells: FxHashMap<(u8, Cell), TileId>,
}

impl OcclusionIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a live tile at a cell.
    ///
    /// Panics if the cell is already occupied: live tiles are unique per
    /// (layer, cell) by construction, so a collision is a logic bug.
    pub fn insert(&mut self, layer: u8, cell: Cell, tile: TileId) {
        if let Some(existing) = self.cells.insert((layer, cell), tile) {
            panic!(
                "cell ({}, {}) on layer {} already holds {:?}",
                cell.x, cell.y, layer, existing
            );
        }
    }

    /// Remove the tile at a cell. Returns it if one was present.
    pub fn remove(&mut self, layer: u8, cell: Cell) -> Option<TileId> {
        self.cells.remove(&(layer, cell))
    }

    /// Get the live tile at a cell, if any.
    #[must_use]
    pub fn get(&self, layer: u8, cell: Cell) -> Option<TileId> {
        self.cells.get(&(layer, cell)).copied()
    }

    /// Whether a live tile occupies the cell.
    #[must_use]
    pub fn occupied(&self, layer: u8, cell: Cell) -> bool {
        self.cells.contains_key(&(layer, cell))
    }

    /// Number of live tiles in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the index holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Whether two tile footprints overlap in world space.
///
/// Tiles are 1.0 x 1.0 in world units; any partial overlap counts as full
/// occlusion. The centres must differ by at least a full tile extent on
/// some axis to be clear of each other.
#[must_use]
pub fn footprints_overlap(a: (f32, f32), b: (f32, f32)) -> bool {
    (a.0 - b.0).abs() < 1.0 && (a.1 - b.1).abs() < 1.0
}
