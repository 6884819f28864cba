//! The board: tile arena, occlusion index, and blocking evaluation.
//!
//! The arena is the single source of truth; the occlusion index is derived
//! from it and rebuilt or maintained in lockstep. Tiles never move after
//! generation, so arena indices double as stable tile ids.

use smallvec::SmallVec;
use serde::{Deserialize, Serialize};

use crate::core::{Cell, GameRng, LayerSpec, Tile, TileId, TileType};

use super::occlusion::{footprints_overlap, OcclusionIndex};

/// Board state for one level.
///
/// Owns every tile exclusively. Removal is logical: the tile's `alive`
/// flag drops and it leaves the occlusion index, but its record stays in
/// the arena so other tiles' cells and ids remain stable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
    index: OcclusionIndex,
    layers: Vec<LayerSpec>,
    live_count: usize,
}

impl Board {
    /// Build a board from explicit `(layer, cell, type)` triples.
    ///
    /// Tiles get arena ids in input order and the occlusion index and
    /// blocking flags are fully evaluated before returning. Used by the
    /// generator and by hand-authored layouts.
    ///
    /// Panics if a layer ordinal is out of range or a (layer, cell) pair
    /// repeats; both are construction bugs, not runtime conditions.
    #[must_use]
    pub fn from_cells(layers: Vec<LayerSpec>, cells: &[(u8, Cell, TileType)]) -> Self {
        let mut tiles = Vec::with_capacity(cells.len());
        let mut index = OcclusionIndex::new();

        for (i, &(layer, cell, tile_type)) in cells.iter().enumerate() {
            assert!(
                (layer as usize) < layers.len(),
                "layer {} out of range ({} layers)",
                layer,
                layers.len()
            );
            let id = TileId::new(i as u32);
            index.insert(layer, cell, id);
            tiles.push(Tile::new(id, tile_type, cell, layer));
        }

        let live_count = tiles.len();
        let mut board = Self {
            tiles,
            index,
            layers,
            live_count,
        };
        board.evaluate_blocking();
        board
    }

    /// Layer shapes for this board, base layer first.
    #[must_use]
    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// Look up a tile by id. `None` for ids this board never allocated.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// Whether the tile exists and is live.
    #[must_use]
    pub fn is_live(&self, id: TileId) -> bool {
        self.tile(id).is_some_and(|t| t.alive)
    }

    /// Whether the tile is live and currently blocked.
    #[must_use]
    pub fn is_blocked(&self, id: TileId) -> bool {
        self.tile(id).is_some_and(|t| t.alive && t.blocked)
    }

    /// Number of live tiles.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// Iterate over live tiles in arena order.
    pub fn live_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|t| t.alive)
    }

    /// The live tile occupying a cell, if any.
    #[must_use]
    pub fn tile_at(&self, layer: u8, cell: Cell) -> Option<TileId> {
        self.index.get(layer, cell)
    }

    // === Removal ===

    /// Logically remove a tile: drop `alive` and leave the occlusion index.
    ///
    /// Returns false if the tile is unknown or already dead. The caller is
    /// responsible for re-running `evaluate_blocking` afterwards.
    pub fn remove(&mut self, id: TileId) -> bool {
        let Some(tile) = self.tiles.get_mut(id.index()) else {
            return false;
        };
        if !tile.alive {
            return false;
        }

        tile.alive = false;
        let (layer, cell) = (tile.layer, tile.cell);
        self.index.remove(layer, cell);
        self.live_count -= 1;
        true
    }

    // === Occlusion ===

    /// Live higher-layer tiles whose world footprints overlap this tile's.
    ///
    /// Candidate cells per higher layer are bounded by the 1-tile overlap
    /// radius, so this is O(layers_above) with a small constant.
    #[must_use]
    pub fn tiles_above(&self, id: TileId) -> SmallVec<[TileId; 4]> {
        let mut above = SmallVec::new();
        let Some(tile) = self.tile(id) else {
            return above;
        };

        let center = self.layers[tile.layer as usize].world_center(tile.cell);
        for (layer_idx, layer) in self.layers.iter().enumerate().skip(tile.layer as usize + 1) {
            // Local coordinates in the higher layer that could overlap.
            let local_x = center.0 - layer.offset.0;
            let local_y = center.1 - layer.offset.1;

            for x in (local_x - 1.0).floor() as i32..=(local_x + 1.0).ceil() as i32 {
                for y in (local_y - 1.0).floor() as i32..=(local_y + 1.0).ceil() as i32 {
                    let cell = Cell::new(x, y);
                    if let Some(other) = self.index.get(layer_idx as u8, cell) {
                        if footprints_overlap(center, layer.world_center(cell)) {
                            above.push(other);
                        }
                    }
                }
            }
        }
        above
    }

    fn covered_from_above(&self, id: TileId) -> bool {
        !self.tiles_above(id).is_empty()
    }

    fn flanked(&self, tile: &Tile) -> bool {
        self.index.occupied(tile.layer, tile.cell.side(-1))
            && self.index.occupied(tile.layer, tile.cell.side(1))
    }

    /// Recompute every live tile's blocked flag from scratch.
    ///
    /// Runs after generation, after every removal, and after every
    /// reshuffle. Never incremental: the full pass keeps the invariant
    /// auditable and is cheap at puzzle scale.
    ///
    /// Returns the tiles whose flag changed, for outbound notifications.
    pub fn evaluate_blocking(&mut self) -> Vec<(TileId, bool)> {
        let mut changes = Vec::new();

        for i in 0..self.tiles.len() {
            let tile = self.tiles[i];
            if !tile.alive {
                continue;
            }
            let blocked = self.covered_from_above(tile.id) || self.flanked(&tile);
            if blocked != tile.blocked {
                self.tiles[i].blocked = blocked;
                changes.push((tile.id, blocked));
            }
        }
        changes
    }

    // === Matching queries ===

    /// Live, unblocked tile ids in arena order.
    #[must_use]
    pub fn unblocked_live(&self) -> Vec<TileId> {
        self.live_tiles()
            .filter(|t| !t.blocked)
            .map(|t| t.id)
            .collect()
    }

    /// All matchable pairs: live, unblocked tiles sharing a type.
    ///
    /// Brute force over the unblocked subset; k is small.
    #[must_use]
    pub fn matchable_pairs(&self) -> Vec<(TileId, TileId)> {
        let open = self.unblocked_live();
        let mut pairs = Vec::new();

        for i in 0..open.len() {
            for j in i + 1..open.len() {
                if self.tiles[open[i].index()].tile_type == self.tiles[open[j].index()].tile_type {
                    pairs.push((open[i], open[j]));
                }
            }
        }
        pairs
    }

    /// Whether at least one matchable pair exists (early-exit variant).
    #[must_use]
    pub fn has_matchable_pair(&self) -> bool {
        let open = self.unblocked_live();

        for i in 0..open.len() {
            for j in i + 1..open.len() {
                if self.tiles[open[i].index()].tile_type == self.tiles[open[j].index()].tile_type {
                    return true;
                }
            }
        }
        false
    }

    // === Reshuffle ===

    /// Redeal type labels over the surviving tiles' existing positions.
    ///
    /// Collects the live tiles' types, Fisher-Yates permutes them, and
    /// writes them back in place. Positions, liveness, and the occlusion
    /// index are untouched, so the pairing invariant and live count are
    /// preserved exactly.
    pub fn reshuffle_types(&mut self, rng: &mut GameRng) {
        let live_ids: Vec<TileId> = self.live_tiles().map(|t| t.id).collect();
        let mut types: Vec<TileType> = live_ids
            .iter()
            .map(|id| self.tiles[id.index()].tile_type)
            .collect();

        rng.fisher_yates(&mut types);

        for (id, tile_type) in live_ids.into_iter().zip(types) {
            self.tiles[id.index()].tile_type = tile_type;
        }
    }
}
