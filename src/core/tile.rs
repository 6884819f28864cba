//! Tile identity and records.
//!
//! Every tile on the board is a `Tile` record stored in the `Board` arena
//! and addressed by a stable `TileId` (its arena index). Tiles are created
//! in one batch during layout generation and never relocated; removal flips
//! `alive` off and the arena never compacts, so ids and cells stay valid
//! for the lifetime of the level.

use serde::{Deserialize, Serialize};

/// Stable identifier for a tile: its index into the board arena.
///
/// Ids are dense (0..tile_count) and remain valid after the tile is
/// removed, since removal is logical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Create a tile id from a raw arena index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Matching category of a tile.
///
/// Two tiles match iff their types are equal. The set of valid types is
/// `0..type_count` from the level configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileType(pub u8);

impl TileType {
    /// Create a tile type from a raw category index.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Type({})", self.0)
    }
}

/// Integer grid coordinate, local to a tile's layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Create a cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step along the x axis.
    #[must_use]
    pub const fn side(self, direction: i32) -> Self {
        Self {
            x: self.x + direction,
            y: self.y,
        }
    }
}

/// One tile on the board.
///
/// `cell` is local to the tile's layer; the layer's planar offset resolves
/// it to world space. `blocked` is derived state, recomputed by the board's
/// blocking evaluator after every structural change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Stable arena index.
    pub id: TileId,
    /// Matching category. Rewritten in place by a reshuffle.
    pub tile_type: TileType,
    /// Grid coordinate local to `layer`. Never changes.
    pub cell: Cell,
    /// Depth ordinal into the level's layer sequence (0 = base).
    pub layer: u8,
    /// False once the tile has been matched away.
    pub alive: bool,
    /// Derived: covered from above or flanked on both sides.
    pub blocked: bool,
}

impl Tile {
    /// Create a live, unblocked tile.
    #[must_use]
    pub fn new(id: TileId, tile_type: TileType, cell: Cell, layer: u8) -> Self {
        Self {
            id,
            tile_type,
            cell,
            layer,
            alive: true,
            blocked: false,
        }
    }

    /// A tile is selectable iff it is live and not blocked.
    #[must_use]
    pub fn selectable(&self) -> bool {
        self.alive && !self.blocked
    }
}
