//! Core types: tile identity, configuration, RNG, and errors.

pub mod config;
pub mod error;
pub mod rng;
pub mod tile;

pub use config::{LayerSpec, LevelConfig, MAX_LAYERS};
pub use error::ConfigError;
pub use rng::GameRng;
pub use tile::{Cell, Tile, TileId, TileType};
