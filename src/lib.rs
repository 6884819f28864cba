//! # tile-match-core
//!
//! A rules engine for layered tile-matching puzzles: stacked grids of
//! typed tiles, matched away in free pairs until the board is clear.
//!
//! ## Design Principles
//!
//! 1. **Engine, Not App**: No rendering, input handling, or timers. The
//!    host owns the frame loop and drains [`GameEvent`]s to drive its
//!    presentation.
//!
//! 2. **Deterministic**: All randomness flows through a seeded
//!    [`GameRng`]. Same configuration and seed, same level, same redeal,
//!    same autoplay run.
//!
//! 3. **Always Solvable**: Levels are dealt with even per-type counts,
//!    and a guard after every match redeals (or regenerates) when no
//!    matchable pair remains.
//!
//! ## Modules
//!
//! - `core`: Tile ids, cells, configuration, RNG, errors
//! - `board`: Tile arena, occlusion index, blocking rules, layout
//!   generation
//! - `engine`: Selection state machine, events, autoplay, session facade
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use tile_match_core::{LevelConfig, Session};
//!
//! let mut session = Session::new(LevelConfig::pyramid(2), 42)?;
//! assert_eq!(session.live_count(), 64 + 36);
//!
//! // Let autoplay clear the board.
//! session.set_autoplay(true);
//! for _ in 0..100_000 {
//!     if session.has_won() {
//!         break;
//!     }
//!     session.tick(Duration::from_millis(100));
//! }
//! assert!(session.has_won());
//! for event in session.drain_events() {
//!     // forward to the presentation layer
//!     let _ = event;
//! }
//! # Ok::<(), tile_match_core::ConfigError>(())
//! ```

pub mod board;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Cell, ConfigError, GameRng, LayerSpec, LevelConfig, Tile, TileId, TileType, MAX_LAYERS,
};

pub use crate::board::{generate, Board, OcclusionIndex};

pub use crate::engine::{
    AutoplayConfig, AutoplayDriver, EventQueue, GameEvent, IgnoreReason, MatchEngine,
    SelectOutcome, Session,
};
