//! The session facade: one level, one engine, one autoplay driver.
//!
//! Hosts embed a `Session` and speak to it exclusively: player input goes
//! through `select_tile`, the frame loop calls `tick`, and rendering
//! state comes from the query surface plus the drained events. While
//! autoplay runs, player selections are dropped so the driver's
//! two-selection cycle cannot be torn.

use std::time::Duration;

use crate::core::{ConfigError, LevelConfig, Tile, TileId};

use super::autoplay::{AutoplayConfig, AutoplayDriver};
use super::events::GameEvent;
use super::match_engine::{IgnoreReason, MatchEngine, SelectOutcome};

/// One playable level with optional autoplay.
#[derive(Clone, Debug)]
pub struct Session {
    engine: MatchEngine,
    autoplay: AutoplayDriver,
}

impl Session {
    /// Generate a level with default autoplay pacing.
    pub fn new(config: LevelConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_autoplay(config, seed, AutoplayConfig::default())
    }

    /// Generate a level with custom autoplay pacing.
    pub fn with_autoplay(
        config: LevelConfig,
        seed: u64,
        autoplay: AutoplayConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: MatchEngine::new(config, seed)?,
            autoplay: AutoplayDriver::new(autoplay),
        })
    }

    /// Process a player selection.
    ///
    /// Dropped while autoplay is running.
    pub fn select_tile(&mut self, id: TileId) -> SelectOutcome {
        if self.autoplay.is_active() {
            return SelectOutcome::Ignored(IgnoreReason::AutoplayActive);
        }
        self.engine.select_tile(id)
    }

    /// Abandon the current level and generate a fresh one.
    ///
    /// Stops autoplay first; the old level's pending pick never lands on
    /// the new board.
    pub fn restart(&mut self) {
        self.autoplay.set_active(&mut self.engine, false);
        self.engine.restart();
    }

    /// Turn autoplay on or off.
    pub fn set_autoplay(&mut self, active: bool) {
        self.autoplay.set_active(&mut self.engine, active);
    }

    /// Whether autoplay is currently running.
    #[must_use]
    pub fn autoplay_active(&self) -> bool {
        self.autoplay.is_active()
    }

    /// Advance autoplay by `dt` of elapsed time. Inert when autoplay is
    /// off.
    pub fn tick(&mut self, dt: Duration) {
        self.autoplay.tick(&mut self.engine, dt);
    }

    // === Query surface ===

    /// Whether the tile is live and currently blocked.
    #[must_use]
    pub fn is_blocked(&self, id: TileId) -> bool {
        self.engine.is_blocked(id)
    }

    /// Whether the tile is the current selection.
    #[must_use]
    pub fn is_selected(&self, id: TileId) -> bool {
        self.engine.is_selected(id)
    }

    /// The current selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<TileId> {
        self.engine.selection()
    }

    /// Live tiles in arena order.
    pub fn live_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.engine.live_tiles()
    }

    /// Number of live tiles.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.engine.board().live_count()
    }

    /// All currently matchable pairs.
    #[must_use]
    pub fn matchable_pairs(&self) -> Vec<(TileId, TileId)> {
        self.engine.matchable_pairs()
    }

    /// Whether the level has been won.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.engine.has_won()
    }

    /// Take all pending outbound events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.engine.drain_events()
    }

    /// The underlying engine, for read-only inspection.
    #[must_use]
    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }
}
