//! Selection state machine, match execution, and the solvability guard.
//!
//! The engine is the single entry point for board mutation: player clicks
//! and autoplay picks both arrive as `select_tile` calls, processed one at
//! a time under a single-flight guard. Every mutating operation leaves the
//! board consistent (occlusion index live-only, selection live and
//! unblocked) before returning.

use serde::{Deserialize, Serialize};

use crate::board::{layout, Board};
use crate::core::{ConfigError, GameRng, LevelConfig, Tile, TileId};

use super::events::{EventQueue, GameEvent};

/// Result of one `select_tile` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    /// The tile became the current selection.
    Selected,
    /// The selected tile was clicked again and deselected.
    Deselected,
    /// A different type was clicked; the selection moved to it.
    SelectionMoved,
    /// Two tiles of one type were removed.
    Matched,
    /// The match removed the last pair; the level is won.
    Won,
    /// The event was dropped without touching any state.
    Ignored(IgnoreReason),
}

/// Why a selection event was dropped. None of these are faults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// The id was never allocated by this board.
    UnknownTile,
    /// The tile was already matched away.
    DeadTile,
    /// The tile is covered or flanked.
    Blocked,
    /// A match/reshuffle sequence was still in progress.
    InFlight,
    /// Autoplay is driving; player selections are dropped.
    AutoplayActive,
}

/// The match engine for one level.
///
/// Owns the board, the deterministic RNG, the current selection, and the
/// outbound event queue. States are `Idle` (no selection) and
/// one-selected; the level terminates when the last live tile is removed.
#[derive(Clone, Debug)]
pub struct MatchEngine {
    config: LevelConfig,
    board: Board,
    rng: GameRng,
    selected: Option<TileId>,
    in_flight: bool,
    won: bool,
    events: EventQueue,
}

impl MatchEngine {
    /// Generate a fresh level from the configuration.
    ///
    /// The configuration is validated once here; regeneration (restart,
    /// exhausted redeal) re-uses it without a failure path.
    pub fn new(config: LevelConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = GameRng::new(seed);
        let board = layout::build(&config, &mut rng);

        Ok(Self {
            config,
            board,
            rng,
            selected: None,
            in_flight: false,
            won: false,
            events: EventQueue::new(),
        })
    }

    /// Wrap a hand-built board (custom layouts, tests).
    ///
    /// The configuration still governs the redeal policy and any later
    /// regeneration, so it must be valid.
    pub fn with_board(config: LevelConfig, board: Board, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            board,
            rng: GameRng::new(seed),
            selected: None,
            in_flight: false,
            won: false,
            events: EventQueue::new(),
        })
    }

    // === Queries ===

    /// The board, for read-only inspection.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whether the tile is live and currently blocked.
    #[must_use]
    pub fn is_blocked(&self, id: TileId) -> bool {
        self.board.is_blocked(id)
    }

    /// Whether the tile is the current selection.
    #[must_use]
    pub fn is_selected(&self, id: TileId) -> bool {
        self.selected == Some(id)
    }

    /// The current selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<TileId> {
        self.selected
    }

    /// Live tiles in arena order.
    pub fn live_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.board.live_tiles()
    }

    /// All currently matchable pairs.
    #[must_use]
    pub fn matchable_pairs(&self) -> Vec<(TileId, TileId)> {
        self.board.matchable_pairs()
    }

    /// A uniformly random matchable pair, for the autoplay driver.
    pub fn random_matchable_pair(&mut self) -> Option<(TileId, TileId)> {
        let pairs = self.board.matchable_pairs();
        self.rng.choose(&pairs).copied()
    }

    /// Whether the level has been won.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.won
    }

    /// Whether a match/reshuffle sequence is in progress.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Take all pending outbound events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    // === Mutations ===

    /// Process one selection event.
    ///
    /// Dead, unknown, or blocked tiles are ignored actions, not errors;
    /// events arriving while a match sequence runs are dropped, never
    /// queued.
    pub fn select_tile(&mut self, id: TileId) -> SelectOutcome {
        if self.in_flight {
            return SelectOutcome::Ignored(IgnoreReason::InFlight);
        }

        let Some(tile) = self.board.tile(id) else {
            return SelectOutcome::Ignored(IgnoreReason::UnknownTile);
        };
        if !tile.alive {
            return SelectOutcome::Ignored(IgnoreReason::DeadTile);
        }
        if tile.blocked {
            return SelectOutcome::Ignored(IgnoreReason::Blocked);
        }
        let clicked_type = tile.tile_type;

        match self.selected {
            None => {
                self.set_selected(id);
                SelectOutcome::Selected
            }
            Some(current) if current == id => {
                self.clear_selection();
                SelectOutcome::Deselected
            }
            Some(current) => {
                let current_type = self.board.tile(current).map(|t| t.tile_type);
                if current_type == Some(clicked_type) {
                    self.resolve_match(current, id)
                } else {
                    self.clear_selection();
                    self.set_selected(id);
                    SelectOutcome::SelectionMoved
                }
            }
        }
    }

    /// Drop the current selection, if any. Safe to call from any state.
    pub fn deselect(&mut self) {
        self.clear_selection();
    }

    /// Regenerate the level: clear selection, rebuild the board from the
    /// configuration, reset the win flag.
    pub fn restart(&mut self) {
        self.clear_selection();
        self.in_flight = false;
        self.won = false;
        self.board = layout::build(&self.config, &mut self.rng);
        self.events.push(GameEvent::Regenerated);
    }

    // === Internals ===

    fn set_selected(&mut self, id: TileId) {
        self.selected = Some(id);
        self.events.push(GameEvent::SelectedChanged {
            tile: id,
            selected: true,
        });
    }

    fn clear_selection(&mut self) {
        if let Some(current) = self.selected.take() {
            self.events.push(GameEvent::SelectedChanged {
                tile: current,
                selected: false,
            });
        }
    }

    /// Remove a matched pair and run the post-removal sequence: blocking
    /// re-evaluation, win check, solvability guard. Atomic from the
    /// caller's perspective; the single-flight flag covers the whole
    /// window.
    fn resolve_match(&mut self, first: TileId, second: TileId) -> SelectOutcome {
        self.in_flight = true;

        self.clear_selection();
        for id in [first, second] {
            self.board.remove(id);
            self.events.push(GameEvent::TileRemoved { tile: id });
        }
        self.refresh_blocking();

        let outcome = if self.board.live_count() == 0 {
            self.won = true;
            self.events.push(GameEvent::Won);
            SelectOutcome::Won
        } else {
            self.ensure_solvable();
            SelectOutcome::Matched
        };

        self.in_flight = false;
        outcome
    }

    /// The solvability guard: if no matchable pair remains, redeal type
    /// labels over the surviving positions and re-verify; if the redeal
    /// is exhausted too, rebuild the level outright.
    fn ensure_solvable(&mut self) {
        if !self.config.redeal_on_dead_end || self.board.has_matchable_pair() {
            return;
        }

        self.clear_selection();
        self.board.reshuffle_types(&mut self.rng);
        self.events.push(GameEvent::Reshuffled);
        // Occlusion is position-based and unaffected by the redeal, but
        // the pass is re-run so the flags are always freshly derived.
        self.refresh_blocking();

        if !self.board.has_matchable_pair() {
            self.restart();
        }
    }

    fn refresh_blocking(&mut self) {
        for (tile, blocked) in self.board.evaluate_blocking() {
            self.events.push(GameEvent::BlockedChanged { tile, blocked });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, LayerSpec, TileType};

    /// Single-layer row of tiles with the given types.
    fn row_engine(types: &[u8]) -> MatchEngine {
        let cells: Vec<(u8, Cell, TileType)> = types
            .iter()
            .enumerate()
            .map(|(x, &ty)| (0, Cell::new(x as i32, 0), TileType::new(ty)))
            .collect();
        let board = Board::from_cells(vec![LayerSpec::new(types.len() as u32, 1)], &cells);
        let config = LevelConfig::new(vec![LayerSpec::new(2, 1)], 1).with_min_pairs(1);
        MatchEngine::with_board(config, board, 42).unwrap()
    }

    #[test]
    fn test_select_then_deselect() {
        let mut engine = row_engine(&[0, 0]);
        let a = TileId::new(0);

        assert_eq!(engine.select_tile(a), SelectOutcome::Selected);
        assert!(engine.is_selected(a));

        assert_eq!(engine.select_tile(a), SelectOutcome::Deselected);
        assert!(engine.selection().is_none());
        assert_eq!(engine.board().live_count(), 2);

        assert_eq!(
            engine.drain_events(),
            vec![
                GameEvent::SelectedChanged { tile: a, selected: true },
                GameEvent::SelectedChanged { tile: a, selected: false },
            ]
        );
    }

    #[test]
    fn test_selecting_blocked_tile_is_ignored() {
        let mut engine = row_engine(&[0, 1, 1, 0]);
        let flanked = TileId::new(1);

        assert_eq!(
            engine.select_tile(flanked),
            SelectOutcome::Ignored(IgnoreReason::Blocked)
        );
        assert!(engine.selection().is_none());
        assert!(engine.drain_events().is_empty());

        // Selection also survives a blocked click untouched.
        engine.select_tile(TileId::new(0));
        engine.select_tile(flanked);
        assert_eq!(engine.selection(), Some(TileId::new(0)));
    }

    #[test]
    fn test_unknown_and_dead_tiles_are_ignored() {
        let mut engine = row_engine(&[0, 0]);

        assert_eq!(
            engine.select_tile(TileId::new(99)),
            SelectOutcome::Ignored(IgnoreReason::UnknownTile)
        );

        engine.select_tile(TileId::new(0));
        engine.select_tile(TileId::new(1)); // match removes both

        assert_eq!(
            engine.select_tile(TileId::new(0)),
            SelectOutcome::Ignored(IgnoreReason::DeadTile)
        );
    }

    #[test]
    fn test_mismatched_types_move_selection() {
        let mut engine = row_engine(&[0, 1, 0, 1]);
        let a = TileId::new(0);
        let b = TileId::new(3);

        assert_eq!(engine.select_tile(a), SelectOutcome::Selected);
        assert_eq!(engine.select_tile(b), SelectOutcome::SelectionMoved);

        assert!(engine.is_selected(b));
        assert!(!engine.is_selected(a));
        assert_eq!(engine.board().live_count(), 4);
    }

    #[test]
    fn test_match_removes_pair_and_reevaluates() {
        let mut engine = row_engine(&[0, 1, 1, 0]);

        engine.select_tile(TileId::new(0));
        assert_eq!(engine.select_tile(TileId::new(3)), SelectOutcome::Matched);

        assert_eq!(engine.board().live_count(), 2);
        assert!(!engine.is_blocked(TileId::new(1)));
        assert!(!engine.is_blocked(TileId::new(2)));

        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::TileRemoved { tile: TileId::new(0) }));
        assert!(events.contains(&GameEvent::TileRemoved { tile: TileId::new(3) }));
        assert!(events.contains(&GameEvent::BlockedChanged {
            tile: TileId::new(1),
            blocked: false
        }));
    }

    #[test]
    fn test_last_pair_wins_once() {
        let mut engine = row_engine(&[0, 0]);

        engine.select_tile(TileId::new(0));
        assert_eq!(engine.select_tile(TileId::new(1)), SelectOutcome::Won);
        assert!(engine.has_won());

        let events = engine.drain_events();
        assert_eq!(
            events.iter().filter(|&&e| e == GameEvent::Won).count(),
            1
        );

        // Nothing more to select; no second Won can fire.
        assert_eq!(
            engine.select_tile(TileId::new(0)),
            SelectOutcome::Ignored(IgnoreReason::DeadTile)
        );
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_dead_end_reshuffles_then_pair_or_regenerates() {
        // Matching the C ends leaves [A, B, A, B] whose unblocked ends
        // cannot pair; the guard must redeal, and if the redeal is also
        // dead, rebuild the level.
        let mut engine = row_engine(&[2, 0, 1, 0, 1, 2]);

        engine.select_tile(TileId::new(0));
        assert_eq!(engine.select_tile(TileId::new(5)), SelectOutcome::Matched);

        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::Reshuffled));

        if events.contains(&GameEvent::Regenerated) {
            // Fell back to a fresh level from the config (2x1, one type).
            assert_eq!(engine.board().live_count(), 2);
        } else {
            // The redeal preserved the survivors and produced a pair.
            assert_eq!(engine.board().live_count(), 4);
            assert!(engine.board().has_matchable_pair());
        }
    }

    #[test]
    fn test_exhausted_redeal_regenerates() {
        // Two survivors of different types can never pair however the
        // labels are redealt, so the guard must regenerate.
        let layers = vec![LayerSpec::new(2, 1), LayerSpec::new(2, 1)];
        let cells = [
            (0, Cell::new(0, 0), TileType::new(0)),
            (0, Cell::new(1, 0), TileType::new(1)),
            (1, Cell::new(0, 0), TileType::new(2)),
            (1, Cell::new(1, 0), TileType::new(2)),
        ];
        let board = Board::from_cells(layers, &cells);
        let config = LevelConfig::new(vec![LayerSpec::new(2, 1)], 1).with_min_pairs(1);
        let mut engine = MatchEngine::with_board(config, board, 42).unwrap();

        // Only the covering pair is selectable.
        engine.select_tile(TileId::new(2));
        assert_eq!(engine.select_tile(TileId::new(3)), SelectOutcome::Matched);

        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::Reshuffled));
        assert!(events.contains(&GameEvent::Regenerated));
        assert_eq!(engine.board().live_count(), 2);
        assert!(engine.board().has_matchable_pair());
    }

    #[test]
    fn test_redeal_policy_can_be_disabled() {
        let layers = vec![LayerSpec::new(2, 1), LayerSpec::new(2, 1)];
        let cells = [
            (0, Cell::new(0, 0), TileType::new(0)),
            (0, Cell::new(1, 0), TileType::new(1)),
            (1, Cell::new(0, 0), TileType::new(2)),
            (1, Cell::new(1, 0), TileType::new(2)),
        ];
        let board = Board::from_cells(layers, &cells);
        let config = LevelConfig::new(vec![LayerSpec::new(2, 1)], 1)
            .with_min_pairs(1)
            .without_redeal();
        let mut engine = MatchEngine::with_board(config, board, 42).unwrap();

        engine.select_tile(TileId::new(2));
        engine.select_tile(TileId::new(3));

        let events = engine.drain_events();
        assert!(!events.contains(&GameEvent::Reshuffled));
        // Dead position is left standing when the policy is off.
        assert_eq!(engine.board().live_count(), 2);
    }

    #[test]
    fn test_restart_clears_selection_and_rebuilds() {
        let mut engine = row_engine(&[0, 1, 1, 0]);
        engine.select_tile(TileId::new(0));
        engine.drain_events();

        engine.restart();

        assert!(engine.selection().is_none());
        assert!(!engine.has_won());
        // Rebuilt from the config: a 2x1 single-type board.
        assert_eq!(engine.board().live_count(), 2);

        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::SelectedChanged {
            tile: TileId::new(0),
            selected: false
        }));
        assert!(events.contains(&GameEvent::Regenerated));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            MatchEngine::new(LevelConfig::new(vec![], 4), 1),
            Err(ConfigError::NoLayers)
        ));
    }
}
