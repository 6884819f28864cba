//! Tick-driven autoplay.
//!
//! The driver performs the same two selections a player would, paced by
//! configurable delays, and is advanced cooperatively: the host calls
//! `tick` with the elapsed time each frame. Toggling the driver off takes
//! effect at the next tick boundary; a half-entered pick is abandoned by
//! deselecting, never by completing the match.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::match_engine::MatchEngine;
use crate::core::TileId;

/// Pacing for the autoplay driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoplayConfig {
    /// Delay between selecting the first and second tile of a pair.
    pub pair_delay: Duration,
    /// Delay after a completed match before the next pick.
    pub move_delay: Duration,
    /// Delay before retrying when no pair was available.
    pub retry_delay: Duration,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            pair_delay: Duration::from_millis(500),
            move_delay: Duration::from_secs(1),
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// Where the driver is within one pick-pair-wait cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Ready to pick a pair.
    Pick,
    /// First tile selected; the second goes in when the delay elapses.
    SecondPending { tile: TileId, remaining: Duration },
    /// Waiting out a delay before the next pick.
    Cooldown { remaining: Duration },
}

/// Drives the engine toward a win, one pair per cycle.
#[derive(Clone, Debug)]
pub struct AutoplayDriver {
    config: AutoplayConfig,
    active: bool,
    phase: Phase,
}

impl AutoplayDriver {
    /// Create an inactive driver with the given pacing.
    #[must_use]
    pub fn new(config: AutoplayConfig) -> Self {
        Self {
            config,
            active: false,
            phase: Phase::Pick,
        }
    }

    /// Whether the driver is currently running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Turn the driver on or off.
    ///
    /// Turning it off mid-cycle abandons any half-entered pick by
    /// deselecting; the pending match never completes.
    pub fn set_active(&mut self, engine: &mut MatchEngine, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        self.phase = Phase::Pick;
        if !active {
            engine.deselect();
        }
    }

    /// Advance the driver by `dt` of elapsed time.
    ///
    /// At most one selection is issued per tick. The driver deactivates
    /// itself when the level is won or the board is empty.
    pub fn tick(&mut self, engine: &mut MatchEngine, dt: Duration) {
        if !self.active {
            return;
        }
        if engine.has_won() || engine.board().live_count() == 0 {
            self.set_active(engine, false);
            return;
        }

        match self.phase {
            Phase::Pick => {
                // A match sequence from the previous selection may still
                // be settling; wait for the next tick.
                if engine.is_in_flight() {
                    return;
                }
                match engine.random_matchable_pair() {
                    Some((first, second)) => {
                        engine.select_tile(first);
                        self.phase = Phase::SecondPending {
                            tile: second,
                            remaining: self.config.pair_delay,
                        };
                    }
                    None => {
                        // The dead-end guard runs on match resolution, so
                        // this only happens transiently; back off and
                        // retry.
                        self.phase = Phase::Cooldown {
                            remaining: self.config.retry_delay,
                        };
                    }
                }
            }
            Phase::SecondPending { tile, remaining } => {
                match remaining.checked_sub(dt) {
                    Some(left) if !left.is_zero() => {
                        self.phase = Phase::SecondPending { tile, remaining: left };
                    }
                    _ => {
                        engine.select_tile(tile);
                        // Stop on the winning selection itself, not on
                        // the next tick.
                        if engine.has_won() {
                            self.set_active(engine, false);
                            return;
                        }
                        self.phase = Phase::Cooldown {
                            remaining: self.config.move_delay,
                        };
                    }
                }
            }
            Phase::Cooldown { remaining } => match remaining.checked_sub(dt) {
                Some(left) if !left.is_zero() => {
                    self.phase = Phase::Cooldown { remaining: left };
                }
                _ => {
                    self.phase = Phase::Pick;
                }
            },
        }
    }
}
