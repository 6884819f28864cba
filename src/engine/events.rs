//! Outbound notifications to the host.
//!
//! The core never holds a reference to anything in the presentation layer.
//! Side effects the host must render (highlight a tile, dim it, remove it,
//! play the win signal) are queued as `GameEvent`s carrying opaque tile
//! ids, and the host drains the queue after each call into the engine.

use serde::{Deserialize, Serialize};

use crate::core::TileId;

/// One notification from the core to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A tile's blocked flag changed; dim or undim it.
    BlockedChanged { tile: TileId, blocked: bool },
    /// A tile's selection highlight changed.
    SelectedChanged { tile: TileId, selected: bool },
    /// A tile was matched away.
    TileRemoved { tile: TileId },
    /// The last pair was removed. Fires exactly once per level.
    Won,
    /// Type labels were redealt over the surviving positions; re-skin
    /// live tiles from the query surface.
    Reshuffled,
    /// The whole level was rebuilt; resync everything from the query
    /// surface.
    Regenerated,
}

/// FIFO queue of pending notifications.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events, oldest first, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending events without draining them.
    #[must_use]
    pub fn pending(&self) -> &[GameEvent] {
        &self.events
    }

    /// Whether any events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
