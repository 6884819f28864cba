//! Gameplay: selection state machine, events, autoplay, session facade.

pub mod autoplay;
pub mod events;
pub mod match_engine;
pub mod session;

pub use autoplay::{AutoplayConfig, AutoplayDriver};
pub use events::{EventQueue, GameEvent};
pub use match_engine::{IgnoreReason, MatchEngine, SelectOutcome};
pub use session::Session;
