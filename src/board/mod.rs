//! Board state: tile arena, occlusion index, layout generation.

pub mod board;
pub mod layout;
pub mod occlusion;

pub use board::Board;
pub use layout::generate;
pub use occlusion::OcclusionIndex;
