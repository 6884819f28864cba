//! Configuration errors.
//!
//! Only level generation can fail; everything else in the core is total.
//! Invalid or ignored selections are reported as typed outcomes on the
//! match engine, not as errors.

use thiserror::Error;

/// A level configuration the generator refuses to build from.
///
/// Generation validates before touching any state, so the engine keeps its
/// previous valid board when construction fails.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The layer sequence is empty.
    #[error("level has no layers")]
    NoLayers,

    /// More layers than the u8 depth ordinal can address.
    #[error("level has {count} layers, more than the {max} supported")]
    TooManyLayers {
        /// Layers in the configuration.
        count: usize,
        /// Largest supported layer count.
        max: usize,
    },

    /// The tile-type catalogue is empty.
    #[error("tile type catalogue is empty")]
    NoTileTypes,

    /// The minimum-pairs-per-type policy does not fit the board:
    /// `required` pairs demanded, only `available` slots of pairs exist.
    #[error("minimum-pairs policy needs {required} pairs but the board holds {available}")]
    MinPairsUnsatisfiable {
        /// Pairs demanded by `min_pairs_per_type x type_count`.
        required: usize,
        /// Pairs the board can hold.
        available: usize,
    },
}
