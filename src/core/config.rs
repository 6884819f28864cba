//! Level configuration types.
//!
//! A level is described entirely in memory: an ordered sequence of
//! `LayerSpec`s (base layer first), the size of the tile-type catalogue,
//! the minimum-pairs-per-type dealing policy, and the dead-end redeal
//! policy flag. There is no external persisted schema.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::tile::Cell;

/// Largest supported layer count: depth ordinals are stored as `u8`.
pub const MAX_LAYERS: usize = 256;

/// One horizontal slice of the board.
///
/// `offset` is the layer's planar offset in tile units, where one tile
/// footprint is 1.0 x 1.0 world units. The layer's depth ordinal is its
/// index in `LevelConfig::layers`; higher layers rest on top of lower ones.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    /// Cells along the x axis.
    pub width: u32,
    /// Cells along the y axis.
    pub height: u32,
    /// Planar offset in tile units, applied when resolving world footprints.
    pub offset: (f32, f32),
}

impl LayerSpec {
    /// Create a layer with no planar offset.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            offset: (0.0, 0.0),
        }
    }

    /// Set the planar offset (builder pattern).
    #[must_use]
    pub const fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = (x, y);
        self
    }

    /// Number of cells in this layer.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// World-space centre of a local cell, with the planar offset applied.
    #[must_use]
    pub fn world_center(&self, cell: Cell) -> (f32, f32) {
        (
            self.offset.0 + cell.x as f32,
            self.offset.1 + cell.y as f32,
        )
    }
}

/// Complete level configuration.
///
/// ```
/// use tile_match_core::core::{LayerSpec, LevelConfig};
///
/// let config = LevelConfig::new(vec![LayerSpec::new(4, 4)], 4).with_min_pairs(2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Layer shapes, base layer first.
    pub layers: Vec<LayerSpec>,
    /// Size of the tile-type catalogue; valid types are `0..type_count`.
    pub type_count: u8,
    /// Minimum pairs dealt per type (subject to board size, see `validate`).
    pub min_pairs_per_type: u32,
    /// Redeal type labels when no matchable pair remains (solvability guard).
    pub redeal_on_dead_end: bool,
}

impl LevelConfig {
    /// Create a configuration with the default dealing policy
    /// (at least one pair per type, dead-end redeal enabled).
    #[must_use]
    pub fn new(layers: Vec<LayerSpec>, type_count: u8) -> Self {
        Self {
            layers,
            type_count,
            min_pairs_per_type: 1,
            redeal_on_dead_end: true,
        }
    }

    /// Set the minimum pairs dealt per type (builder pattern).
    #[must_use]
    pub fn with_min_pairs(mut self, min_pairs: u32) -> Self {
        self.min_pairs_per_type = min_pairs;
        self
    }

    /// Disable the dead-end redeal policy (builder pattern).
    #[must_use]
    pub fn without_redeal(mut self) -> Self {
        self.redeal_on_dead_end = false;
        self
    }

    /// The classic pyramid shape: layer `i` is an `(8 - 2i) x (8 - 2i)`
    /// grid offset by `(i, i)` tile units, so each layer is centred over
    /// the one below and covers its inner cells exactly.
    ///
    /// Ten tile types, at least two pairs per type.
    #[must_use]
    pub fn pyramid(levels: u8) -> Self {
        assert!(
            (1..=3).contains(&levels),
            "Pyramid supports 1-3 levels"
        );

        let layers = (0..levels)
            .map(|i| {
                let size = 8 - 2 * u32::from(i);
                LayerSpec::new(size, size).with_offset(f32::from(i), f32::from(i))
            })
            .collect();

        Self::new(layers, 10).with_min_pairs(2)
    }

    /// Raw cell count across all layers, before odd-count adjustment.
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.layers.iter().map(LayerSpec::cell_count).sum()
    }

    /// Number of pairs the generator will deal (odd totals drop one cell).
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.total_cells() / 2
    }

    /// Check the configuration is generable.
    ///
    /// Fails on zero layers, more than [`MAX_LAYERS`] layers, an empty
    /// type catalogue, or a minimum-pairs policy the board is too small
    /// to honour. Generation never starts
    /// from an invalid configuration, so no partial board can escape.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layers.is_empty() {
            return Err(ConfigError::NoLayers);
        }
        // Depth ordinals are u8.
        if self.layers.len() > MAX_LAYERS {
            return Err(ConfigError::TooManyLayers {
                count: self.layers.len(),
                max: MAX_LAYERS,
            });
        }
        if self.type_count == 0 {
            return Err(ConfigError::NoTileTypes);
        }

        let available = self.pair_count();
        let required = self.min_pairs_per_type as usize * self.type_count as usize;
        if required > available {
            return Err(ConfigError::MinPairsUnsatisfiable {
                required,
                available,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_cell_count() {
        assert_eq!(LayerSpec::new(8, 8).cell_count(), 64);
        assert_eq!(LayerSpec::new(3, 2).cell_count(), 6);
        assert_eq!(LayerSpec::new(0, 5).cell_count(), 0);
    }

    #[test]
    fn test_world_center_applies_offset() {
        let layer = LayerSpec::new(4, 4).with_offset(1.0, 0.5);
        assert_eq!(layer.world_center(Cell::new(2, 3)), (3.0, 3.5));
    }

    #[test]
    fn test_pyramid_shape() {
        let config = LevelConfig::pyramid(3);

        assert_eq!(config.layers.len(), 3);
        assert_eq!(config.layers[0].width, 8);
        assert_eq!(config.layers[1].width, 6);
        assert_eq!(config.layers[2].width, 4);
        assert_eq!(config.layers[2].offset, (2.0, 2.0));
        assert_eq!(config.total_cells(), 64 + 36 + 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[should_panic(expected = "Pyramid supports 1-3 levels")]
    fn test_pyramid_rejects_too_many_levels() {
        LevelConfig::pyramid(4);
    }

    #[test]
    fn test_validate_no_layers() {
        let config = LevelConfig::new(vec![], 10);
        assert_eq!(config.validate(), Err(ConfigError::NoLayers));
    }

    #[test]
    fn test_validate_too_many_layers() {
        let layers = vec![LayerSpec::new(1, 1); MAX_LAYERS + 1];
        let config = LevelConfig::new(layers, 2);
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyLayers {
                count: MAX_LAYERS + 1,
                max: MAX_LAYERS,
            })
        );

        // The boundary itself is fine.
        let config = LevelConfig::new(vec![LayerSpec::new(1, 1); MAX_LAYERS], 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_no_types() {
        let config = LevelConfig::new(vec![LayerSpec::new(4, 4)], 0);
        assert_eq!(config.validate(), Err(ConfigError::NoTileTypes));
    }

    #[test]
    fn test_validate_min_pairs_too_large() {
        // 4x4 board has 8 pairs; 4 types x 3 pairs = 12 required.
        let config = LevelConfig::new(vec![LayerSpec::new(4, 4)], 4).with_min_pairs(3);
        assert_eq!(
            config.validate(),
            Err(ConfigError::MinPairsUnsatisfiable {
                required: 12,
                available: 8,
            })
        );
    }

    #[test]
    fn test_pair_count_drops_odd_cell() {
        let config = LevelConfig::new(vec![LayerSpec::new(3, 3)], 2);
        assert_eq!(config.total_cells(), 9);
        assert_eq!(config.pair_count(), 4);
    }

    #[test]
    fn test_serialization() {
        let config = LevelConfig::pyramid(2);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: LevelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
