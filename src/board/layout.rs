//! Layout generation: cell enumeration and type dealing.
//!
//! The generator enumerates one cell per grid position across all layers
//! (base layer first, row-major within a layer), deals a type list whose
//! every type count is even, permutes it uniformly, and assigns it to the
//! cells in order.

use crate::core::{Cell, ConfigError, GameRng, LevelConfig, TileType};

use super::board::Board;

/// Generate a board from a validated-or-not configuration.
///
/// Validates first; nothing is built from a bad configuration, so the
/// caller's previous state is never disturbed by a failure.
pub fn generate(config: &LevelConfig, rng: &mut GameRng) -> Result<Board, ConfigError> {
    config.validate()?;
    Ok(build(config, rng))
}

/// Build a board from a configuration already known to be valid.
///
/// `MatchEngine::new` validates once up front; regeneration re-uses this
/// without a failure path.
pub(crate) fn build(config: &LevelConfig, rng: &mut GameRng) -> Board {
    let mut cells = enumerate_cells(config);

    // An odd cell count can never pair up fully; drop the last cell.
    if cells.len() % 2 != 0 {
        cells.pop();
    }

    let types = deal_types(cells.len(), config, rng);

    let placed: Vec<(u8, Cell, TileType)> = cells
        .into_iter()
        .zip(types)
        .map(|((layer, cell), ty)| (layer, cell, ty))
        .collect();

    Board::from_cells(config.layers.clone(), &placed)
}

/// One (layer, cell) per grid position, layer-ascending then row-major.
fn enumerate_cells(config: &LevelConfig) -> Vec<(u8, Cell)> {
    let mut cells = Vec::with_capacity(config.total_cells());

    for (layer_idx, layer) in config.layers.iter().enumerate() {
        for y in 0..layer.height as i32 {
            for x in 0..layer.width as i32 {
                cells.push((layer_idx as u8, Cell::new(x, y)));
            }
        }
    }
    cells
}

/// Deal `count` type labels (count is even) with every type's count even.
///
/// Each type gets `max(min_pairs_per_type, ceil(pairs / type_count))`
/// pairs round-robin; any remaining pairs are filled with randomly chosen
/// types, always added two at a time so no singleton can appear. The
/// result is then permuted uniformly.
fn deal_types(count: usize, config: &LevelConfig, rng: &mut GameRng) -> Vec<TileType> {
    debug_assert!(count % 2 == 0, "cell count must be even before dealing");

    let pairs = count / 2;
    let type_count = config.type_count as usize;
    let target = (config.min_pairs_per_type as usize).max(pairs.div_ceil(type_count));

    let mut types = Vec::with_capacity(count);

    'fill: for _ in 0..target {
        for ty in 0..type_count {
            if types.len() >= count {
                break 'fill;
            }
            let ty = TileType::new(ty as u8);
            types.push(ty);
            types.push(ty);
        }
    }

    while types.len() < count {
        let ty = TileType::new(rng.gen_range_usize(0..type_count) as u8);
        types.push(ty);
        types.push(ty);
    }

    types.truncate(count);
    rng.fisher_yates(&mut types);
    types
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LayerSpec;
    use rustc_hash::FxHashMap;

    fn type_counts(board: &Board) -> FxHashMap<TileType, usize> {
        let mut counts = FxHashMap::default();
        for tile in board.live_tiles() {
            *counts.entry(tile.tile_type).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_generate_rejects_bad_config() {
        let mut rng = GameRng::new(1);
        assert!(matches!(
            generate(&LevelConfig::new(vec![], 4), &mut rng),
            Err(ConfigError::NoLayers)
        ));
        assert!(matches!(
            generate(&LevelConfig::new(vec![LayerSpec::new(2, 2)], 0), &mut rng),
            Err(ConfigError::NoTileTypes)
        ));
    }

    #[test]
    fn test_one_tile_per_cell() {
        let mut rng = GameRng::new(42);
        let board = generate(&LevelConfig::pyramid(3), &mut rng).unwrap();

        assert_eq!(board.live_count(), 64 + 36 + 16);
        // Every enumerated cell is occupied.
        for (layer_idx, layer) in board.layers().iter().enumerate() {
            for y in 0..layer.height as i32 {
                for x in 0..layer.width as i32 {
                    assert!(board.tile_at(layer_idx as u8, Cell::new(x, y)).is_some());
                }
            }
        }
    }

    #[test]
    fn test_odd_total_drops_last_cell() {
        let config = LevelConfig::new(vec![LayerSpec::new(3, 3)], 2);
        let mut rng = GameRng::new(42);
        let board = generate(&config, &mut rng).unwrap();

        assert_eq!(board.live_count(), 8);
        // Last row-major cell of the only layer was dropped.
        assert!(board.tile_at(0, Cell::new(2, 2)).is_none());
    }

    #[test]
    fn test_every_type_count_even() {
        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            let board = generate(&LevelConfig::pyramid(2), &mut rng).unwrap();
            for (ty, n) in type_counts(&board) {
                assert!(n % 2 == 0, "type {ty} dealt an odd count {n}");
            }
        }
    }

    #[test]
    fn test_min_pairs_policy_honoured() {
        // 6x6 = 18 pairs across 4 types, 3 pairs minimum each.
        let config = LevelConfig::new(vec![LayerSpec::new(6, 6)], 4).with_min_pairs(3);
        let mut rng = GameRng::new(42);
        let board = generate(&config, &mut rng).unwrap();

        let counts = type_counts(&board);
        for ty in 0..4 {
            let n = counts.get(&TileType::new(ty)).copied().unwrap_or(0);
            assert!(n >= 6, "type {ty} has {n} tiles, expected at least 6");
        }
    }

    #[test]
    fn test_only_configured_types_dealt() {
        let config = LevelConfig::new(vec![LayerSpec::new(4, 4)], 3);
        let mut rng = GameRng::new(9);
        let board = generate(&config, &mut rng).unwrap();

        assert!(board.live_tiles().all(|t| t.tile_type.0 < 3));
    }

    #[test]
    fn test_same_seed_same_board() {
        let config = LevelConfig::pyramid(2);
        let mut rng1 = GameRng::new(1234);
        let mut rng2 = GameRng::new(1234);

        let a = generate(&config, &mut rng1).unwrap();
        let b = generate(&config, &mut rng2).unwrap();

        let types_a: Vec<_> = a.live_tiles().map(|t| t.tile_type).collect();
        let types_b: Vec<_> = b.live_tiles().map(|t| t.tile_type).collect();
        assert_eq!(types_a, types_b);
    }
}
