use crate::common::Tile;

pub const DEFAULT_BOARD_SIZE: usize = 4;
pub const INITIAL_TILES: usize = 2;
/// Chance that a spawned tile is a 2 rather than a 4.
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;
pub const SPAWN_LOW: Tile = 2;
pub const SPAWN_HIGH: Tile = 4;
