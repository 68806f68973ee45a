#![warn(clippy::all, clippy::pedantic)]

// Game board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Every shape spawns with its root here, whatever its footprint
pub const SPAWN_POSITION: (i32, i32) = (5, 0);

// Game timing
pub const GRAVITY_PERIOD_MS: u64 = 500;
pub const SOFT_DROP_PERIOD_MS: u64 = 50;
pub const FRAME_PERIOD_MS: u64 = 33; // ~30 FPS

// Terminal columns per board cell, so cells look roughly square
pub const CELL_WIDTH: u16 = 2;
pub const MAX_CELL_WIDTH: u16 = 8;
