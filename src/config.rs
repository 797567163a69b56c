//! Compile-time simulation parameters.

use glam::Vec2;

/// Cells per world side (the world is square).
pub const WORLD_SIZE: usize = 256;

/// Cells per chunk side.
pub const CHUNK_SIZE: usize = 16;

/// Chunks per world side.
pub const NUM_CHUNKS: usize = WORLD_SIZE / CHUNK_SIZE;

const _: () = assert!(WORLD_SIZE % CHUNK_SIZE == 0);

/// Seconds simulated by one call to `World::step`.
pub const TIME_STEP: f32 = 1.0 / 60.0;

/// Cells per second squared, +y is down.
pub const GRAVITY: Vec2 = Vec2::new(0.0, 9.81);

/// Scale factor for consumers mapping the grid onto physical space.
pub const PIXELS_PER_METER: f32 = 16.0;
