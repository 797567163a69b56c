//! # Tephra - chunked falling-sand simulation core
//!
//! A 2D grid of material cells evolving under gravity, phase
//! interactions, combustion, corrosion and explosions. The crate owns
//! the grid and the update pipeline; rendering and input drive it
//! through [`World`]'s read/write surface and [`World::step`].

pub mod clock;
pub mod config;
pub mod simulation;
pub mod world;

pub use clock::FrameClock;
pub use simulation::{pixel_flags, properties, Pixel, PixelPhase, PixelProperties, PixelType, WorldRng};
pub use world::{apply_explosion, Chunk, Explosion, LoadError, World};

/// Common imports for internal use
pub mod prelude {
    pub use crate::config::{CHUNK_SIZE, NUM_CHUNKS, WORLD_SIZE};
    pub use crate::simulation::{pixel_flags, properties, Pixel, PixelPhase, PixelType, WorldRng};
    pub use crate::world::World;
    pub use glam::{IVec2, Vec2, Vec4};
}
