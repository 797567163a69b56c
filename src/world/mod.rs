//! The world - cell storage, chunk scheduling, update pipeline.

mod chunk;
mod update;
#[allow(clippy::module_inception)]
mod world;
pub mod explosion;
pub mod persistence;

pub use chunk::{Chunk, ChunkGrid};
pub use explosion::{apply_explosion, Explosion};
pub use persistence::LoadError;
pub use world::World;
