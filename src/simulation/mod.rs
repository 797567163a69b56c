//! Simulation building blocks - materials, pixels, randomness.

mod materials;
mod pixel;
pub mod rng;

pub use materials::{properties, PixelPhase, PixelProperties, PixelType};
pub use pixel::{pixel_flags, Pixel};
pub use rng::WorldRng;
