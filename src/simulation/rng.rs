//! RNG trait abstraction for the simulation.
//!
//! The engine never talks to a concrete generator; everything random is
//! drawn through [`WorldRng`] so determinism tests control a single seed.

use glam::Vec2;

/// Random number generator trait for the simulation.
pub trait WorldRng {
    /// Generate a random f32 in `[0.0, 1.0)`.
    fn gen_f32(&mut self) -> f32;

    /// Fair coin flip.
    fn gen_bool(&mut self) -> bool;

    /// Check if a random value is less than a probability threshold.
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }
}

// Blanket implementation for any type implementing rand::Rng, which
// covers ThreadRng in drivers and seeded generators in tests.
impl<T: ?Sized + rand::Rng> WorldRng for T {
    fn gen_f32(&mut self) -> f32 {
        self.gen()
    }

    fn gen_bool(&mut self) -> bool {
        self.gen()
    }
}

/// Uniform sample in `[min, max)`. Returns `min` when the range is empty.
pub fn uniform<R: WorldRng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    min + (max - min) * rng.gen_f32()
}

/// Uniform integer in `[min, max]`.
pub fn uniform_i32<R: WorldRng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    let span = (max - min + 1) as f32;
    min + (rng.gen_f32() * span) as i32
}

/// Normal sample via the Box-Muller transform.
pub fn normal<R: WorldRng + ?Sized>(rng: &mut R, mean: f32, std_dev: f32) -> f32 {
    let u1 = 1.0 - rng.gen_f32(); // (0, 1], keeps the log finite
    let u2 = rng.gen_f32();
    let mag = (-2.0 * u1.ln()).sqrt();
    mean + std_dev * mag * (std::f32::consts::TAU * u2).cos()
}

/// Random point in a disc of the given radius, weighted towards the
/// centre (uniform radius, uniform angle). Brush-style drivers rely on
/// the centre bias for a natural spray.
pub fn point_in_disc<R: WorldRng + ?Sized>(rng: &mut R, radius: f32) -> Vec2 {
    let r = uniform(rng, 0.0, radius);
    let theta = uniform(rng, 0.0, std::f32::consts::TAU);
    Vec2::new(r * theta.cos(), r * theta.sin())
}
