//! Localized destruction: ray-cast explosions with a scorch fringe.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::world::World;
use crate::simulation::rng::{normal, uniform};
use crate::simulation::{PixelPhase, PixelType, Pixel, WorldRng};

/// Fraction of destroyed cells that turn into embers instead of air.
const EMBER_CHANCE: f32 = 0.05;

/// Color multiplier applied to solid cells inside the scorch band.
const SCORCH_DARKEN: f32 = 0.8;

/// Parameters of an explosion.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Explosion {
    /// Radii between which each ray picks its destruction distance.
    pub min_radius: f32,
    pub max_radius: f32,
    /// Standard deviation, in cells, of the scorch band past the
    /// destroyed region.
    pub scorch: f32,
}

/// Walk one ray outward from `start` towards `end`.
///
/// Destruction runs to a per-ray blast distance; titanium stops the
/// ray dead. Past the blast distance, solids in the scorch band are
/// darkened but left in place.
fn explosion_ray<R: WorldRng + ?Sized>(
    world: &mut World,
    start: Vec2,
    end: Vec2,
    info: &Explosion,
    rng: &mut R,
) {
    // Step length small enough to visit every cell on the path.
    let line = end - start;
    let longest = line.x.abs().max(line.y.abs());
    if longest == 0.0 {
        return;
    }
    let step = line / longest;

    let mut curr = start;
    let blast_limit = uniform(rng, info.min_radius, info.max_radius);

    while world.valid(curr.as_ivec2()) && (curr - start).length_squared() < blast_limit * blast_limit
    {
        let cell = curr.as_ivec2();
        if world.at(cell).kind == PixelType::Titanium {
            break;
        }
        let debris = if rng.gen_f32() < EMBER_CHANCE {
            Pixel::ember(rng)
        } else {
            Pixel::air()
        };
        world.set(cell, debris);
        curr += step;
    }

    let scorch_limit = (curr - start).length() + normal(rng, 0.0, info.scorch).abs();
    while world.valid(curr.as_ivec2()) && (curr - start).length_squared() < scorch_limit * scorch_limit
    {
        let cell = curr.as_ivec2();
        if world.at(cell).properties().phase == PixelPhase::Solid {
            world.at_mut(cell).color *= SCORCH_DARKEN;
        }
        curr += step;
    }
}

/// Destroy matter around `pos`, casting rays at every cell of the
/// bounding square so the whole disc is covered. Rays are independent:
/// a later ray may destroy cells an earlier one scorched.
pub fn apply_explosion<R: WorldRng + ?Sized>(
    world: &mut World,
    pos: Vec2,
    info: &Explosion,
    rng: &mut R,
) {
    let boundary = (info.max_radius + 3.0 * info.scorch) as i32;
    log::debug!(
        "explosion at ({:.1}, {:.1}), radius {}..{}, scorch {}",
        pos.x,
        pos.y,
        info.min_radius,
        info.max_radius,
        info.scorch
    );

    for i in -boundary..=boundary {
        let i = i as f32;
        let b = boundary as f32;
        explosion_ray(world, pos, pos + Vec2::new(i, b), info, rng);
        explosion_ray(world, pos, pos + Vec2::new(i, -b), info, rng);
        explosion_ray(world, pos, pos + Vec2::new(b, i), info, rng);
        explosion_ray(world, pos, pos + Vec2::new(-b, i), info, rng);
    }
}
