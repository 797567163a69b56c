//! Per-pixel update pipeline: position, attributes, neighbour effects.

use glam::IVec2;

use super::world::World;
use crate::config::{GRAVITY, TIME_STEP};
use crate::simulation::{pixel_flags, properties, Pixel, PixelPhase, PixelType, WorldRng};

const NEIGHBOUR_OFFSETS: [IVec2; 8] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, 1),
    IVec2::new(0, -1),
    IVec2::new(1, 1),
    IVec2::new(-1, -1),
    IVec2::new(-1, 1),
    IVec2::new(1, -1),
];

/// Run one cell through the pipeline. The cell may move during the
/// position phase; the later phases and the updated-flag apply to its
/// final position.
pub(super) fn update_pixel<R: WorldRng + ?Sized>(world: &mut World, pos: IVec2, rng: &mut R) {
    let pos = update_position(world, pos, rng);
    update_attributes(world, pos, rng);
    affect_neighbours(world, pos, rng);
    world.at_mut(pos).flags |= pixel_flags::IS_UPDATED;
}

fn sign(f: f32) -> i32 {
    if f < 0.0 {
        -1
    } else if f > 0.0 {
        1
    } else {
        0
    }
}

/// Whether the cell at `src` may displace the cell at `dst`. Empty
/// space accepts everything; otherwise a denser phase may sink through
/// a lighter one but never the reverse.
fn can_move_to(world: &World, src: IVec2, dst: IVec2) -> bool {
    if !world.valid(src) || !world.valid(dst) {
        return false;
    }
    if world.at(dst).kind == PixelType::None {
        return true;
    }

    let src_phase = world.at(src).properties().phase;
    let dst_phase = world.at(dst).properties().phase;
    matches!(
        (src_phase, dst_phase),
        (PixelPhase::Solid, PixelPhase::Liquid)
            | (PixelPhase::Solid, PixelPhase::Gas)
            | (PixelPhase::Liquid, PixelPhase::Gas)
    )
}

/// A cell moving past its left/right neighbours can unsettle them.
/// Each gravity-affected neighbour starts falling unless its inertial
/// resistance holds.
fn wake_adjacent_falling<R: WorldRng + ?Sized>(world: &mut World, pos: IVec2, rng: &mut R) {
    for offset in [IVec2::new(-1, 0), IVec2::new(1, 0)] {
        let neighbour = pos + offset;
        if !world.valid(neighbour) {
            continue;
        }
        let props = world.at(neighbour).properties();
        if props.gravity_factor != 0.0 && rng.gen_f32() > props.inertial_resistance {
            world.at_mut(neighbour).flags |= pixel_flags::IS_FALLING;
            world.wake_chunk_with_pixel(neighbour);
        }
    }
}

/// Walk `pos` towards `pos + offset` along the rasterized segment,
/// swapping one cell at a time until blocked. Returns true and updates
/// `pos` if the cell moved at all.
fn move_along<R: WorldRng + ?Sized>(
    world: &mut World,
    pos: &mut IVec2,
    offset: IVec2,
    rng: &mut R,
) -> bool {
    let start = *pos;
    let end = start + offset;
    let steps = (end.x - start.x).abs().max((end.y - start.y).abs());

    for i in 1..=steps {
        let t = i as f32 / steps as f32;
        let next = (start.as_vec2() + (end - start).as_vec2() * t)
            .round()
            .as_ivec2();

        if !can_move_to(world, *pos, next) {
            break;
        }
        *pos = world.swap(*pos, next);
        wake_adjacent_falling(world, *pos, rng);
    }

    if *pos != start {
        world.at_mut(*pos).flags |= pixel_flags::IS_FALLING;
        world.wake_chunk_with_pixel(*pos);
        true
    } else {
        false
    }
}

/// Movement attempts in priority order: gravity along the velocity,
/// inertial rest, diagonal slide, lateral dispersion.
fn try_moves<R: WorldRng + ?Sized>(world: &mut World, mut pos: IVec2, rng: &mut R) -> IVec2 {
    let props = *properties(world.at(pos).kind);

    if props.gravity_factor != 0.0 {
        let velocity = {
            let cell = world.at_mut(pos);
            cell.velocity += props.gravity_factor * GRAVITY * TIME_STEP;
            cell.velocity
        };
        let offset = IVec2::new(velocity.x as i32, velocity.y as i32);
        if move_along(world, &mut pos, offset, rng) {
            return pos;
        }
    }

    // A cell with inertial resistance that is not falling stays put.
    if props.inertial_resistance > 0.0 && world.at(pos).flags & pixel_flags::IS_FALLING == 0 {
        return pos;
    }

    if props.is_movable && props.can_move_diagonally {
        let dir = sign(props.gravity_factor);
        let mut offsets = [IVec2::new(-1, dir), IVec2::new(1, dir)];
        if rng.gen_bool() {
            offsets.swap(0, 1);
        }
        for offset in offsets {
            if move_along(world, &mut pos, offset, rng) {
                return pos;
            }
        }
        world.at_mut(pos).velocity.y = 0.0;
    }

    if props.dispersion_rate > 0 {
        world.at_mut(pos).velocity.y = 0.0;

        let d = props.dispersion_rate;
        let mut offsets = [IVec2::new(-d, 0), IVec2::new(d, 0)];
        if rng.gen_bool() {
            offsets.swap(0, 1);
        }
        for offset in offsets {
            if move_along(world, &mut pos, offset, rng) {
                return pos;
            }
        }
    }

    pos
}

fn update_position<R: WorldRng + ?Sized>(world: &mut World, pos: IVec2, rng: &mut R) -> IVec2 {
    let start = pos;
    let pos = try_moves(world, pos, rng);

    let cell = world.at_mut(pos);
    if pos != start {
        cell.flags |= pixel_flags::IS_FALLING;
    } else {
        cell.flags &= !pixel_flags::IS_FALLING;
    }
    pos
}

/// All eight in-bounds neighbours are occupied.
fn is_surrounded(world: &World, pos: IVec2) -> bool {
    for offset in NEIGHBOUR_OFFSETS {
        let neighbour = pos + offset;
        if world.valid(neighbour) && world.at(neighbour).kind == PixelType::None {
            return false;
        }
    }
    true
}

/// Combustion lifecycle: a burning cell may be put out, then may burn
/// away entirely.
fn update_attributes<R: WorldRng + ?Sized>(world: &mut World, pos: IVec2, rng: &mut R) {
    let props = *properties(world.at(pos).kind);

    if world.at(pos).flags & pixel_flags::IS_BURNING == 0 {
        return;
    }

    // Burning cells keep their chunk awake.
    world.wake_chunk_with_pixel(pos);

    let put_out = if is_surrounded(world, pos) {
        props.put_out_surrounded
    } else {
        props.put_out
    };
    if rng.gen_f32() < put_out {
        world.at_mut(pos).flags &= !pixel_flags::IS_BURNING;
    }

    if world.at(pos).flags & pixel_flags::IS_BURNING != 0 && rng.gen_f32() < props.burn_out_chance {
        *world.at_mut(pos) = Pixel::air();
    }
}

/// Interactions radiating to the eight neighbours: boiling, corrosion,
/// fire spread, ember emission.
fn affect_neighbours<R: WorldRng + ?Sized>(world: &mut World, pos: IVec2, rng: &mut R) {
    let props = *properties(world.at(pos).kind);
    let burning = world.at(pos).flags & pixel_flags::IS_BURNING != 0;

    for offset in NEIGHBOUR_OFFSETS {
        let neighbour = pos + offset;
        if !world.valid(neighbour) {
            continue;
        }

        if props.can_boil_water && world.at(neighbour).kind == PixelType::Water {
            *world.at_mut(neighbour) = Pixel::steam(rng);
        }

        if props.is_corrosion_source {
            let resist = world.at(neighbour).properties().corrosion_resist;
            if rng.gen_f32() > resist {
                *world.at_mut(neighbour) = Pixel::air();
                // Corroding eats away at the source as well.
                if rng.gen_f32() > 0.9 {
                    *world.at_mut(pos) = Pixel::air();
                }
            }
        }

        if props.is_burn_source || burning {
            let flammability = world.at(neighbour).properties().flammability;
            if rng.gen_f32() < flammability {
                world.at_mut(neighbour).flags |= pixel_flags::IS_BURNING;
                world.wake_chunk_with_pixel(neighbour);
            }
        }

        let emits_embers = props.is_ember_source || burning;
        if emits_embers && world.at(neighbour).kind == PixelType::None && rng.gen_f32() < 0.01 {
            *world.at_mut(neighbour) = Pixel::ember(rng);
            world.wake_chunk_with_pixel(neighbour);
        }
    }
}
