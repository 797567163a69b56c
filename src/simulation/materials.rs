//! Material identities and their static property records.

use serde::{Deserialize, Serialize};

/// The closed set of materials a cell can hold. `None` is empty space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PixelType {
    None = 0,
    Sand,
    Dirt,
    Coal,
    Water,
    Lava,
    Acid,
    Rock,
    Titanium,
    Steam,
    Fuse,
    Ember,
    Oil,
    Gunpowder,
    Methane,
}

impl PixelType {
    pub const COUNT: usize = 15;

    /// Reverse of the `repr(u8)` ordinal, for decoding saved worlds.
    pub fn from_ordinal(raw: u32) -> Option<PixelType> {
        use PixelType::*;
        Some(match raw {
            0 => None,
            1 => Sand,
            2 => Dirt,
            3 => Coal,
            4 => Water,
            5 => Lava,
            6 => Acid,
            7 => Rock,
            8 => Titanium,
            9 => Steam,
            10 => Fuse,
            11 => Ember,
            12 => Oil,
            13 => Gunpowder,
            14 => Methane,
            _ => return Option::None,
        })
    }
}

/// How a material occupies space; decides which pairs may displace
/// which during movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelPhase {
    Solid,
    Liquid,
    Gas,
}

/// Static per-material record consulted by the update pipeline.
#[derive(Clone, Copy, Debug)]
pub struct PixelProperties {
    // Movement
    pub phase: PixelPhase,
    pub is_movable: bool,
    pub can_move_diagonally: bool,
    pub gravity_factor: f32,
    /// Chance per neighbour wake event that the cell refuses to start
    /// falling.
    pub inertial_resistance: f32,
    /// Reserved; carried through the table but not yet interpreted.
    pub horizontal_transfer: f32,
    /// Lateral search distance for liquids and gases.
    pub dispersion_rate: i32,

    // Water
    pub can_boil_water: bool,

    // Acid
    pub corrosion_resist: f32,
    pub is_corrosion_source: bool,

    // Fire
    /// Chance of catching fire from a burning neighbour.
    pub flammability: f32,
    /// Chance per step of going out while fully enclosed.
    pub put_out_surrounded: f32,
    /// Chance per step of going out otherwise.
    pub put_out: f32,
    /// Chance per step that a burning cell is consumed.
    pub burn_out_chance: f32,
    pub is_burn_source: bool,
    pub is_ember_source: bool,
}

const DEFAULT: PixelProperties = PixelProperties {
    phase: PixelPhase::Solid,
    is_movable: false,
    can_move_diagonally: false,
    gravity_factor: 0.0,
    inertial_resistance: 0.0,
    horizontal_transfer: 0.0,
    dispersion_rate: 0,
    can_boil_water: false,
    corrosion_resist: 0.0,
    is_corrosion_source: false,
    flammability: 0.0,
    put_out_surrounded: 0.0,
    put_out: 0.0,
    burn_out_chance: 0.0,
    is_burn_source: false,
    is_ember_source: false,
};

// Indexed by the `repr(u8)` ordinal of `PixelType`.
static PROPERTIES: [PixelProperties; PixelType::COUNT] = [
    // None: empty space resists corrosion so acid does not eat the air
    // around itself.
    PixelProperties {
        corrosion_resist: 1.0,
        ..DEFAULT
    },
    // Sand
    PixelProperties {
        is_movable: true,
        can_move_diagonally: true,
        gravity_factor: 1.0,
        inertial_resistance: 0.1,
        horizontal_transfer: 0.3,
        corrosion_resist: 0.3,
        ..DEFAULT
    },
    // Dirt
    PixelProperties {
        is_movable: true,
        can_move_diagonally: true,
        gravity_factor: 1.0,
        inertial_resistance: 0.4,
        horizontal_transfer: 0.2,
        corrosion_resist: 0.5,
        ..DEFAULT
    },
    // Coal
    PixelProperties {
        is_movable: true,
        can_move_diagonally: true,
        gravity_factor: 1.0,
        inertial_resistance: 0.95,
        horizontal_transfer: 0.1,
        corrosion_resist: 0.8,
        flammability: 0.02,
        put_out_surrounded: 0.02,
        burn_out_chance: 0.005,
        ..DEFAULT
    },
    // Water
    PixelProperties {
        phase: PixelPhase::Liquid,
        is_movable: true,
        can_move_diagonally: true,
        gravity_factor: 1.0,
        dispersion_rate: 5,
        corrosion_resist: 1.0,
        ..DEFAULT
    },
    // Lava
    PixelProperties {
        phase: PixelPhase::Liquid,
        is_movable: true,
        can_move_diagonally: true,
        gravity_factor: 1.0,
        dispersion_rate: 1,
        corrosion_resist: 1.0,
        can_boil_water: true,
        is_burn_source: true,
        is_ember_source: true,
        ..DEFAULT
    },
    // Acid
    PixelProperties {
        phase: PixelPhase::Liquid,
        is_movable: true,
        can_move_diagonally: true,
        gravity_factor: 1.0,
        dispersion_rate: 1,
        corrosion_resist: 1.0,
        is_corrosion_source: true,
        ..DEFAULT
    },
    // Rock
    PixelProperties {
        corrosion_resist: 0.95,
        ..DEFAULT
    },
    // Titanium: immovable and indestructible, also stops explosion rays.
    PixelProperties {
        corrosion_resist: 1.0,
        ..DEFAULT
    },
    // Steam
    PixelProperties {
        phase: PixelPhase::Gas,
        is_movable: true,
        can_move_diagonally: true,
        gravity_factor: -0.2,
        dispersion_rate: 9,
        ..DEFAULT
    },
    // Fuse: a static cord that catches reliably and burns away.
    PixelProperties {
        corrosion_resist: 0.5,
        flammability: 0.45,
        burn_out_chance: 0.1,
        ..DEFAULT
    },
    // Ember: short-lived airborne fire.
    PixelProperties {
        phase: PixelPhase::Gas,
        burn_out_chance: 0.2,
        is_burn_source: true,
        ..DEFAULT
    },
    // Oil
    PixelProperties {
        phase: PixelPhase::Liquid,
        is_movable: true,
        can_move_diagonally: true,
        gravity_factor: 1.0,
        dispersion_rate: 2,
        corrosion_resist: 0.2,
        flammability: 0.2,
        put_out_surrounded: 0.05,
        burn_out_chance: 0.02,
        ..DEFAULT
    },
    // Gunpowder
    PixelProperties {
        is_movable: true,
        can_move_diagonally: true,
        gravity_factor: 1.0,
        inertial_resistance: 0.05,
        horizontal_transfer: 0.2,
        corrosion_resist: 0.4,
        flammability: 0.35,
        burn_out_chance: 0.5,
        is_ember_source: true,
        ..DEFAULT
    },
    // Methane
    PixelProperties {
        phase: PixelPhase::Gas,
        is_movable: true,
        can_move_diagonally: true,
        gravity_factor: -0.2,
        dispersion_rate: 6,
        flammability: 0.8,
        burn_out_chance: 0.3,
        ..DEFAULT
    },
];

/// Property record for a material. Shared statics, no allocation.
pub fn properties(kind: PixelType) -> &'static PixelProperties {
    &PROPERTIES[kind as usize]
}
