//! The pixel value type and per-material constructors.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use super::materials::{properties, PixelProperties, PixelType};
use super::rng::{uniform, WorldRng};

/// Flag bits for per-cell state. The upper bits of the word are
/// reserved.
pub mod pixel_flags {
    /// Already updated this step.
    pub const IS_UPDATED: u64 = 1 << 0;
    /// In free fall.
    pub const IS_FALLING: u64 = 1 << 1;
    /// Currently on fire.
    pub const IS_BURNING: u64 = 1 << 2;
}

/// A single cell of the world. Identity is the grid position; the value
/// is copied and swapped freely.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pixel {
    pub kind: PixelType,
    /// RGBA, each channel in `[0, 1]`. Read by the renderer.
    pub color: Vec4,
    /// Cells per step, accumulated under gravity.
    pub velocity: Vec2,
    pub flags: u64,
}

/// Background color shown through empty cells.
const BACKGROUND: Vec4 = Vec4::new(44.0 / 256.0, 58.0 / 256.0, 71.0 / 256.0, 1.0);

fn from_hex(hex: u32) -> Vec4 {
    Vec4::new(
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
        1.0,
    )
}

/// Per-instance color variation, +-0.04 per channel.
fn light_noise<R: WorldRng + ?Sized>(rng: &mut R) -> Vec4 {
    Vec4::new(
        uniform(rng, -0.04, 0.04),
        uniform(rng, -0.04, 0.04),
        uniform(rng, -0.04, 0.04),
        0.0,
    )
}

impl Pixel {
    fn spawn<R: WorldRng + ?Sized>(kind: PixelType, base: u32, flags: u64, rng: &mut R) -> Pixel {
        let color = (from_hex(base) + light_noise(rng)).clamp(Vec4::ZERO, Vec4::ONE);
        Pixel {
            kind,
            color,
            velocity: Vec2::ZERO,
            flags,
        }
    }

    /// Empty space: background color, zero velocity, no flags.
    pub fn air() -> Pixel {
        Pixel {
            kind: PixelType::None,
            color: BACKGROUND,
            velocity: Vec2::ZERO,
            flags: 0,
        }
    }

    pub fn sand<R: WorldRng + ?Sized>(rng: &mut R) -> Pixel {
        Self::spawn(PixelType::Sand, 0xF8EFBA, pixel_flags::IS_FALLING, rng)
    }

    pub fn dirt<R: WorldRng + ?Sized>(rng: &mut R) -> Pixel {
        Self::spawn(PixelType::Dirt, 0x5C1D06, pixel_flags::IS_FALLING, rng)
    }

    pub fn coal<R: WorldRng + ?Sized>(rng: &mut R) -> Pixel {
        Self::spawn(PixelType::Coal, 0x1E272E, pixel_flags::IS_FALLING, rng)
    }

    pub fn water<R: WorldRng + ?Sized>(rng: &mut R) -> Pixel {
        Self::spawn(PixelType::Water, 0x1B9CFC, 0, rng)
    }

    pub fn lava<R: WorldRng + ?Sized>(rng: &mut R) -> Pixel {
        Self::spawn(PixelType::Lava, 0xF97F51, 0, rng)
    }

    pub fn acid<R: WorldRng + ?Sized>(rng: &mut R) -> Pixel {
        Self::spawn(PixelType::Acid, 0x2ED573, 0, rng)
    }

    pub fn rock<R: WorldRng + ?Sized>(rng: &mut R) -> Pixel {
        Self::spawn(PixelType::Rock, 0xC8C8C8, 0, rng)
    }

    pub fn titanium<R: WorldRng + ?Sized>(rng: &mut R) -> Pixel {
        Self::spawn(PixelType::Titanium, 0xDFE4EA, 0, rng)
    }

    pub fn steam<R: WorldRng + ?Sized>(rng: &mut R) -> Pixel {
        Self::spawn(PixelType::Steam, 0x9AECDB, 0, rng)
    }

    pub fn fuse<R: WorldRng + ?Sized>(rng: &mut R) -> Pixel {
        Self::spawn(PixelType::Fuse, 0xD1A05F, 0, rng)
    }

    /// Embers spawn already burning.
    pub fn ember<R: WorldRng + ?Sized>(rng: &mut R) -> Pixel {
        Self::spawn(PixelType::Ember, 0xE25822, pixel_flags::IS_BURNING, rng)
    }

    pub fn oil<R: WorldRng + ?Sized>(rng: &mut R) -> Pixel {
        Self::spawn(PixelType::Oil, 0x3B2E2A, 0, rng)
    }

    pub fn gunpowder<R: WorldRng + ?Sized>(rng: &mut R) -> Pixel {
        Self::spawn(PixelType::Gunpowder, 0x474747, pixel_flags::IS_FALLING, rng)
    }

    pub fn methane<R: WorldRng + ?Sized>(rng: &mut R) -> Pixel {
        Self::spawn(PixelType::Methane, 0xC7ECEE, 0, rng)
    }

    pub fn is_empty(&self) -> bool {
        self.kind == PixelType::None
    }

    pub fn properties(&self) -> &'static PixelProperties {
        properties(self.kind)
    }
}
