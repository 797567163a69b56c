//! Binary save format for the cell array.
//!
//! Little-endian, tightly packed, 36 bytes per cell: the material
//! ordinal padded to four bytes, four f32 color channels, two f32
//! velocity components, and the u64 flag word. Chunk activity is not
//! stored; a loaded world wakes every chunk so the next step
//! reconsiders every region.

use std::path::Path;

use anyhow::Context;
use glam::{Vec2, Vec4};
use thiserror::Error;

use super::world::World;
use crate::config::WORLD_SIZE;
use crate::simulation::{Pixel, PixelType};

/// Encoded size of one cell.
pub const BYTES_PER_PIXEL: usize = 36;

/// Encoded size of a whole world.
pub const WORLD_BYTES: usize = BYTES_PER_PIXEL * WORLD_SIZE * WORLD_SIZE;

/// Decoding failures. The caller's in-memory world is never touched.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("world data is {actual} bytes, expected {expected}")]
    BadLength { expected: usize, actual: usize },
    #[error("unknown material ordinal {0}")]
    UnknownPixelType(u32),
}

fn read_u32(record: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        record[offset],
        record[offset + 1],
        record[offset + 2],
        record[offset + 3],
    ])
}

fn read_u64(record: &[u8], offset: usize) -> u64 {
    let lo = read_u32(record, offset) as u64;
    let hi = read_u32(record, offset + 4) as u64;
    lo | (hi << 32)
}

fn read_f32(record: &[u8], offset: usize) -> f32 {
    f32::from_bits(read_u32(record, offset))
}

impl World {
    /// Encode the cell array.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(WORLD_BYTES);
        for cell in &self.pixels {
            out.extend_from_slice(&(cell.kind as u32).to_le_bytes());
            for channel in cell.color.to_array() {
                out.extend_from_slice(&channel.to_le_bytes());
            }
            out.extend_from_slice(&cell.velocity.x.to_le_bytes());
            out.extend_from_slice(&cell.velocity.y.to_le_bytes());
            out.extend_from_slice(&cell.flags.to_le_bytes());
        }
        out
    }

    /// Decode a world from the wire format. The result has every chunk
    /// awake.
    pub fn from_bytes(bytes: &[u8]) -> Result<World, LoadError> {
        if bytes.len() != WORLD_BYTES {
            return Err(LoadError::BadLength {
                expected: WORLD_BYTES,
                actual: bytes.len(),
            });
        }

        let mut world = World::new();
        for (i, record) in bytes.chunks_exact(BYTES_PER_PIXEL).enumerate() {
            let raw_kind = read_u32(record, 0);
            let kind =
                PixelType::from_ordinal(raw_kind).ok_or(LoadError::UnknownPixelType(raw_kind))?;

            world.pixels[i] = Pixel {
                kind,
                color: Vec4::new(
                    read_f32(record, 4),
                    read_f32(record, 8),
                    read_f32(record, 12),
                    read_f32(record, 16),
                ),
                velocity: Vec2::new(read_f32(record, 20), read_f32(record, 24)),
                flags: read_u64(record, 28),
            };
        }

        world.wake_all_chunks();
        Ok(world)
    }

    /// Write the encoded world to disk.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_bytes())
            .with_context(|| format!("failed to write world to {}", path.display()))?;
        log::info!("[SAVE] world written to {}", path.display());
        Ok(())
    }

    /// Read a world back from disk.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<World> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read world from {}", path.display()))?;
        let world = World::from_bytes(&bytes)
            .with_context(|| format!("failed to decode world from {}", path.display()))?;
        log::info!("[LOAD] world restored from {}", path.display());
        Ok(world)
    }
}
