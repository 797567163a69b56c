//! World storage and step scheduling.

use glam::{IVec2, Vec4};

use super::chunk::ChunkGrid;
use super::update;
use crate::config::WORLD_SIZE;
use crate::simulation::{pixel_flags, Pixel, PixelType, WorldRng};

/// The simulation world: a dense square grid of cells plus the chunk
/// activity grid that gates their simulation. All mutation flows
/// through this type.
pub struct World {
    pub(super) pixels: Vec<Pixel>,
    pub(super) chunks: ChunkGrid,
    /// Cell colors as of the end of the last step; read by the
    /// renderer between steps.
    colors: Vec<Vec4>,
}

fn index(pos: IVec2) -> usize {
    debug_assert!(
        pos.x >= 0
            && (pos.x as usize) < WORLD_SIZE
            && pos.y >= 0
            && (pos.y as usize) < WORLD_SIZE,
        "cell position out of bounds: {pos}"
    );
    pos.y as usize * WORLD_SIZE + pos.x as usize
}

impl World {
    /// A world of empty cells, fully awake for its first steps.
    pub fn new() -> Self {
        let air = Pixel::air();
        Self {
            pixels: vec![air; WORLD_SIZE * WORLD_SIZE],
            chunks: ChunkGrid::new(),
            colors: vec![air.color; WORLD_SIZE * WORLD_SIZE],
        }
    }

    /// True iff `pos` names a cell of the grid.
    pub fn valid(&self, pos: IVec2) -> bool {
        pos.x >= 0
            && (pos.x as usize) < WORLD_SIZE
            && pos.y >= 0
            && (pos.y as usize) < WORLD_SIZE
    }

    /// Unchecked read; callers bounds-check with [`World::valid`].
    pub fn at(&self, pos: IVec2) -> &Pixel {
        &self.pixels[index(pos)]
    }

    /// Unchecked write access; callers bounds-check with [`World::valid`].
    pub fn at_mut(&mut self, pos: IVec2) -> &mut Pixel {
        &mut self.pixels[index(pos)]
    }

    /// Write a cell and wake its chunk.
    pub fn set(&mut self, pos: IVec2, pixel: Pixel) {
        self.pixels[index(pos)] = pixel;
        self.chunks.wake_containing(pos);
    }

    /// Overwrite every cell and wake the whole grid.
    pub fn fill(&mut self, pixel: Pixel) {
        for cell in &mut self.pixels {
            *cell = pixel;
        }
        self.chunks.wake_all();
    }

    /// Swap two cells, waking both chunks. Returns `b`, the new
    /// position of the cell that was at `a`.
    pub fn swap(&mut self, a: IVec2, b: IVec2) -> IVec2 {
        let (ia, ib) = (index(a), index(b));
        self.pixels.swap(ia, ib);
        self.chunks.wake_containing(a);
        self.chunks.wake_containing(b);
        b
    }

    /// Wake the chunk containing `pos` (and a bordering neighbour if
    /// `pos` sits within one cell of the boundary).
    pub fn wake_chunk_with_pixel(&mut self, pos: IVec2) {
        self.chunks.wake_containing(pos);
    }

    /// Wake every chunk; used after loading a saved world so the next
    /// step reconsiders every region.
    pub fn wake_all_chunks(&mut self) {
        self.chunks.wake_all();
    }

    pub fn num_awake_chunks(&self) -> usize {
        self.chunks.num_awake()
    }

    pub fn is_chunk_awake(&self, pos: IVec2) -> bool {
        self.chunks.is_active(pos)
    }

    /// Colors as of the end of the last step, row-major.
    pub fn color_buffer(&self) -> &[Vec4] {
        &self.colors
    }

    /// Advance the simulation by one fixed tick.
    ///
    /// Rows are visited bottom to top; a per-row coin flip picks the x
    /// direction so neither side is systematically favoured. A cell is
    /// skipped when empty, already updated, or inside a sleeping chunk.
    pub fn step<R: WorldRng + ?Sized>(&mut self, rng: &mut R) {
        self.chunks.begin_step();

        for y in (0..WORLD_SIZE as i32).rev() {
            if rng.gen_bool() {
                for x in 0..WORLD_SIZE as i32 {
                    self.visit(IVec2::new(x, y), rng);
                }
            } else {
                for x in (0..WORLD_SIZE as i32).rev() {
                    self.visit(IVec2::new(x, y), rng);
                }
            }
        }

        for (i, cell) in self.pixels.iter_mut().enumerate() {
            cell.flags &= !pixel_flags::IS_UPDATED;
            self.colors[i] = cell.color;
        }
    }

    fn visit<R: WorldRng + ?Sized>(&mut self, pos: IVec2, rng: &mut R) {
        let cell = self.at(pos);
        if cell.kind == PixelType::None || cell.flags & pixel_flags::IS_UPDATED != 0 {
            return;
        }
        if !self.chunks.is_active(pos) {
            return;
        }
        update::update_pixel(self, pos, rng);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
