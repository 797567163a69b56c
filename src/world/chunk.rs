//! Chunk activity tracking.
//!
//! The world is covered by a dense grid of chunks, each holding a
//! double-buffered activity flag. Writes wake a chunk for the *next*
//! step; the flip at step entry guarantees a cell woken mid-step is not
//! simulated twice in the same step.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::config::{CHUNK_SIZE, NUM_CHUNKS, WORLD_SIZE};

/// Activity state for one chunk of cells.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Chunk {
    /// Read-only during a step; gates simulation of the chunk's cells.
    pub active_this_step: bool,
    /// Write target for wakes; promoted at the next step entry.
    pub active_next_step: bool,
}

/// Dense `NUM_CHUNKS x NUM_CHUNKS` grid of activity flags.
#[derive(Clone, Debug)]
pub struct ChunkGrid {
    chunks: Vec<Chunk>,
}

fn chunk_index(chunk: IVec2) -> usize {
    debug_assert!(
        chunk.x >= 0
            && (chunk.x as usize) < NUM_CHUNKS
            && chunk.y >= 0
            && (chunk.y as usize) < NUM_CHUNKS
    );
    chunk.y as usize * NUM_CHUNKS + chunk.x as usize
}

impl ChunkGrid {
    /// A fresh grid starts fully awake so the first steps consider
    /// every region once.
    pub fn new() -> Self {
        Self {
            chunks: vec![
                Chunk {
                    active_this_step: true,
                    active_next_step: true,
                };
                NUM_CHUNKS * NUM_CHUNKS
            ],
        }
    }

    /// Promote the next-step flags and clear them. Called once at step
    /// entry.
    pub fn begin_step(&mut self) {
        for chunk in &mut self.chunks {
            chunk.active_this_step = chunk.active_next_step;
            chunk.active_next_step = false;
        }
    }

    /// Wake the chunk containing the cell at `pos` for the next step.
    /// A write within one cell of a chunk boundary also wakes the
    /// neighbour across that boundary, since it can unsettle cells there.
    pub fn wake_containing(&mut self, pos: IVec2) {
        let c = CHUNK_SIZE as i32;
        let chunk = pos / c;
        self.chunks[chunk_index(chunk)].active_next_step = true;

        if pos.x + 1 < WORLD_SIZE as i32 && (pos.x + 1) % c == 0 {
            self.chunks[chunk_index(chunk + IVec2::new(1, 0))].active_next_step = true;
        }
        if pos.x > 0 && pos.x % c == 0 {
            self.chunks[chunk_index(chunk - IVec2::new(1, 0))].active_next_step = true;
        }
        if pos.y + 1 < WORLD_SIZE as i32 && (pos.y + 1) % c == 0 {
            self.chunks[chunk_index(chunk + IVec2::new(0, 1))].active_next_step = true;
        }
        if pos.y > 0 && pos.y % c == 0 {
            self.chunks[chunk_index(chunk - IVec2::new(0, 1))].active_next_step = true;
        }
    }

    /// Wake every chunk immediately. Both flags are set so the wake
    /// survives the promote at the next step entry; used after loading
    /// a world and by `fill`.
    pub fn wake_all(&mut self) {
        for chunk in &mut self.chunks {
            chunk.active_this_step = true;
            chunk.active_next_step = true;
        }
    }

    /// Is the chunk containing `pos` being simulated this step?
    pub fn is_active(&self, pos: IVec2) -> bool {
        self.chunks[chunk_index(pos / CHUNK_SIZE as i32)].active_this_step
    }

    /// Number of chunks being simulated this step.
    pub fn num_awake(&self) -> usize {
        self.chunks.iter().filter(|c| c.active_this_step).count()
    }
}

impl Default for ChunkGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asleep() -> ChunkGrid {
        let mut grid = ChunkGrid::new();
        grid.begin_step();
        grid.begin_step();
        assert_eq!(grid.num_awake(), 0);
        grid
    }

    #[test]
    fn fresh_grid_is_fully_awake() {
        let grid = ChunkGrid::new();
        assert_eq!(grid.num_awake(), NUM_CHUNKS * NUM_CHUNKS);
    }

    #[test]
    fn wake_promotes_on_begin_step() {
        let mut grid = asleep();
        grid.wake_containing(IVec2::new(40, 40));
        assert_eq!(grid.num_awake(), 0);

        grid.begin_step();
        assert_eq!(grid.num_awake(), 1);
        assert!(grid.is_active(IVec2::new(40, 40)));

        grid.begin_step();
        assert_eq!(grid.num_awake(), 0);
    }

    #[test]
    fn interior_wake_touches_one_chunk() {
        let mut grid = asleep();
        grid.wake_containing(IVec2::new(24, 24));
        grid.begin_step();
        assert_eq!(grid.num_awake(), 1);
    }

    #[test]
    fn boundary_wake_bleeds_into_neighbours() {
        // (15, 16): one cell left of a vertical boundary and on the far
        // side of a horizontal one.
        let mut grid = asleep();
        grid.wake_containing(IVec2::new(15, 16));
        grid.begin_step();
        assert_eq!(grid.num_awake(), 3);
        assert!(grid.is_active(IVec2::new(8, 24)));
        assert!(grid.is_active(IVec2::new(24, 24)));
        assert!(grid.is_active(IVec2::new(8, 8)));
    }

    #[test]
    fn world_edges_do_not_wrap() {
        let mut grid = asleep();
        grid.wake_containing(IVec2::new(0, 0));
        grid.wake_containing(IVec2::new(WORLD_SIZE as i32 - 1, WORLD_SIZE as i32 - 1));
        grid.begin_step();
        assert_eq!(grid.num_awake(), 2);
    }

    #[test]
    fn wake_all_survives_the_next_promote() {
        let mut grid = asleep();
        grid.wake_all();
        assert_eq!(grid.num_awake(), NUM_CHUNKS * NUM_CHUNKS);
        grid.begin_step();
        assert_eq!(grid.num_awake(), NUM_CHUNKS * NUM_CHUNKS);
        grid.begin_step();
        assert_eq!(grid.num_awake(), 0);
    }
}
