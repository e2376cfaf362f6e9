//! Randomized exhaustive partition used by dissolve and random bars.
//!
//! Every index in `0..count` is drawn exactly once, without replacement.
//! The k-th drawn index starts at `k * duration / count`, so offsets grow
//! strictly with rank and the last one stays below `duration`.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartitionSlot {
    /// Cell or bar index.
    pub index: usize,
    /// Draw order.
    pub rank: usize,
    /// Start offset in seconds from the effect's begin.
    pub offset: f64,
}

/// Draw a uniformly random permutation of `0..count`, in rank order.
pub fn partition<R: Rng + ?Sized>(count: usize, duration: f64, rng: &mut R) -> Vec<PartitionSlot> {
    let step = if count == 0 { 0.0 } else { duration / count as f64 };
    let mut pool: Vec<usize> = (0..count).collect();
    let mut out = Vec::with_capacity(count);
    let mut rank = 0;
    while !pool.is_empty() {
        let pick = rng.gen_range(0..pool.len());
        let index = pool.swap_remove(pick);
        out.push(PartitionSlot {
            index,
            rank,
            offset: rank as f64 * step,
        });
        rank += 1;
    }
    out
}

/// Cell grid for dissolve: the longer side is cut into `long_side` cells and
/// the other side into as many cells as keep them square.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DissolveGrid {
    /// Fractional cell counts across and down.
    pub across: f64,
    pub down: f64,
}

impl DissolveGrid {
    /// Degenerate boxes (lines, points) still get at least one cell per
    /// axis.
    pub fn for_box(width: f64, height: f64, long_side: u32) -> Self {
        let long = f64::from(long_side.max(1));
        let (across, down) = if width > height {
            (long, long / width * height)
        } else if height > 0.0 {
            (long / height * width, long)
        } else {
            (long, long)
        };
        Self {
            across: across.max(1.0),
            down: down.max(1.0),
        }
    }

    pub fn columns(&self) -> usize {
        self.across.ceil().max(1.0) as usize
    }

    pub fn rows(&self) -> usize {
        self.down.ceil().max(1.0) as usize
    }

    pub fn cell_count(&self) -> usize {
        self.columns() * self.rows()
    }

    /// Top-left corner and size of cell `index` in mask units. Cells are
    /// oversized by 10 % so neighbours overlap without seams.
    pub fn cell(&self, index: usize) -> ([f64; 2], [f64; 2]) {
        let cols = self.columns();
        let col = (index % cols) as f64;
        let row = (index / cols) as f64;
        (
            [col / self.across, row / self.down],
            [1.1 / self.across, 1.1 / self.down],
        )
    }
}
