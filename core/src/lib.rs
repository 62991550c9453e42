//! Maze carving engine: a wall-bitmask cell grid, interchangeable carving algorithms that report
//! their progress as a stream of events, and a driver pacing one run at a time.
#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use catalog::*;
pub use cell::*;
pub use driver::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use grid::*;
pub use types::*;

mod catalog;
mod cell;
mod driver;
mod error;
mod event;
mod generator;
mod grid;
mod types;

/// Everything needed to start one generation run.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub size: Coord2,
    /// Pause after every step, zero runs straight through.
    pub step_delay: Duration,
    /// Index into the driver's [`Catalog`].
    pub algorithm: usize,
    /// Overrides the Growing Tree selection mode of the catalog entry.
    pub mode: Option<SelectionMode>,
    /// Seed for this run, drawn from the driver when absent.
    pub seed: Option<u64>,
}

impl GenerationRequest {
    pub const fn new_unchecked(size: Coord2, algorithm: usize) -> Self {
        Self {
            size,
            step_delay: Duration::ZERO,
            algorithm,
            mode: None,
            seed: None,
        }
    }

    /// Builds a request, clamping both dimensions to at least one cell.
    pub fn new((size_x, size_y): Coord2, algorithm: usize) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        Self::new_unchecked((size_x, size_y), algorithm)
    }

    /// Builds a request, rejecting empty grids instead of clamping them.
    pub fn try_new(size: Coord2, algorithm: usize) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(MazeError::InvalidDimensions);
        }
        Ok(Self::new_unchecked(size, algorithm))
    }

    pub const fn with_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    /// Sets the step delay in seconds, negative and non-finite values mean no delay.
    pub fn with_delay_secs(self, secs: f32) -> Self {
        self.with_delay(Duration::try_from_secs_f32(secs).unwrap_or(Duration::ZERO))
    }

    pub const fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}
