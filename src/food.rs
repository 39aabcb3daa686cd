use log::debug;
use rand::rngs::ThreadRng;
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::grid::{Cell, Grid, Occupant};

/// Drops food on a uniformly random free cell.
#[derive(Debug)]
pub struct FoodGenerator<R = ThreadRng> {
    rng: R,
}

impl FoodGenerator<ThreadRng> {
    pub fn new() -> Self {
        FoodGenerator::with_rng(rand::thread_rng())
    }
}

impl Default for FoodGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> FoodGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        FoodGenerator { rng }
    }

    /// Marks a random free cell as food and returns it, or `None` when the
    /// grid has no free cell left.
    pub fn generate_food(&mut self, grid: &mut Grid) -> Option<Cell> {
        let cell = grid.free_cells().choose(&mut self.rng)?;
        grid.occupy(cell, Occupant::Food);
        debug!("Placed food at {:?}", cell);
        Some(cell)
    }
}
