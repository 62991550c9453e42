use alloc::vec::Vec;
use rand::Rng;

use super::*;

/// Grows the maze from a random cell, extending a cell picked from the active list each step.
///
/// Cells leave the active list once they have no unvisited neighbors left.
#[derive(Clone, Debug, PartialEq)]
pub struct GrowingTreeCarver {
    mode: SelectionMode,
    active: Vec<Coord2>,
    started: bool,
}

impl GrowingTreeCarver {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            active: Vec::new(),
            started: false,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match self.mode {
            SelectionMode::Newest => self.active.len() - 1,
            SelectionMode::Random => rng.random_range(0..self.active.len()),
        }
    }
}

impl MazeCarver for GrowingTreeCarver {
    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        events: &mut EventBuffer,
    ) -> Step {
        if !self.started {
            self.started = true;
            grid.reset_visited();

            let (width, height) = grid.size();
            let start = (rng.random_range(0..width), rng.random_range(0..height));
            log::debug!("growing tree starts at {:?}", start);
            if grid.mark_visited(start) {
                events.push(CarveEvent::CellVisited(start));
            }
            self.active.push(start);
            return Step::Quiet;
        }

        if self.active.is_empty() {
            return Step::Finished;
        }

        let index = self.select(rng);
        let current = self.active[index];
        let neighbors = grid.unvisited_neighbors(current);
        if neighbors.is_empty() {
            self.active.remove(index);
            return Step::Quiet;
        }

        let (direction, next) = neighbors[rng.random_range(0..neighbors.len())];
        grid.carve(current, direction, events);
        if grid.mark_visited(next) {
            events.push(CarveEvent::CellVisited(next));
        }
        self.active.push(next);

        Step::Advanced
    }
}
