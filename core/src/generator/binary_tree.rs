use rand::Rng;
use smallvec::SmallVec;

use super::*;

/// Scans the grid row by row and links every cell to one of its South, East or North neighbors.
///
/// East is offered twice, so it gets picked twice as often as either vertical direction. Nothing
/// links westwards, which keeps the result free of cycles, but since both vertical directions are
/// offered it may leave the grid split into several unconnected regions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BinaryTreeCarver {
    next: CellCount,
}

impl BinaryTreeCarver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directions a cell may link to, duplicates included.
    pub fn candidates(grid: &Grid, coords: Coord2) -> SmallVec<[Direction; 4]> {
        use Direction::*;

        let exists = |direction| grid.neighbor(coords, direction).is_some();
        let mut candidates = SmallVec::new();
        if exists(South) {
            candidates.push(South);
        }
        if exists(East) {
            candidates.push(East);
        }
        if exists(North) {
            candidates.push(North);
        }
        if exists(East) {
            candidates.push(East);
        }
        candidates
    }
}

impl MazeCarver for BinaryTreeCarver {
    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        events: &mut EventBuffer,
    ) -> Step {
        if self.next >= grid.total_cells() {
            return Step::Finished;
        }

        let width = CellCount::from(grid.width());
        let coords = ((self.next % width) as Coord, (self.next / width) as Coord);
        self.next += 1;

        if grid.mark_visited(coords) {
            events.push(CarveEvent::CellVisited(coords));
        }

        let candidates = Self::candidates(grid, coords);
        if !candidates.is_empty() {
            let chosen = candidates[rng.random_range(0..candidates.len())];
            grid.carve(coords, chosen, events);
        }

        Step::Advanced
    }
}
